//! Convert Loop Use Case - The Bot's Main Loop
//!
//! One iteration = gas quote → swap + report (+ points) → daily
//! check-in, followed by a fixed pause. Iterations run strictly one
//! after another until the shutdown signal fires; shutdown is observed
//! at every suspension point, including mid-iteration.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::adapters::metrics::BotMetrics;
use crate::domain::transaction::WalletAddress;
use crate::ports::backend::TeaFiApi;
use crate::ports::swap_executor::SwapExecutor;

use super::check_in::{CheckInManager, CheckInOutcome};
use super::gas_quote::GasQuoteFetcher;
use super::reporter::TransactionReporter;

const DIVIDER: &str = "=X= ======================================== =X=";

/// Loop pacing.
#[derive(Debug, Clone, Copy)]
pub struct LoopTiming {
  /// Pause before the first iteration.
  pub initial_delay: Duration,
  /// Pause after every iteration.
  pub interval: Duration,
}

impl Default for LoopTiming {
  fn default() -> Self {
    Self {
      initial_delay: Duration::from_secs(5),
      interval: Duration::from_secs(10),
    }
  }
}

/// What one iteration produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationSummary {
  /// 1-based iteration number.
  pub iteration: u64,
  /// Gas fee attached to the report (native base units).
  pub gas_fee: String,
  /// Wallet returned by the reporter, if a swap happened.
  pub address: Option<WalletAddress>,
  /// Check-in result; `None` when skipped for lack of an address.
  pub check_in: Option<CheckInOutcome>,
}

/// The bot's main loop.
pub struct ConvertLoop<A: TeaFiApi, S: SwapExecutor> {
  gas: GasQuoteFetcher<A>,
  reporter: TransactionReporter<A, S>,
  check_in: CheckInManager<A>,
  timing: LoopTiming,
  metrics: Arc<BotMetrics>,
  /// Called at the start of every iteration (terminal clearing).
  on_iteration_start: Option<fn()>,
  counter: u64,
}

impl<A: TeaFiApi, S: SwapExecutor> ConvertLoop<A, S> {
  /// Assemble the loop from its components.
  pub fn new(
    gas: GasQuoteFetcher<A>,
    reporter: TransactionReporter<A, S>,
    check_in: CheckInManager<A>,
    timing: LoopTiming,
    metrics: Arc<BotMetrics>,
  ) -> Self {
    Self {
      gas,
      reporter,
      check_in,
      timing,
      metrics,
      on_iteration_start: None,
      counter: 0,
    }
  }

  /// Run `hook` at the start of every iteration.
  #[must_use]
  pub fn with_iteration_hook(mut self, hook: fn()) -> Self {
    self.on_iteration_start = Some(hook);
    self
  }

  /// Iterations started so far.
  pub fn iterations(&self) -> u64 {
    self.counter
  }

  /// Run one full iteration.
  pub async fn run_iteration(&mut self) -> IterationSummary {
    if let Some(hook) = self.on_iteration_start {
      hook();
    }
    self.counter += 1;
    self.metrics.iterations.inc();

    info!("{DIVIDER}");
    info!(iteration = self.counter, "Processing transaction {} (Ctrl+C to exit)", self.counter);

    let gas_fee = self.gas.fetch().await;
    let address = self.reporter.send_transaction(&gas_fee).await;

    let check_in = match address.as_deref() {
      Some(address) => Some(self.check_in.check_in_user(address).await),
      None => {
        warn!("No transaction this iteration, skipping check-in");
        None
      }
    };

    info!("{DIVIDER}");

    IterationSummary {
      iteration: self.counter,
      gas_fee,
      address,
      check_in,
    }
  }

  /// Loop until shutdown. Returns the number of iterations started.
  pub async fn run(mut self, mut shutdown_rx: broadcast::Receiver<()>) -> u64 {
    tokio::select! {
      biased;
      _ = shutdown_rx.recv() => {
        info!("Shutdown before first iteration");
        return self.counter;
      }
      () = sleep(self.timing.initial_delay) => {}
    }

    loop {
      tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
          info!(iteration = self.counter, "Shutdown during iteration");
          break;
        }
        _ = self.run_iteration() => {}
      }

      tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
          info!(iterations = self.counter, "Shutdown between iterations");
          break;
        }
        () = sleep(self.timing.interval) => {}
      }
    }

    self.counter
  }
}
