//! Transaction Reporter Use Case - Swap Then Report
//!
//! Runs one conversion through the `SwapExecutor` port and reports the
//! mined transaction to the backend. The report is retried a bounded
//! number of times with a fixed delay, always with the same record:
//! the swap itself is never repeated.
//!
//! Report flow:
//! 1. Execute swap (abort the iteration on failure)
//! 2. POST the report, retrying on failure
//! 3. On success, log the wallet's points
//! 4. Hand the wallet address back to the loop, reported or not

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::adapters::metrics::BotMetrics;
use crate::domain::tokens::TokenRegistry;
use crate::domain::transaction::{ReportPayload, TransactionRecord, WalletAddress};
use crate::ports::backend::TeaFiApi;
use crate::ports::swap_executor::{SwapError, SwapExecutor};

use super::points::PointsChecker;

/// Fixed-delay retry policy for the report POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Retries after the first failed attempt.
  pub max_retries: u32,
  /// Delay before each retry.
  pub delay: Duration,
}

impl RetryPolicy {
  /// Total POST attempts, first one included.
  pub fn max_attempts(&self) -> u32 {
    self.max_retries.saturating_add(1)
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_retries: 5,
      delay: Duration::from_secs(3),
    }
  }
}

/// Result of reporting one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
  /// The backend accepted the report on attempt `attempts`.
  Sent { attempts: u32 },
  /// Every attempt failed.
  GaveUp { attempts: u32 },
}

/// Executes a conversion and reports it to the backend.
pub struct TransactionReporter<A: TeaFiApi, S: SwapExecutor> {
  api: Arc<A>,
  swap: Arc<S>,
  points: PointsChecker<A>,
  registry: Arc<TokenRegistry>,
  policy: RetryPolicy,
  metrics: Arc<BotMetrics>,
}

impl<A: TeaFiApi, S: SwapExecutor> TransactionReporter<A, S> {
  /// Create a new reporter.
  pub fn new(
    api: Arc<A>,
    swap: Arc<S>,
    registry: Arc<TokenRegistry>,
    policy: RetryPolicy,
    metrics: Arc<BotMetrics>,
  ) -> Self {
    let points = PointsChecker::new(Arc::clone(&api), Arc::clone(&metrics));
    Self {
      api,
      swap,
      points,
      registry,
      policy,
      metrics,
    }
  }

  /// Swap, then report with retries.
  ///
  /// Returns `None` only when the swap produced no transaction; once a
  /// transaction exists the wallet address is returned even if the
  /// report could not be delivered.
  pub async fn send_transaction(&self, gas_fee: &str) -> Option<WalletAddress> {
    let record = match self.initiate().await {
      Ok(record) => record,
      Err(e) => {
        error!(error = %e, "Failed to initiate transaction");
        self.metrics.swaps.with_label_values(&["failed"]).inc();
        return None;
      }
    };
    self.metrics.swaps.with_label_values(&["ok"]).inc();

    self.report(&record, gas_fee).await;
    Some(record.address)
  }

  async fn initiate(&self) -> Result<TransactionRecord, SwapError> {
    let record = self.swap.execute().await?;
    if record.tx_hash.is_empty() {
      return Err(SwapError::MissingHash);
    }
    Ok(record)
  }

  /// POST the report for `record`, retrying per the policy.
  pub async fn report(&self, record: &TransactionRecord, gas_fee: &str) -> ReportOutcome {
    let payload = ReportPayload::for_conversion(record, &self.registry, gas_fee);
    let max_attempts = self.policy.max_attempts();

    for attempt in 1..=max_attempts {
      info!(tx_hash = %payload.hash, attempt, "Sending transaction report to backend");

      match self.api.report_transaction(&payload).await {
        Ok(response) => {
          info!(tx_hash = %payload.hash, response = %response, "Transaction report sent");
          self.metrics.reports.with_label_values(&["sent"]).inc();
          self.points.check(&record.address).await;
          return ReportOutcome::Sent { attempts: attempt };
        }
        Err(e) => {
          error!(tx_hash = %payload.hash, attempt, error = %e, "Failed to send transaction report");
          self.metrics.reports.with_label_values(&["failed"]).inc();

          let left = max_attempts - attempt;
          if left > 0 {
            warn!(
              delay_ms = self.policy.delay.as_millis(),
              attempts_left = left,
              "Retrying transaction report"
            );
            sleep(self.policy.delay).await;
          }
        }
      }
    }

    error!(
      tx_hash = %payload.hash,
      attempts = max_attempts,
      "Max retries reached, giving up on transaction report"
    );
    self.metrics.reports.with_label_values(&["gave_up"]).inc();
    ReportOutcome::GaveUp {
      attempts: max_attempts,
    }
  }
}
