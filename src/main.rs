//! Tea-Fi Convert Bot - Entry Point
//!
//! Wires configuration, logging, the backend client and the signing
//! Polygon provider into the convert loop. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load `.env` + config.toml (path from BOT_CONFIG) + validate
//! 2. Init tracing (pretty or JSON)
//! 3. Load wallet signer from PRIVATE_KEY
//! 4. Connect signing provider, validate chain id
//! 5. Create WrapDepositExecutor (implements SwapExecutor port)
//! 6. Create TeaFiClient (implements TeaFiApi port)
//! 7. Spawn health/metrics server if enabled
//! 8. Spawn ConvertLoop
//! 9. Wait for SIGINT → broadcast shutdown → wait for loop

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use teafi_convert_bot::adapters::api::{TeaFiClient, TeaFiClientConfig};
use teafi_convert_bot::adapters::chain::{PolygonProvider, WrapDepositExecutor, wallet};
use teafi_convert_bot::adapters::console;
use teafi_convert_bot::adapters::metrics::{BotMetrics, HealthServer, HealthState};
use teafi_convert_bot::config::loader;
use teafi_convert_bot::domain::units::{NATIVE_DECIMALS, parse_units};
use teafi_convert_bot::ports::swap_executor::SwapExecutor;
use teafi_convert_bot::usecases::{
  CheckInManager, ConvertLoop, GasQuoteFetcher, LoopTiming, RetryPolicy, TransactionReporter,
};

#[tokio::main]
async fn main() -> Result<()> {
  // ── 1. Load .env and config.toml ────────────────────────
  // A missing .env is fine: the key may come from the real environment.
  dotenv::dotenv().ok();
  let config = loader::load_config(&loader::config_path_from_env())
    .context("Failed to load configuration")?;

  // ── 2. Initialize logging ───────────────────────────────
  console::init_tracing(&config.bot)?;
  info!("{}", console::BANNER);
  info!(
    name = %config.bot.name,
    version = env!("CARGO_PKG_VERSION"),
    base_url = %config.api.base_url,
    "Starting Tea-Fi convert bot"
  );

  // ── 3. Load wallet signer ───────────────────────────────
  let signer = wallet::signer_from_env().context("Failed to load wallet")?;

  // ── 4. Connect signing Polygon provider ─────────────────
  let provider = Arc::new(
    PolygonProvider::connect(&config.api.rpc_url, config.tokens.network_id, signer)
      .await
      .context("Failed to connect to Polygon RPC")?,
  );

  // ── 5. Create deposit executor (SwapExecutor port) ──────
  let wrapped: Address = config
    .tokens
    .wrapped_address
    .parse()
    .context("Invalid wrapped token address")?;
  let amount = parse_units(&config.swap.amount, NATIVE_DECIMALS)?;
  let reserve = parse_units(&config.swap.min_balance_reserve, NATIVE_DECIMALS)?;
  let executor = Arc::new(
    WrapDepositExecutor::new(
      Arc::clone(&provider),
      wrapped,
      amount,
      reserve,
      config.swap.confirmations,
    )
    .await
    .context("Failed to create deposit executor")?,
  );
  info!(wallet = %executor.wallet_address(), amount = %config.swap.amount, "Deposit executor ready");

  // ── 6. Create backend client (TeaFiApi port) ────────────
  let api = Arc::new(
    TeaFiClient::new(TeaFiClientConfig {
      base_url: config.api.base_url.clone(),
      timeout: Duration::from_secs(config.api.timeout_seconds),
    })
    .context("Failed to create backend client")?,
  );

  // ── 7. Shutdown channel + optional health/metrics server ─
  let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
  let metrics = Arc::new(BotMetrics::new().context("Failed to register metrics")?);
  let health = HealthState::new(Arc::clone(&metrics));

  let health_handle = if config.metrics.enabled {
    let server = HealthServer::new(health.clone(), config.metrics.bind_address.clone());
    let rx = shutdown_tx.subscribe();
    Some(tokio::spawn(async move {
      if let Err(e) = server.run(rx).await {
        error!(error = %e, "Health server failed");
      }
    }))
  } else {
    None
  };

  // ── 8. Spawn the convert loop ───────────────────────────
  let registry = Arc::new(config.token_registry());
  let reporter = TransactionReporter::new(
    Arc::clone(&api),
    Arc::clone(&executor),
    Arc::clone(&registry),
    RetryPolicy {
      max_retries: config.report.max_retries,
      delay: config.report.retry_delay(),
    },
    Arc::clone(&metrics),
  );
  let mut convert_loop = ConvertLoop::new(
    GasQuoteFetcher::new(Arc::clone(&api), Arc::clone(&registry)),
    reporter,
    CheckInManager::new(Arc::clone(&api), Arc::clone(&metrics)),
    LoopTiming {
      initial_delay: config.bot.initial_delay(),
      interval: config.bot.loop_interval(),
    },
    Arc::clone(&metrics),
  );
  if config.bot.clear_screen {
    convert_loop = convert_loop.with_iteration_hook(console::clear_screen);
  }

  let loop_handle = tokio::spawn(convert_loop.run(shutdown_tx.subscribe()));

  // ── 9. Wait for SIGINT ──────────────────────────────────
  signal::ctrl_c()
    .await
    .context("Failed to listen for Ctrl+C")?;
  info!("SIGINT received, shutting down");

  health.mark_stopping();
  let _ = shutdown_tx.send(());

  match tokio::time::timeout(Duration::from_secs(10), loop_handle).await {
    Ok(Ok(iterations)) => info!(iterations, "Convert loop stopped"),
    Ok(Err(e)) => error!(error = %e, "Convert loop task panicked"),
    Err(_) => error!("Convert loop did not stop within 10s"),
  }

  if let Some(handle) = health_handle {
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
  }

  info!("Shutdown complete");
  Ok(())
}
