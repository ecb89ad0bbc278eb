//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;
use crate::domain::units::{NATIVE_DECIMALS, parse_units};

/// Env var that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "BOT_CONFIG";

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Config path from `BOT_CONFIG`, falling back to `config.toml`.
pub fn config_path_from_env() -> String {
  std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    base_url = %config.api.base_url,
    network_id = config.tokens.network_id,
    swap_amount = %config.swap.amount,
    max_retries = config.report.max_retries,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty endpoint URLs
/// - Parseable token addresses
/// - Positive loop interval and swap amount
/// - A sane retry bound
fn validate_config(config: &AppConfig) -> Result<()> {
  // API validation
  anyhow::ensure!(
    !config.api.base_url.is_empty(),
    "Backend base_url must not be empty"
  );
  anyhow::ensure!(
    !config.api.rpc_url.is_empty(),
    "RPC URL must not be empty"
  );
  anyhow::ensure!(
    config.api.timeout_seconds > 0,
    "timeout_seconds must be positive"
  );

  // Token validation
  for (name, addr) in [
    ("native_address", &config.tokens.native_address),
    ("wrapped_address", &config.tokens.wrapped_address),
  ] {
    addr
      .parse::<Address>()
      .with_context(|| format!("tokens.{name} is not a valid address: {addr}"))?;
  }
  anyhow::ensure!(
    !config.tokens.native_address.eq_ignore_ascii_case(&config.tokens.wrapped_address),
    "Native and wrapped token addresses must differ"
  );

  // Loop validation
  anyhow::ensure!(
    config.bot.loop_interval_secs > 0,
    "loop_interval_secs must be positive"
  );

  // Report validation
  anyhow::ensure!(
    config.report.max_retries <= 20,
    "report.max_retries must be at most 20, got {}",
    config.report.max_retries
  );

  // Swap validation
  let amount = parse_units(&config.swap.amount, NATIVE_DECIMALS)
    .with_context(|| format!("Invalid swap.amount: {}", config.swap.amount))?;
  anyhow::ensure!(amount > 0, "swap.amount must be positive");
  parse_units(&config.swap.min_balance_reserve, NATIVE_DECIMALS).with_context(|| {
    format!(
      "Invalid swap.min_balance_reserve: {}",
      config.swap.min_balance_reserve
    )
  })?;

  Ok(())
}
