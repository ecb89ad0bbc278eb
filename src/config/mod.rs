//! Configuration Module - TOML-based Bot Configuration
//!
//! Loads and validates configuration from `config.toml`. Secrets (the
//! wallet private key) never live here: they come from the environment,
//! optionally seeded from a `.env` file. Every field has a default equal
//! to the production Tea-Fi setup, so an empty file is a valid config.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::domain::tokens::{TokenEntry, TokenRegistry};

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Bot identity, logging and loop timing.
  #[serde(default)]
  pub bot: BotConfig,
  /// Backend and RPC endpoints.
  #[serde(default)]
  pub api: ApiConfig,
  /// Token addresses and network identifiers.
  #[serde(default)]
  pub tokens: TokensConfig,
  /// Transaction report retry policy.
  #[serde(default)]
  pub report: ReportConfig,
  /// On-chain conversion parameters.
  #[serde(default)]
  pub swap: SwapConfig,
  /// Metrics and health endpoints.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

impl AppConfig {
  /// Build the immutable token registry shared by all components.
  pub fn token_registry(&self) -> TokenRegistry {
    TokenRegistry::new(
      TokenEntry {
        symbol: self.tokens.native_symbol.clone(),
        address: self.tokens.native_address.clone(),
      },
      TokenEntry {
        symbol: self.tokens.wrapped_symbol.clone(),
        address: self.tokens.wrapped_address.clone(),
      },
      self.tokens.network_id,
      self.tokens.tx_type,
    )
  }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// Human-readable console output.
  #[default]
  Pretty,
  /// One JSON object per line.
  Json,
}

/// Bot identity and loop timing.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Human-readable bot name.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Console or JSON logging.
  #[serde(default)]
  pub log_format: LogFormat,
  /// Pause after the banner before the first iteration.
  #[serde(default = "default_initial_delay")]
  pub initial_delay_secs: u64,
  /// Pause between iterations.
  #[serde(default = "default_loop_interval")]
  pub loop_interval_secs: u64,
  /// Clear the terminal at the start of every iteration.
  #[serde(default = "default_true")]
  pub clear_screen: bool,
}

impl BotConfig {
  pub fn initial_delay(&self) -> Duration {
    Duration::from_secs(self.initial_delay_secs)
  }

  pub fn loop_interval(&self) -> Duration {
    Duration::from_secs(self.loop_interval_secs)
  }
}

impl Default for BotConfig {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      log_format: LogFormat::default(),
      initial_delay_secs: default_initial_delay(),
      loop_interval_secs: default_loop_interval(),
      clear_screen: true,
    }
  }
}

/// Endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Tea-Fi backend base URL.
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Polygon RPC endpoint.
  #[serde(default = "default_rpc_url")]
  pub rpc_url: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      rpc_url: default_rpc_url(),
      timeout_seconds: default_timeout(),
    }
  }
}

/// Token addresses and network identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
  #[serde(default = "default_native_symbol")]
  pub native_symbol: String,
  /// Zero address stands for the native token.
  #[serde(default = "default_native_address")]
  pub native_address: String,
  #[serde(default = "default_wrapped_symbol")]
  pub wrapped_symbol: String,
  /// Wrapped token contract (WPOL).
  #[serde(default = "default_wrapped_address")]
  pub wrapped_address: String,
  /// Chain id (137 = Polygon mainnet).
  #[serde(default = "default_network_id")]
  pub network_id: u64,
  /// Backend transaction type (2 = Convert).
  #[serde(default = "default_tx_type")]
  pub tx_type: u32,
}

impl Default for TokensConfig {
  fn default() -> Self {
    Self {
      native_symbol: default_native_symbol(),
      native_address: default_native_address(),
      wrapped_symbol: default_wrapped_symbol(),
      wrapped_address: default_wrapped_address(),
      network_id: default_network_id(),
      tx_type: default_tx_type(),
    }
  }
}

/// Transaction report retry policy.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
  /// Retries after the first failed POST.
  #[serde(default = "default_max_retries")]
  pub max_retries: u32,
  /// Fixed delay between attempts (milliseconds).
  #[serde(default = "default_retry_delay")]
  pub retry_delay_ms: u64,
}

impl ReportConfig {
  pub fn retry_delay(&self) -> Duration {
    Duration::from_millis(self.retry_delay_ms)
  }
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self {
      max_retries: default_max_retries(),
      retry_delay_ms: default_retry_delay(),
    }
  }
}

/// On-chain conversion parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapConfig {
  /// Amount of POL wrapped per iteration (decimal string).
  #[serde(default = "default_swap_amount")]
  pub amount: String,
  /// POL left untouched for gas (decimal string).
  #[serde(default = "default_reserve")]
  pub min_balance_reserve: String,
  /// Confirmations to wait for before reporting.
  #[serde(default = "default_confirmations")]
  pub confirmations: u64,
}

impl Default for SwapConfig {
  fn default() -> Self {
    Self {
      amount: default_swap_amount(),
      min_balance_reserve: default_reserve(),
      confirmations: default_confirmations(),
    }
  }
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Serve `/live`, `/ready` and `/metrics`.
  #[serde(default)]
  pub enabled: bool,
  /// Metrics server bind address.
  #[serde(default = "default_metrics_addr")]
  pub bind_address: String,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: false,
      bind_address: default_metrics_addr(),
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "teafi-convert-bot".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_initial_delay() -> u64 {
  5
}

fn default_loop_interval() -> u64 {
  10
}

fn default_base_url() -> String {
  "https://api.tea-fi.com".to_string()
}

fn default_rpc_url() -> String {
  "https://polygon-rpc.com".to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_native_symbol() -> String {
  "POL".to_string()
}

fn default_native_address() -> String {
  "0x0000000000000000000000000000000000000000".to_string()
}

fn default_wrapped_symbol() -> String {
  "WPOL".to_string()
}

fn default_wrapped_address() -> String {
  "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270".to_string()
}

fn default_network_id() -> u64 {
  137
}

fn default_tx_type() -> u32 {
  2
}

fn default_max_retries() -> u32 {
  5
}

fn default_retry_delay() -> u64 {
  3_000
}

fn default_swap_amount() -> String {
  "0.0001".to_string()
}

fn default_reserve() -> String {
  "0.01".to_string()
}

fn default_confirmations() -> u64 {
  1
}

fn default_metrics_addr() -> String {
  "0.0.0.0:9090".to_string()
}
