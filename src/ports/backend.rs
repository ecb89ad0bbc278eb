//! Backend API Port - Tea-Fi REST Interface
//!
//! Defines the trait for every backend call the bot makes: gas quotes,
//! transaction reports, points lookups and the daily check-in. The
//! reqwest adapter implements it; tests substitute mockall doubles.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transaction::ReportPayload;

/// Failure of a single backend request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
  /// The request never produced a response (DNS, TLS, timeout, reset).
  #[error("transport error: {0}")]
  Transport(String),
  /// The backend answered with a non-success status.
  #[error("HTTP {status}: {body}")]
  Status {
    /// HTTP status code.
    status: u16,
    /// Raw response body, kept for the log line.
    body: String,
  },
  /// The response body was not the JSON shape we expected.
  #[error("invalid response body: {0}")]
  Decode(String),
}

/// Query parameters of the gas-quote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasQuoteQuery {
  /// Chain id.
  pub chain: u64,
  /// Backend transaction-type code.
  pub tx_type: u32,
  /// Token the gas is paid in.
  pub gas_payment_token: String,
  /// Number of gas permits to quote for (always 0 for a convert).
  pub needed_gas_permits: u32,
}

/// Gas quote in native base units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GasQuote {
  /// `gasInNativeToken`, absent when the backend omits it.
  pub gas_in_native_token: Option<String>,
}

/// Loyalty points of a wallet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsBalance {
  /// `pointsAmount`, absent for wallets without points.
  pub points_amount: Option<f64>,
}

/// Last recorded check-in of a wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInStatus {
  /// Raw `lastCheckIn` value, absent if the wallet never checked in.
  pub last_check_in: Option<String>,
}

/// Trait for Tea-Fi backend interactions.
///
/// Every method is a single request: retry policy belongs to the
/// caller. Acknowledgement bodies are returned as raw JSON because the
/// bot only logs them.
#[async_trait]
pub trait TeaFiApi: Send + Sync + 'static {
  /// `GET /transaction/gas-quote`.
  async fn gas_quote(&self, query: &GasQuoteQuery) -> Result<GasQuote, ApiError>;

  /// `POST /transaction`.
  async fn report_transaction(
    &self,
    payload: &ReportPayload,
  ) -> Result<serde_json::Value, ApiError>;

  /// `GET /points/{address}`.
  async fn points(&self, address: &str) -> Result<PointsBalance, ApiError>;

  /// `GET /wallet/check-in/current?address=`.
  async fn check_in_status(&self, address: &str) -> Result<CheckInStatus, ApiError>;

  /// `POST /wallet/check-in?address=`.
  async fn check_in(&self, address: &str) -> Result<serde_json::Value, ApiError>;
}
