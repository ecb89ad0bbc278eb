//! Tea-Fi API Request/Response Types
//!
//! Wire shapes of the backend JSON. The backend is loose about number
//! encoding (the same field arrives as a string or a number depending on
//! the endpoint version), so numeric fields are captured as raw JSON and
//! normalised when converted to port types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ports::backend::{CheckInStatus, GasQuote, GasQuoteQuery, PointsBalance};

/// Query string of `GET /transaction/gas-quote`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasQuoteParams {
  pub chain: u64,
  pub tx_type: u32,
  pub gas_payment_token: String,
  pub needed_gas_permits: u32,
}

impl From<&GasQuoteQuery> for GasQuoteParams {
  fn from(query: &GasQuoteQuery) -> Self {
    Self {
      chain: query.chain,
      tx_type: query.tx_type,
      gas_payment_token: query.gas_payment_token.clone(),
      needed_gas_permits: query.needed_gas_permits,
    }
  }
}

/// Query string of the check-in endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AddressParam<'a> {
  pub address: &'a str,
}

/// Response of the gas-quote endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasQuoteResponse {
  #[serde(default)]
  pub gas_in_native_token: Option<Value>,
}

impl From<GasQuoteResponse> for GasQuote {
  fn from(resp: GasQuoteResponse) -> Self {
    Self {
      gas_in_native_token: resp.gas_in_native_token.as_ref().and_then(json_to_text),
    }
  }
}

/// Response of the points endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
  #[serde(default)]
  pub points_amount: Option<Value>,
}

impl From<PointsResponse> for PointsBalance {
  fn from(resp: PointsResponse) -> Self {
    let points_amount = match resp.points_amount {
      Some(Value::Number(n)) => n.as_f64(),
      Some(Value::String(s)) => s.trim().parse().ok(),
      _ => None,
    };
    Self { points_amount }
  }
}

/// Response of the check-in status endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStatusResponse {
  #[serde(default)]
  pub last_check_in: Option<Value>,
}

impl From<CheckInStatusResponse> for CheckInStatus {
  fn from(resp: CheckInStatusResponse) -> Self {
    Self {
      last_check_in: resp.last_check_in.as_ref().and_then(json_to_text),
    }
  }
}

/// Render a scalar JSON value as text; null, empty strings and
/// containers yield `None`.
fn json_to_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// Parse an acknowledgement body leniently: empty → `null`, non-JSON →
/// the raw text as a JSON string.
pub fn ack_body(text: &str) -> Value {
  if text.trim().is_empty() {
    return Value::Null;
  }
  serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
