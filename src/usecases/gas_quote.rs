//! Gas Quote Use Case - Native Gas Cost of a Conversion
//!
//! Asks the backend what a convert transaction costs in native token and
//! logs it in whole-token units. Failures never escape: the report
//! simply carries a zero gas fee.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::tokens::TokenRegistry;
use crate::domain::units::{NATIVE_DECIMALS, UnitsError, format_units};
use crate::ports::backend::{GasQuoteQuery, TeaFiApi};

/// Gas fee used whenever no quote is available.
pub const ZERO_GAS: &str = "0";

/// Human-readable gas amount, e.g. `1.0 POL`.
pub fn gas_display(raw: &str, symbol: &str) -> Result<String, UnitsError> {
  Ok(format!("{} {symbol}", format_units(raw, NATIVE_DECIMALS)?))
}

/// Fetches gas quotes for the convert transaction type.
pub struct GasQuoteFetcher<A: TeaFiApi> {
  api: Arc<A>,
  registry: Arc<TokenRegistry>,
}

impl<A: TeaFiApi> GasQuoteFetcher<A> {
  /// Create a new gas quote fetcher.
  pub fn new(api: Arc<A>, registry: Arc<TokenRegistry>) -> Self {
    Self { api, registry }
  }

  /// Query parameters for a convert paid in native token.
  pub fn query(&self) -> GasQuoteQuery {
    GasQuoteQuery {
      chain: self.registry.network_id(),
      tx_type: self.registry.tx_type(),
      gas_payment_token: self.registry.native().address.clone(),
      needed_gas_permits: 0,
    }
  }

  /// Fetch the gas quote in native base units.
  ///
  /// Returns `"0"` on any failure, including an unparseable amount.
  pub async fn fetch(&self) -> String {
    let quote = match self.api.gas_quote(&self.query()).await {
      Ok(quote) => quote,
      Err(e) => {
        error!(error = %e, "Error fetching gas quote");
        return ZERO_GAS.to_string();
      }
    };

    let raw = quote
      .gas_in_native_token
      .unwrap_or_else(|| ZERO_GAS.to_string());

    match gas_display(&raw, &self.registry.native().symbol) {
      Ok(gas_text) => {
        info!(gas_wei = %raw, "Gas in native token: {gas_text}");
        raw
      }
      Err(e) => {
        error!(error = %e, gas_wei = %raw, "Error fetching gas quote");
        ZERO_GAS.to_string()
      }
    }
  }
}
