//! Token registry - immutable network and token constants.
//!
//! Maps the symbolic names used in transaction reports (native and
//! wrapped token) to their on-chain addresses, together with the
//! network id and the backend's transaction-type code. Built once at
//! startup from config and shared read-only for the process lifetime.

use serde::{Deserialize, Serialize};

/// Symbol reported for addresses the registry does not know.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// A token symbol paired with its contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// Display symbol (e.g. `POL`).
    pub symbol: String,
    /// Hex address. The zero address denotes the native token.
    pub address: String,
}

/// Immutable set of token addresses and network identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRegistry {
    native: TokenEntry,
    wrapped: TokenEntry,
    network_id: u64,
    tx_type: u32,
}

impl TokenRegistry {
    /// Build a registry from its parts.
    pub fn new(native: TokenEntry, wrapped: TokenEntry, network_id: u64, tx_type: u32) -> Self {
        Self {
            native,
            wrapped,
            network_id,
            tx_type,
        }
    }

    /// Polygon mainnet POL/WPOL with the "Convert" transaction type.
    pub fn polygon_mainnet() -> Self {
        Self::new(
            TokenEntry {
                symbol: "POL".to_string(),
                address: "0x0000000000000000000000000000000000000000".to_string(),
            },
            TokenEntry {
                symbol: "WPOL".to_string(),
                address: "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270".to_string(),
            },
            137,
            2,
        )
    }

    pub fn native(&self) -> &TokenEntry {
        &self.native
    }

    pub fn wrapped(&self) -> &TokenEntry {
        &self.wrapped
    }

    /// Chain id reported as `blockchainId` / `chain`.
    pub fn network_id(&self) -> u64 {
        self.network_id
    }

    /// Backend transaction-type code (2 = Convert).
    pub fn tx_type(&self) -> u32 {
        self.tx_type
    }

    /// Resolve an address to its symbol, or [`UNKNOWN_SYMBOL`].
    ///
    /// Hex comparison is case-insensitive so checksummed and lowercase
    /// forms of the same address resolve identically.
    pub fn symbol_of(&self, address: &str) -> &str {
        [&self.native, &self.wrapped]
            .into_iter()
            .find(|entry| entry.address.eq_ignore_ascii_case(address))
            .map_or(UNKNOWN_SYMBOL, |entry| entry.symbol.as_str())
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::polygon_mainnet()
    }
}
