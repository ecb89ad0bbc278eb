//! Convert transaction types.
//!
//! A [`TransactionRecord`] is what the swap executor hands back after a
//! deposit lands on-chain; a [`ReportPayload`] is the flat body the
//! backend expects on `POST /transaction`. Neither outlives a single
//! loop iteration.

use serde::{Deserialize, Serialize};

use super::tokens::TokenRegistry;

/// Hex wallet address (`0x`-prefixed).
pub type WalletAddress = String;

/// Hex transaction hash (`0x`-prefixed).
pub type TxHash = String;

/// Outcome of one native → wrapped conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Hash of the mined deposit transaction.
    pub tx_hash: TxHash,
    /// Wallet that signed the deposit.
    pub address: WalletAddress,
    /// Converted amount in base units (wei), as a decimal string.
    pub amount: String,
}

/// Body of the backend transaction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub hash: TxHash,
    pub blockchain_id: u64,
    #[serde(rename = "type")]
    pub tx_type: u32,
    pub wallet_address: WalletAddress,
    pub from_token_address: String,
    pub to_token_address: String,
    pub from_token_symbol: String,
    pub to_token_symbol: String,
    pub from_amount: String,
    pub to_amount: String,
    pub gas_fee_token_address: String,
    pub gas_fee_token_symbol: String,
    pub gas_fee_amount: String,
}

impl ReportPayload {
    /// Assemble the report for a native → wrapped conversion.
    ///
    /// Conversion is 1:1, so `fromAmount == toAmount`. Gas is always paid
    /// in the native token.
    pub fn for_conversion(record: &TransactionRecord, registry: &TokenRegistry, gas_fee: &str) -> Self {
        let native = registry.native();
        let wrapped = registry.wrapped();
        let from_symbol = registry.symbol_of(&native.address).to_string();
        let to_symbol = registry.symbol_of(&wrapped.address).to_string();

        Self {
            hash: record.tx_hash.clone(),
            blockchain_id: registry.network_id(),
            tx_type: registry.tx_type(),
            wallet_address: record.address.clone(),
            from_token_address: native.address.clone(),
            to_token_address: wrapped.address.clone(),
            gas_fee_token_symbol: from_symbol.clone(),
            from_token_symbol: from_symbol,
            to_token_symbol: to_symbol,
            from_amount: record.amount.clone(),
            to_amount: record.amount.clone(),
            gas_fee_token_address: native.address.clone(),
            gas_fee_amount: gas_fee.to_string(),
        }
    }
}
