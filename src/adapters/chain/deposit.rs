//! WPOL Deposit Executor - Native → Wrapped Conversion
//!
//! Implements the `SwapExecutor` port by calling `deposit()` on the
//! wrapped-token contract with `value = amount`, which mints the same
//! amount of WPOL to the sender. Waits for the receipt before returning
//! so the backend is only told about mined transactions.

use std::sync::Arc;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256, keccak256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::provider::PolygonProvider;
use crate::domain::transaction::TransactionRecord;
use crate::ports::swap_executor::{SwapError, SwapExecutor};

/// Calldata of `deposit()`: the bare 4-byte selector.
pub fn deposit_calldata() -> Bytes {
    Bytes::copy_from_slice(&keccak256(b"deposit()")[..4])
}

/// Native amount plus gas reserve the wallet must hold, if it fits.
fn required_balance(amount: u128, reserve: u128) -> Option<U256> {
    amount.checked_add(reserve).map(U256::from)
}

/// Signs and submits WPOL deposits.
pub struct WrapDepositExecutor {
    /// Shared signing provider.
    provider: Arc<PolygonProvider>,
    /// Wrapped token contract.
    wrapped: Address,
    /// Amount wrapped per call (wei).
    amount: u128,
    /// Native balance kept for gas (wei).
    reserve: u128,
    /// Confirmations awaited before returning.
    confirmations: u64,
}

impl WrapDepositExecutor {
    /// Create the executor and check the wrapped contract exists on-chain.
    ///
    /// Prevents a misconfigured address from silently burning POL into
    /// an EOA at runtime.
    #[instrument(skip(provider))]
    pub async fn new(
        provider: Arc<PolygonProvider>,
        wrapped: Address,
        amount: u128,
        reserve: u128,
        confirmations: u64,
    ) -> Result<Self> {
        let code = provider
            .inner()
            .get_code_at(wrapped)
            .await
            .context("Failed to query wrapped token code")?;

        if code.is_empty() {
            bail!("Wrapped token at {wrapped} has no deployed code, check config.toml");
        }
        info!(contract = %wrapped, "Wrapped token validated on-chain");

        Ok(Self {
            provider,
            wrapped,
            amount,
            reserve,
            confirmations: confirmations.max(1),
        })
    }

    async fn ensure_balance(&self) -> Result<(), SwapError> {
        let wallet = self.provider.wallet();
        let balance = self
            .provider
            .inner()
            .get_balance(wallet)
            .await
            .map_err(|e| SwapError::Rpc(e.to_string()))?;

        let required = required_balance(self.amount, self.reserve)
            .ok_or_else(|| SwapError::Rpc("amount plus reserve overflows".to_string()))?;

        if balance < required {
            return Err(SwapError::InsufficientBalance {
                balance: balance.to_string(),
                required: required.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SwapExecutor for WrapDepositExecutor {
    #[instrument(skip(self), fields(amount = self.amount))]
    async fn execute(&self) -> Result<TransactionRecord, SwapError> {
        self.ensure_balance().await?;

        let wallet = self.provider.wallet();
        let tx = TransactionRequest::default()
            .with_from(wallet)
            .with_to(self.wrapped)
            .with_value(U256::from(self.amount))
            .with_input(deposit_calldata());

        let pending = self
            .provider
            .inner()
            .send_transaction(tx)
            .await
            .map_err(|e| SwapError::Rpc(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, "Deposit submitted, awaiting receipt");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| SwapError::Rpc(e.to_string()))?;

        let hash = receipt.transaction_hash.to_string();
        if !receipt.status() {
            warn!(tx_hash = %hash, "Deposit reverted");
            return Err(SwapError::Reverted(hash));
        }

        info!(
            tx_hash = %hash,
            block = receipt.block_number,
            gas_used = receipt.gas_used,
            "Deposit mined"
        );

        Ok(TransactionRecord {
            tx_hash: hash,
            address: wallet.to_string(),
            amount: self.amount.to_string(),
        })
    }

    fn wallet_address(&self) -> String {
        self.provider.wallet().to_string()
    }
}
