//! Polygon RPC Provider - alloy-rs 0.9 Connection Management
//!
//! Manages the signing connection to the Polygon PoS chain via alloy-rs.
//! The provider carries the recommended fillers (nonce, gas, chain id)
//! plus a wallet filler, so transaction requests only need `to`, `from`,
//! `value` and `input`. Validates the chain id at startup.

use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use tracing::{info, instrument};

/// Shared, signing Polygon RPC provider.
///
/// Uses `dyn Provider` for type erasure because the filler stack
/// produces a deeply-nested generic type.
pub struct PolygonProvider {
    /// The alloy provider with wallet filler (type-erased).
    provider: Arc<dyn Provider + Send + Sync>,
    /// Address of the signing wallet.
    wallet: Address,
}

impl PolygonProvider {
    /// Connect to the RPC endpoint and validate the chain id.
    #[instrument(skip(rpc_url, signer))]
    pub async fn connect(
        rpc_url: &str,
        expected_chain_id: u64,
        signer: PrivateKeySigner,
    ) -> Result<Self> {
        let wallet = signer.address();

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_builtin(rpc_url)
            .await
            .context("Failed to connect to RPC")?;

        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(provider);

        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to query chain ID")?;

        anyhow::ensure!(
            chain_id == expected_chain_id,
            "Expected chain_id={expected_chain_id}, RPC reports {chain_id}"
        );

        info!(chain_id, wallet = %wallet, "Connected to Polygon RPC");

        Ok(Self { provider, wallet })
    }

    /// Get a shared reference to the alloy provider (type-erased).
    pub fn inner(&self) -> Arc<dyn Provider + Send + Sync> {
        Arc::clone(&self.provider)
    }

    /// Address transactions are signed with.
    pub fn wallet(&self) -> Address {
        self.wallet
    }
}
