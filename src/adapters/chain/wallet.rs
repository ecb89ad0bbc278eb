//! Wallet Loading - Private Key Signer from Environment
//!
//! The signing key is read from `PRIVATE_KEY` (a `.env` file is loaded
//! into the environment at startup). The key is never logged; only the
//! derived address is.

use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use tracing::info;

/// Environment variable holding the hex private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Parse a hex private key (with or without `0x`).
pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner> {
    let key_hex = private_key_hex.trim();
    let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

    let signer: PrivateKeySigner = key_hex
        .parse()
        .context("Invalid private key format")?;

    info!(address = %signer.address(), "Wallet loaded");
    Ok(signer)
}

/// Load the signer from `PRIVATE_KEY`.
pub fn signer_from_env() -> Result<PrivateKeySigner> {
    let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
        .with_context(|| format!("{PRIVATE_KEY_ENV_VAR} not set"))?;
    signer_from_hex(&private_key)
}
