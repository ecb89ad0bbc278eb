//! Chain Adapters - Polygon Blockchain Interaction Layer
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - Signing RPC provider with chain id validation
//! - Private key loading from the environment
//! - WPOL `deposit()` conversions (the `SwapExecutor` port)

pub mod deposit;
pub mod provider;
pub mod wallet;

pub use deposit::WrapDepositExecutor;
pub use provider::PolygonProvider;
