//! Swap Executor Port - On-chain Conversion Interface
//!
//! Defines the trait for producing one native → wrapped conversion on
//! chain. The alloy adapter signs and submits a WPOL `deposit()`; the
//! orchestration layer only sees the resulting [`TransactionRecord`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transaction::{TransactionRecord, TxHash};

/// Why a conversion could not be produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SwapError {
  /// Balance lookup, submission or receipt polling failed.
  #[error("RPC error: {0}")]
  Rpc(String),
  /// The wallet cannot cover amount plus gas reserve.
  #[error("insufficient balance: have {balance} wei, need {required} wei")]
  InsufficientBalance {
    /// Current native balance (wei).
    balance: String,
    /// Amount plus reserve (wei).
    required: String,
  },
  /// The transaction was mined but reverted.
  #[error("transaction {0} reverted")]
  Reverted(TxHash),
  /// The executor produced no transaction hash.
  #[error("transaction hash is undefined")]
  MissingHash,
}

/// Trait for executing a single conversion.
#[async_trait]
pub trait SwapExecutor: Send + Sync + 'static {
  /// Submit one conversion and wait until it is mined.
  async fn execute(&self) -> Result<TransactionRecord, SwapError>;

  /// Address of the signing wallet.
  fn wallet_address(&self) -> String;
}
