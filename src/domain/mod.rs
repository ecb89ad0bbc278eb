//! Domain layer - Core types and rules of the convert bot.
//!
//! Pure logic only: token registry, transaction report shape, unit
//! formatting and the daily check-in rule. No I/O happens here
//! (hexagonal architecture inner ring).

pub mod check_in;
pub mod tokens;
pub mod transaction;
pub mod units;

pub use check_in::{needs_check_in, parse_check_in_timestamp};
pub use tokens::{TokenEntry, TokenRegistry, UNKNOWN_SYMBOL};
pub use transaction::{ReportPayload, TransactionRecord, TxHash, WalletAddress};
pub use units::{NATIVE_DECIMALS, UnitsError, format_units, parse_units};
