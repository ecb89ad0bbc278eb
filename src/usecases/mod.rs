//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! bot's workflows. Each use case is a self-contained operation.
//!
//! Use cases:
//! - `GasQuoteFetcher`: Gas cost of a convert, never fails
//! - `TransactionReporter`: Swap, then report with bounded retries
//! - `PointsChecker`: Loyalty points lookup
//! - `CheckInManager`: Daily check-in by UTC day-of-month
//! - `ConvertLoop`: Sequences the above forever

pub mod check_in;
pub mod convert_loop;
pub mod gas_quote;
pub mod points;
pub mod reporter;

pub use check_in::{CheckInManager, CheckInOutcome};
pub use convert_loop::{ConvertLoop, IterationSummary, LoopTiming};
pub use gas_quote::GasQuoteFetcher;
pub use points::PointsChecker;
pub use reporter::{ReportOutcome, RetryPolicy, TransactionReporter};
