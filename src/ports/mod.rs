//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `TeaFiApi`: Backend REST calls (gas quote, report, points, check-in)
//! - `SwapExecutor`: On-chain native → wrapped conversion

pub mod backend;
pub mod swap_executor;

pub use backend::{ApiError, CheckInStatus, GasQuote, GasQuoteQuery, PointsBalance, TeaFiApi};
pub use swap_executor::{SwapError, SwapExecutor};
