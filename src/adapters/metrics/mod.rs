//! Metrics and Monitoring Adapters
//!
//! Prometheus counters for the bot loop plus an optional axum server
//! exposing `/live`, `/ready` and `/metrics`.

pub mod health;
pub mod prometheus;

pub use health::{HealthServer, HealthState};
pub use self::prometheus::BotMetrics;
