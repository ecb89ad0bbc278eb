//! Points Use Case - Loyalty Points Lookup
//!
//! Purely observational: logs the wallet's points total and updates the
//! points gauge. Errors are logged and swallowed.

use std::sync::Arc;

use tracing::{error, info};

use crate::adapters::metrics::BotMetrics;
use crate::ports::backend::TeaFiApi;

/// Log line for a points total; a missing total reads as 0.
pub fn points_message(points: Option<f64>) -> String {
  format!("Total Points: {}", points.unwrap_or(0.0))
}

/// Looks up accumulated loyalty points.
pub struct PointsChecker<A: TeaFiApi> {
  api: Arc<A>,
  metrics: Arc<BotMetrics>,
}

impl<A: TeaFiApi> PointsChecker<A> {
  /// Create a new points checker.
  pub fn new(api: Arc<A>, metrics: Arc<BotMetrics>) -> Self {
    Self { api, metrics }
  }

  /// Fetch and log the points total; `None` if the lookup failed.
  pub async fn check(&self, address: &str) -> Option<f64> {
    info!(address, "Checking current points");

    match self.api.points(address).await {
      Ok(balance) => {
        let total = balance.points_amount.unwrap_or(0.0);
        self.metrics.points.set(total);
        info!(address, points = total, "{}", points_message(balance.points_amount));
        Some(total)
      }
      Err(e) => {
        error!(address, error = %e, "Error checking points");
        None
      }
    }
  }
}
