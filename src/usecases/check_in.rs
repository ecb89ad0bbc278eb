//! Check-in Use Case - Daily Loyalty Check-in
//!
//! Reads the wallet's last check-in, decides with the day-of-month rule
//! from `domain::check_in` whether a new one is due, and issues it.
//! Nothing here can fail the loop: every error is logged and treated as
//! "no check-in this round".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::adapters::metrics::BotMetrics;
use crate::domain::check_in::{needs_check_in, parse_check_in_timestamp};
use crate::ports::backend::TeaFiApi;

/// What a check-in round did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
  /// A check-in POST succeeded.
  CheckedIn,
  /// The wallet already checked in today.
  AlreadyCheckedIn,
  /// A check-in was due but the POST failed.
  Failed,
}

/// Manages the daily check-in of one wallet.
pub struct CheckInManager<A: TeaFiApi> {
  api: Arc<A>,
  metrics: Arc<BotMetrics>,
}

impl<A: TeaFiApi> CheckInManager<A> {
  /// Create a new check-in manager.
  pub fn new(api: Arc<A>, metrics: Arc<BotMetrics>) -> Self {
    Self { api, metrics }
  }

  /// Raw `lastCheckIn` of the wallet; `None` on error or if never set.
  pub async fn check_in_status(&self, address: &str) -> Option<String> {
    match self.api.check_in_status(address).await {
      Ok(status) => {
        match status.last_check_in.as_deref() {
          Some(last) => info!(address, last_check_in = last, "Last check-in: {last}"),
          None => info!(address, "Last check-in: never checked in"),
        }
        status.last_check_in
      }
      Err(e) => {
        error!(address, error = %e, "Failed to fetch latest check-in");
        None
      }
    }
  }

  /// Issue the check-in POST. Returns whether it succeeded.
  pub async fn check_in(&self, address: &str) -> bool {
    match self.api.check_in(address).await {
      Ok(response) => {
        info!(address, response = %response, "Check-in successful");
        true
      }
      Err(e) => {
        error!(address, error = %e, "Failed to check in");
        false
      }
    }
  }

  /// Check in if the UTC day-of-month changed since the last check-in.
  pub async fn check_in_user(&self, address: &str) -> CheckInOutcome {
    self.check_in_user_at(address, Utc::now()).await
  }

  /// [`Self::check_in_user`] against an explicit "now".
  pub async fn check_in_user_at(&self, address: &str, now: DateTime<Utc>) -> CheckInOutcome {
    info!(address, "Checking latest check-in");

    let last = self
      .check_in_status(address)
      .await
      .as_deref()
      .and_then(parse_check_in_timestamp);

    if !needs_check_in(last, now) {
      info!(address, "Already checked in today");
      self.metrics.check_ins.with_label_values(&["skipped"]).inc();
      return CheckInOutcome::AlreadyCheckedIn;
    }

    info!(address, "Checking in");
    if self.check_in(address).await {
      self.metrics.check_ins.with_label_values(&["issued"]).inc();
      CheckInOutcome::CheckedIn
    } else {
      self.metrics.check_ins.with_label_values(&["failed"]).inc();
      CheckInOutcome::Failed
    }
  }
}
