//! Health and Metrics Server - Liveness, Readiness and /metrics
//!
//! Exposes `/live`, `/ready` and `/metrics` via axum 0.7. Readiness
//! flips to 503 once shutdown begins so orchestrators stop probing a
//! bot that is winding down.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use super::prometheus::BotMetrics;

/// State shared with the HTTP handlers.
#[derive(Clone)]
pub struct HealthState {
    /// Cleared when shutdown starts.
    pub running: Arc<AtomicBool>,
    /// Metrics rendered at `/metrics`.
    pub metrics: Arc<BotMetrics>,
}

impl HealthState {
    /// Create a new health state (running by default).
    pub fn new(metrics: Arc<BotMetrics>) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            metrics,
        }
    }

    /// Check if the bot is still looping.
    pub fn is_ready(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Mark the bot as shutting down.
    pub fn mark_stopping(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// Build the axum router serving all probe endpoints.
pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Axum-based health and metrics HTTP server.
pub struct HealthServer {
    state: HealthState,
    bind_address: String,
}

impl HealthServer {
    /// Create a new health server.
    pub fn new(state: HealthState, bind_address: String) -> Self {
        Self {
            state,
            bind_address,
        }
    }

    /// Serve until the shutdown signal fires.
    #[instrument(skip(self, shutdown_rx), fields(address = %self.bind_address))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
        info!(address = %self.bind_address, "Health server started");

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: 503 once shutdown has started.
async fn readiness(State(state): State<HealthState>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

async fn metrics(State(state): State<HealthState>) -> impl IntoResponse {
    state.metrics.render()
}
