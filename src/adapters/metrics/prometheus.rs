//! Prometheus Metrics Registry - Bot Observability
//!
//! Counts loop iterations, swaps, report attempts and check-ins, and
//! tracks the last observed points total. All metrics follow the
//! naming convention `teafi_bot_*`.

use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Centralized Prometheus metrics for the convert bot.
pub struct BotMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Completed loop iterations.
    pub iterations: IntCounter,
    /// Swap outcomes (`ok`, `failed`).
    pub swaps: IntCounterVec,
    /// Report POST outcomes (`sent`, `failed`, `gave_up`).
    pub reports: IntCounterVec,
    /// Check-in outcomes (`issued`, `skipped`, `failed`).
    pub check_ins: IntCounterVec,
    /// Last points total reported by the backend.
    pub points: Gauge,
}

impl BotMetrics {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let iterations = IntCounter::new(
            "teafi_bot_iterations_total",
            "Main loop iterations started",
        )?;

        let swaps = IntCounterVec::new(
            Opts::new("teafi_bot_swaps_total", "Native to wrapped conversions"),
            &["outcome"],
        )?;

        let reports = IntCounterVec::new(
            Opts::new(
                "teafi_bot_reports_total",
                "Transaction report POST attempts by outcome",
            ),
            &["outcome"],
        )?;

        let check_ins = IntCounterVec::new(
            Opts::new("teafi_bot_check_ins_total", "Daily check-in decisions"),
            &["outcome"],
        )?;

        let points = Gauge::new("teafi_bot_points", "Last observed loyalty points total")?;

        // Register all metrics
        registry.register(Box::new(iterations.clone()))?;
        registry.register(Box::new(swaps.clone()))?;
        registry.register(Box::new(reports.clone()))?;
        registry.register(Box::new(check_ins.clone()))?;
        registry.register(Box::new(points.clone()))?;

        Ok(Self {
            registry,
            iterations,
            swaps,
            reports,
            check_ins,
            points,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
