//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, blockchain RPC) and hosts the
//! ambient console and metrics plumbing.
//!
//! Adapter categories:
//! - `api`: Tea-Fi backend REST client
//! - `chain`: Polygon interaction via alloy-rs
//! - `console`: Banner, terminal clearing and tracing setup
//! - `metrics`: Prometheus metrics export and health checks

pub mod api;
pub mod chain;
pub mod console;
pub mod metrics;
