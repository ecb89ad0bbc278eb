//! Tea-Fi Backend API Adapter
//!
//! Implements the `TeaFiApi` port over HTTPS with reqwest.
//!
//! Sub-modules:
//! - `client`: HTTP client and port implementation
//! - `types`: API request/response type definitions

pub mod client;
pub mod types;

pub use client::{TeaFiClient, TeaFiClientConfig};
