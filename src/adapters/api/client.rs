//! Tea-Fi HTTP Client - Backend REST API Client
//!
//! Wraps reqwest for all Tea-Fi backend interactions and implements the
//! `TeaFiApi` port. One request per call: the only retried call (the
//! transaction report) is retried by the reporter use case.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use super::types::{
  AddressParam, CheckInStatusResponse, GasQuoteParams, GasQuoteResponse, PointsResponse, ack_body,
};
use crate::domain::transaction::ReportPayload;
use crate::ports::backend::{
  ApiError, CheckInStatus, GasQuote, GasQuoteQuery, PointsBalance, TeaFiApi,
};

/// Configuration for the Tea-Fi HTTP client.
#[derive(Debug, Clone)]
pub struct TeaFiClientConfig {
  /// Base URL for the backend API.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
}

/// HTTP client for the Tea-Fi backend.
pub struct TeaFiClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: TeaFiClientConfig,
}

impl TeaFiClient {
  /// Create a new backend client.
  pub fn new(config: TeaFiClientConfig) -> anyhow::Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(2)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Send a request and turn non-success statuses into `ApiError::Status`.
  async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
      .send()
      .await
      .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
      debug!(status = %status, "Backend responded");
      return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
      status: status.as_u16(),
      body,
    })
  }

  async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
    self
      .send(request)
      .await?
      .json::<T>()
      .await
      .map_err(|e| ApiError::Decode(e.to_string()))
  }

  async fn ack(&self, request: RequestBuilder) -> Result<Value, ApiError> {
    let text = self
      .send(request)
      .await?
      .text()
      .await
      .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(ack_body(&text))
  }
}

#[async_trait]
impl TeaFiApi for TeaFiClient {
  #[instrument(skip(self), fields(chain = query.chain, tx_type = query.tx_type))]
  async fn gas_quote(&self, query: &GasQuoteQuery) -> Result<GasQuote, ApiError> {
    let request = self
      .http
      .get(self.url("/transaction/gas-quote"))
      .query(&GasQuoteParams::from(query));
    let resp: GasQuoteResponse = self.json(request).await?;
    Ok(resp.into())
  }

  #[instrument(skip(self, payload), fields(hash = %payload.hash))]
  async fn report_transaction(&self, payload: &ReportPayload) -> Result<Value, ApiError> {
    let request = self.http.post(self.url("/transaction")).json(payload);
    self.ack(request).await
  }

  #[instrument(skip(self))]
  async fn points(&self, address: &str) -> Result<PointsBalance, ApiError> {
    let request = self.http.get(self.url(&format!("/points/{address}")));
    let resp: PointsResponse = self.json(request).await?;
    Ok(resp.into())
  }

  #[instrument(skip(self))]
  async fn check_in_status(&self, address: &str) -> Result<CheckInStatus, ApiError> {
    let request = self
      .http
      .get(self.url("/wallet/check-in/current"))
      .query(&AddressParam { address });
    let resp: CheckInStatusResponse = self.json(request).await?;
    Ok(resp.into())
  }

  #[instrument(skip(self))]
  async fn check_in(&self, address: &str) -> Result<Value, ApiError> {
    let request = self
      .http
      .post(self.url("/wallet/check-in"))
      .query(&AddressParam { address })
      .json(&serde_json::json!({}));
    self.ack(request).await
  }
}
