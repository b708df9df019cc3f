//! HTTP client for the masjid JSON endpoints.
//!
//! Every endpoint is an unauthenticated GET returning a small JSON document.
//! Requests are never retried: a failure is reported once and the caller
//! keeps whatever it already painted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;

use super::ApiError;

/// Anything that can resolve a URL into a JSON document.
///
/// `ApiClient` is the real implementation; tests substitute canned responses.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError>;
}

/// Client for the masjid endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new client. `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Parse a response body, keeping malformed JSON distinct from transport errors.
    pub fn parse_body(body: &str) -> Result<Value, ApiError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[async_trait]
impl JsonSource for ApiClient {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        debug!(url = url, status = %response.status(), "Endpoint responded");

        let body = response.text().await?;
        Self::parse_body(&body)
    }
}
