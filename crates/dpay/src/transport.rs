//! Outbound HTTP transport to the settlement API.
//!
//! One POST per call, JSON in and JSON out, bounded by the caller's
//! timeout. No retries — a failed call is reported, not re-attempted.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Faults from a single outbound call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Upstream responded with a non-success status. The body is parsed as
    /// JSON when possible, otherwise kept as the raw text.
    #[error("upstream returned status {status}: {body}")]
    Http { status: u16, body: Value },

    /// Connection failure, timeout, DNS failure — any transport-layer fault
    /// before a usable response was obtained.
    #[error("network error: {0}")]
    Network(String),

    /// Anything else, notably a success status with a non-JSON body.
    #[error("unexpected transport error: {0}")]
    Unexpected(String),
}

/// Capability: can POST a JSON body and return the decoded JSON response.
#[async_trait]
pub trait JsonPoster: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, TransportError>;
}

/// Production [`JsonPoster`] backed by `reqwest`.
pub struct HttpPoster {
    client: reqwest::Client,
}

impl HttpPoster {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to build HTTP client");
        Self::with_client(client)
    }

    /// Use a pre-built `reqwest::Client` (shared connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpPoster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JsonPoster for HttpPoster {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, TransportError> {
        tracing::info!(url = %url, "sending charge request to settlement API");

        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.map_err(|e| {
                TransportError::Network(format!("failed to read error response: {e}"))
            })?;
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            tracing::error!(status = status.as_u16(), "settlement API rejected the request");
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("failed to read response body: {e}")))?;
        serde_json::from_str(&text).map_err(|e| {
            TransportError::Unexpected(format!("response body is not valid JSON: {e}"))
        })
    }
}
