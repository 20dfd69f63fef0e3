//! Orchestration of the charge pipeline: normalize → serialize → transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::charge::{redact_authentication, PaymentOutcome, RawPayload};
use crate::transform::{self, MerchantCredentials};
use crate::transport::JsonPoster;

/// Capability: can process one inbound payment request end to end.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, raw: &RawPayload) -> PaymentOutcome;
}

/// Production [`PaymentProcessor`].
///
/// Holds everything the pipeline needs — transport, merchant credentials,
/// target URL and timeout — as an immutable unit constructed at startup.
/// At most one outbound call per invocation; every fault is converted into
/// a failed [`PaymentOutcome`], nothing escapes as a panic or error.
pub struct PaymentService {
    poster: Arc<dyn JsonPoster>,
    merchant: MerchantCredentials,
    api_url: String,
    timeout: Duration,
}

impl PaymentService {
    pub fn new(
        poster: Arc<dyn JsonPoster>,
        merchant: MerchantCredentials,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            poster,
            merchant,
            api_url: api_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PaymentProcessor for PaymentService {
    async fn process(&self, raw: &RawPayload) -> PaymentOutcome {
        let request = match transform::normalize(raw, &self.merchant) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!(error = %e, "failed to normalize charge request");
                return PaymentOutcome::failed(e.to_string());
            }
        };

        let wire = match serde_json::to_value(&request) {
            Ok(wire) => wire,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize charge request");
                return PaymentOutcome::failed(e.to_string());
            }
        };

        tracing::info!(
            request = %redact_authentication(&wire),
            url = %self.api_url,
            "forwarding charge request"
        );

        match self.poster.post_json(&self.api_url, &wire, self.timeout).await {
            Ok(body) => {
                tracing::info!("settlement API accepted the charge request");
                PaymentOutcome::succeeded(body)
            }
            Err(e) => {
                tracing::error!(error = %e, "charge request failed");
                PaymentOutcome::failed(e.to_string())
            }
        }
    }
}
