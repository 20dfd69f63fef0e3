use std::sync::Arc;

use dpay::{HttpPoster, PaymentProcessor, PaymentService};

use crate::config::GatewayConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub processor: Arc<dyn PaymentProcessor>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to create HTTP client");

        let processor = Arc::new(PaymentService::new(
            Arc::new(HttpPoster::with_client(http_client)),
            config.merchant(),
            config.payment_api_url.clone(),
            config.request_timeout,
        ));

        Self {
            config: Arc::new(config),
            processor,
        }
    }

    /// State with a substitute processor (test doubles).
    pub fn with_processor(config: GatewayConfig, processor: Arc<dyn PaymentProcessor>) -> Self {
        Self {
            config: Arc::new(config),
            processor,
        }
    }
}
