use std::env;
use std::time::Duration;

use dpay::MerchantCredentials;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BILLING_TOKEN: &str = "9000000248250856006510";

#[derive(Clone)]
pub struct GatewayConfig {
    /// Merchant company code on the settlement API
    pub company_code: String,
    /// Merchant store code on the settlement API
    pub store_code: String,
    /// Authentication credential for the settlement API
    pub authentication_pass: String,
    /// Settlement API endpoint URL
    pub payment_api_url: String,
    /// Timeout for the outbound settlement call
    pub request_timeout: Duration,
    /// Billing token used when the inbound payload carries none
    pub default_billing_token: String,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
    /// Server port
    pub port: u16,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("company_code", &self.company_code)
            .field("store_code", &self.store_code)
            .field("authentication_pass", &"[REDACTED]")
            .field("payment_api_url", &self.payment_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("default_billing_token", &self.default_billing_token)
            .field("allowed_origins", &self.allowed_origins)
            .field("port", &self.port)
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: merchant credentials
        let company_code = env::var("PAYMENT_COMPANY_CODE")
            .map_err(|_| ConfigError::MissingRequired("PAYMENT_COMPANY_CODE"))?;
        let store_code = env::var("PAYMENT_STORE_CODE")
            .map_err(|_| ConfigError::MissingRequired("PAYMENT_STORE_CODE"))?;
        let authentication_pass = env::var("PAYMENT_AUTHENTICATION_PASS")
            .map_err(|_| ConfigError::MissingRequired("PAYMENT_AUTHENTICATION_PASS"))?;

        // Required: settlement API URL
        let payment_api_url = env::var("PAYMENT_API_URL")
            .map_err(|_| ConfigError::MissingRequired("PAYMENT_API_URL"))?;
        Url::parse(&payment_api_url)
            .map_err(|_| ConfigError::InvalidUrl(payment_api_url.clone()))?;

        // Optional: outbound timeout in seconds
        let request_timeout = env::var("PAYMENT_API_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        // Optional: fallback billing token
        let default_billing_token = env::var("DEFAULT_BILLING_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BILLING_TOKEN.to_string());

        // Optional: allowed origins
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|s| split_origins(&s))
            .unwrap_or_default();

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            company_code,
            store_code,
            authentication_pass,
            payment_api_url,
            request_timeout,
            default_billing_token,
            allowed_origins,
            port,
        })
    }

    /// Merchant identity handed to the charge pipeline.
    pub fn merchant(&self) -> MerchantCredentials {
        MerchantCredentials {
            company_code: self.company_code.clone(),
            store_code: self.store_code.clone(),
            authentication_pass: self.authentication_pass.clone(),
            default_billing_token: self.default_billing_token.clone(),
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
