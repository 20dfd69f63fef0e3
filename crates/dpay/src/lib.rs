//! Charge-request pipeline for the d-payment gateway.
//!
//! Takes a loosely structured inbound payload, normalizes it into the fixed
//! charge schema expected by the external settlement API, forwards it over
//! HTTP, and reports the result as a uniform [`PaymentOutcome`].
//!
//! # Pipeline
//!
//! - **Normalize** ([`transform::normalize`]) — default-filled [`ChargeRequest`]
//!   from an arbitrary JSON mapping
//! - **Serialize** — serde rename to the external wire field names
//! - **Transport** ([`transport::HttpPoster`]) — one outbound POST, no retries
//! - **Orchestrate** ([`service::PaymentService`]) — sequences the above and
//!   maps every failure into the outcome envelope

pub mod charge;
pub mod service;
pub mod transform;
pub mod transport;

pub use charge::{ChargeItem, ChargeRequest, PaymentOutcome, RawPayload};
pub use service::{PaymentProcessor, PaymentService};
pub use transform::{normalize, MerchantCredentials, TransformError};
pub use transport::{HttpPoster, JsonPoster, TransportError};
