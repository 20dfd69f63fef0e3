//! Actix-web boundary for the d-payment request gateway.
//!
//! Wires environment configuration, CORS, error rendering and the HTTP
//! routes around the charge pipeline in the `dpay` crate.

pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use state::AppState;
