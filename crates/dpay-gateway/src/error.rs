use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum GatewayError {
    /// Charge pipeline failed (normalization or settlement call)
    Payment(String),
    /// Internal error
    Internal(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Payment(msg) => write!(f, "payment processing failed: {}", msg),
            GatewayError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::Payment(msg) => {
                tracing::error!("payment pipeline failed: {}", msg);
                HttpResponse::BadGateway().json(serde_json::json!({ "detail": msg }))
            }
            GatewayError::Internal(msg) => {
                // Full detail goes to the log only, never to the caller
                tracing::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "detail": "internal server error"
                }))
            }
        }
    }
}

/// Map JSON body deserialization failures to 422 with a structured detail.
/// Actix's default is a bare 400; the gateway's contract distinguishes
/// malformed input (422) from pipeline faults (502).
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    let response =
        HttpResponse::UnprocessableEntity().json(serde_json::json!({ "detail": detail }));
    actix_web::error::InternalError::from_response(err, response).into()
}
