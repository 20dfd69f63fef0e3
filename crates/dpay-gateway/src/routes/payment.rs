use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

use dpay::RawPayload;

use crate::error::GatewayError;
use crate::state::AppState;

/// Inbound envelope: the arbitrary client payload wrapped under `data`.
#[derive(Debug, Deserialize)]
pub struct ReceivePaymentBody {
    pub data: RawPayload,
}

/// POST /api/payment/receive - relay a charge request to the settlement API.
///
/// On success the upstream response body is returned verbatim. A pipeline
/// failure surfaces as 502 with the failure detail; malformed input never
/// reaches here (422 from the JSON error handler).
pub async fn receive(
    state: web::Data<AppState>,
    body: web::Json<ReceivePaymentBody>,
) -> Result<HttpResponse, GatewayError> {
    tracing::info!("received payment request");

    let outcome = state.processor.process(&body.data).await;
    if !outcome.success {
        return Err(GatewayError::Payment(outcome.error.unwrap_or_else(|| {
            "payment processing failed".to_string()
        })));
    }

    Ok(HttpResponse::Ok().json(outcome.data.unwrap_or(Value::Null)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/payment/receive", web::post().to(receive));
}
