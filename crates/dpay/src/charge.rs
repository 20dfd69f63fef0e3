//! Wire types for the external settlement API and the outcome envelope
//! returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound payload as received from the client: an arbitrary JSON mapping.
pub type RawPayload = serde_json::Map<String, Value>;

/// One line item of a charge request.
///
/// The upstream API models charges as a list, but the gateway always sends
/// exactly one item per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeItem {
    pub store_order_number: String,
    /// Monetary amount as a string, to avoid floating-point precision loss.
    pub settlement_amount: String,
    /// Shown on the payment confirmation screen. Upstream caps this at 20 chars.
    pub display_contents1: String,
    pub display_contents2: String,
}

/// Charge request in the exact shape the settlement API expects.
///
/// Built fresh per inbound request by [`crate::transform::normalize`] and
/// immutable afterwards. All eight top-level fields are always present on
/// the wire; missing inbound data is covered by defaults, never by omitted
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub company_code: String,
    pub store_code: String,
    pub authentication_pass: String,
    pub transaction_id: String,
    pub req_timestamp: String,
    /// Mode flag distinguishing production vs. test paths on the upstream API.
    pub exec_mode: String,
    pub billing_token: String,
    pub regi_charge_req_list: Vec<ChargeItem>,
}

/// Uniform result envelope produced by the orchestrator.
///
/// In the common path exactly one of (`data`, `success = true`) or
/// (`error`, `success = false`) holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentOutcome {
    /// Successful outcome carrying the upstream response body verbatim.
    pub fn succeeded(data: Value) -> Self {
        Self {
            success: true,
            message: "payment request processed successfully".to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome carrying the failure detail.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "payment processing error".to_string(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Copy of a serialized charge request safe for logging: the authentication
/// credential is replaced with a mask.
pub fn redact_authentication(wire: &Value) -> Value {
    let mut safe = wire.clone();
    if let Some(obj) = safe.as_object_mut() {
        if obj.contains_key("authenticationPass") {
            obj.insert(
                "authenticationPass".to_string(),
                Value::String("****".to_string()),
            );
        }
    }
    safe
}
