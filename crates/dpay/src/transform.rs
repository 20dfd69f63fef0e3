//! Normalization of arbitrary inbound payloads into [`ChargeRequest`]s.
//!
//! Every field the upstream schema requires is filled deterministically:
//! values come from the inbound `paymentInfo` mapping where present, from
//! merchant configuration for credentials, and from fixed defaults
//! otherwise. The only inputs that fail normalization are values with no
//! string form at all (arrays, objects).

use chrono::{FixedOffset, Utc};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::charge::{ChargeItem, ChargeRequest, RawPayload};

/// Placeholder order number when the client supplies none.
const DEFAULT_ORDER_NUMBER: &str = "SPNM0000000000000000";

/// Execution mode sent on every request.
const EXEC_MODE: &str = "000";

/// Upstream caps `displayContents1` at 20 characters.
const DISPLAY_CONTENTS_MAX: usize = 20;

/// Upstream field width for `transactionId`.
const TRANSACTION_ID_LEN: usize = 20;

/// Merchant identity for the settlement API.
///
/// Sourced from process configuration at startup, never from the inbound
/// payload.
#[derive(Clone)]
pub struct MerchantCredentials {
    pub company_code: String,
    pub store_code: String,
    pub authentication_pass: String,
    /// Fallback billing token when the inbound payload carries none.
    pub default_billing_token: String,
}

impl std::fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("company_code", &self.company_code)
            .field("store_code", &self.store_code)
            .field("authentication_pass", &"[REDACTED]")
            .field("default_billing_token", &self.default_billing_token)
            .finish()
    }
}

/// Errors from the normalize/serialize stages of the pipeline.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Inbound value has no string form (arrays, objects).
    #[error("field `{0}` cannot be represented as a string")]
    Unstringifiable(&'static str),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Build a [`ChargeRequest`] from an arbitrary inbound mapping.
///
/// Reads the nested `paymentInfo` mapping (absent or mis-shaped → treated
/// as empty) and the root `billingToken`. Side effects: reads the system
/// clock for `reqTimestamp` and generates a fresh `transactionId`.
pub fn normalize(
    raw: &RawPayload,
    merchant: &MerchantCredentials,
) -> Result<ChargeRequest, TransformError> {
    let payment_info = raw.get("paymentInfo").and_then(Value::as_object);

    let amount = match payment_info.and_then(|info| info.get("amount")) {
        None | Some(Value::Null) => "0".to_string(),
        Some(value) => stringify_scalar("amount", value)?,
    };

    let order_number = str_field(payment_info, "orderNumber").unwrap_or(DEFAULT_ORDER_NUMBER);
    let description = str_field(payment_info, "description").unwrap_or("");
    let display_contents1 = match str_field(payment_info, "displayContents1") {
        Some(contents) => contents.to_string(),
        None => truncate_chars(description, DISPLAY_CONTENTS_MAX),
    };
    let display_contents2 = str_field(payment_info, "displayContents2")
        .unwrap_or("")
        .to_string();

    let billing_token = raw
        .get("billingToken")
        .and_then(Value::as_str)
        .unwrap_or(&merchant.default_billing_token)
        .to_string();

    Ok(ChargeRequest {
        company_code: merchant.company_code.clone(),
        store_code: merchant.store_code.clone(),
        authentication_pass: merchant.authentication_pass.clone(),
        transaction_id: next_transaction_id(),
        req_timestamp: jst_timestamp(),
        exec_mode: EXEC_MODE.to_string(),
        billing_token,
        regi_charge_req_list: vec![ChargeItem {
            store_order_number: order_number.to_string(),
            settlement_amount: amount,
            display_contents1,
            display_contents2,
        }],
    })
}

/// String form of a scalar JSON value. Arrays and objects have none.
fn stringify_scalar(field: &'static str, value: &Value) -> Result<String, TransformError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(TransformError::Unstringifiable(field)),
    }
}

/// String value of `key` in an optional mapping; non-string values fall
/// through to the caller's default.
fn str_field<'a>(
    obj: Option<&'a serde_json::Map<String, Value>>,
    key: &str,
) -> Option<&'a str> {
    obj.and_then(|map| map.get(key)).and_then(Value::as_str)
}

/// First `max` characters of `s`, character-boundary safe.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Fresh per-request transaction id, sized to the upstream field width.
fn next_transaction_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..TRANSACTION_ID_LEN].to_string()
}

/// Current wall clock in UTC+9, ISO-8601 with millisecond precision.
/// The settlement API expects the `+09:00` offset regardless of the host
/// time zone.
fn jst_timestamp() -> String {
    let jst = FixedOffset::east_opt(9 * 3600).expect("static UTC+9 offset");
    Utc::now()
        .with_timezone(&jst)
        .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        .to_string()
}
