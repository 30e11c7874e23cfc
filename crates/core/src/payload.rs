//! Payload cleaning.
//!
//! A form's blank text inputs mean "not provided". Cleaning drops every
//! top-level string field that is empty or whitespace-only so that such a
//! field is indistinguishable on the wire from one that was never sent.

use serde_json::{Map, Value};

/// A JSON object payload as submitted to the API.
pub type Payload = Map<String, Value>;

/// Return a copy of `payload` without blank string fields.
///
/// Non-string values (numbers, booleans, arrays, `null`) pass through
/// unchanged, as do strings with any non-whitespace content. Cleaning is
/// idempotent: `clean_payload(clean_payload(x)) == clean_payload(x)`.
#[must_use]
pub fn clean_payload(payload: &Payload) -> Payload {
    payload
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// `true` for a string value that is empty or whitespace-only.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}
