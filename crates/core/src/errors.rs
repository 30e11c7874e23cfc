//! Field-level error types shared by every validation layer.
//!
//! The server reports violations as an ordered list of [`FieldError`]s; the
//! client renders them as a [`FieldErrors`] map keyed by field name. Both
//! local and server errors end up in the same map shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field name used for errors that do not belong to a single input.
pub const SUBMIT_FIELD: &str = "submit";

/// Field name to message mapping, one message per field.
pub type FieldErrors = BTreeMap<String, String>;

/// One violated rule on one field.
///
/// Wire shape: `{"param": "email", "msg": "Please provide a valid email address"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field, in wire (camelCase) form.
    pub param: String,
    /// Human-readable message.
    pub msg: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
        }
    }
}

/// Every violation found in one payload, in the order the rules ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty error list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a violation.
    pub fn push(&mut self, param: impl Into<String>, msg: impl Into<String>) {
        self.0.push(FieldError::new(param, msg));
    }

    /// Append every violation from `other`.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// `true` when no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when at least one violation names `param`.
    #[must_use]
    pub fn has_field(&self, param: &str) -> bool {
        self.0.iter().any(|e| e.param == param)
    }

    /// First message recorded for `param`.
    #[must_use]
    pub fn message_for(&self, param: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.param == param)
            .map(|e| e.msg.as_str())
    }

    /// The violations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Consume into the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// Collapse to one message per field. Later messages overwrite earlier
    /// ones, so the last rule reported for a field is the one shown.
    #[must_use]
    pub fn to_field_map(&self) -> FieldErrors {
        to_field_map(&self.0)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Collapse a list of field errors into a field map (last message wins).
#[must_use]
pub fn to_field_map(errors: &[FieldError]) -> FieldErrors {
    errors
        .iter()
        .map(|e| (e.param.clone(), e.msg.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.push("name", "Name must be between 2 and 100 characters");
        errors.push("email", "Please provide a valid email address");

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("email"));
        assert!(!errors.has_field("company"));
        assert_eq!(
            errors.message_for("name"),
            Some("Name must be between 2 and 100 characters")
        );
    }

    #[test]
    fn test_field_map_keeps_last_message() {
        let errors: ValidationErrors = vec![
            FieldError::new("maximumInvestment", "Maximum investment must be a positive number"),
            FieldError::new(
                "maximumInvestment",
                "Maximum investment must be greater than minimum investment",
            ),
        ]
        .into();

        let map = errors.to_field_map();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("maximumInvestment").map(String::as_str),
            Some("Maximum investment must be greater than minimum investment")
        );
    }

    #[test]
    fn test_wire_shape() {
        let error = FieldError::new("description", "too short");
        let json = serde_json::to_value(&error).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"param": "description", "msg": "too short"}));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push("stage", "Please select a valid stage");
        assert!(errors.into_result().is_err());
    }
}
