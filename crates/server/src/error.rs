//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding. Every failure is answered with a JSON [`ErrorBody`].
//! All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use onboarding_core::api::{ErrorBody, messages};
use onboarding_core::{Persona, ValidationErrors};

use crate::db::RepositoryError;
use crate::gateway::GatewayError;

/// Application-level error type for the onboarding API.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A profile with the same email already exists.
    #[error("Conflict: {} with this email already exists", .0.noun())]
    Conflict(Persona),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(errors) => Self::Validation(errors),
            GatewayError::Conflict { persona, .. } => Self::Conflict(persona),
            GatewayError::Repository(err) => Self::Database(err),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match self {
            Self::Validation(errors) => {
                ErrorBody::with_errors(messages::VALIDATION_FAILED, errors.into_vec())
            }
            Self::Conflict(persona) => ErrorBody::message(format!(
                "{} with this email already exists",
                persona.with_article()
            )),
            Self::NotFound(message) | Self::BadRequest(message) => ErrorBody::message(message),
            Self::Database(_) | Self::Internal(_) => ErrorBody::message(messages::INTERNAL),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Investor not found".to_string());
        assert_eq!(err.to_string(), "Not found: Investor not found");

        let err = AppError::Conflict(Persona::Startup);
        assert_eq!(err.to_string(), "Conflict: startup with this email already exists");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("test".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict(Persona::Investor).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_lists_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Please provide a valid email address");

        let (status, body) = body_json(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "message": "Validation failed",
                "errors": [{"param": "email", "msg": "Please provide a valid email address"}]
            })
        );
    }

    #[tokio::test]
    async fn test_conflict_body() {
        let (_, body) = body_json(AppError::Conflict(Persona::Investor)).await;
        assert_eq!(
            body,
            json!({"message": "An investor with this email already exists"})
        );
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let (status, body) =
            body_json(AppError::Internal("connection refused to 10.0.0.3".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Internal server error"}));
    }
}
