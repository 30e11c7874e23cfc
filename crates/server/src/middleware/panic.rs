//! Panic responses for `CatchPanicLayer`.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use onboarding_core::api::{ErrorBody, messages};

/// Build the handler `CatchPanicLayer::custom` calls when a request panics.
///
/// The response is always 500 `{"message": "Something went wrong!", "error": ..}`.
/// `error` carries the panic text unless `production` is set.
pub fn panic_response(production: bool) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |payload: Box<dyn Any + Send + 'static>| {
        let detail = payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
            .unwrap_or_else(|| "unknown panic".to_string());

        tracing::error!(panic = %detail, "Request handler panicked");

        let body = ErrorBody {
            message: messages::PANIC.to_string(),
            errors: None,
            error: Some(if production {
                messages::INTERNAL.to_string()
            } else {
                detail
            }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn error_field(production: bool, payload: Box<dyn Any + Send>) -> String {
        let response = panic_response(production)(payload);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Something went wrong!");
        body.error.unwrap()
    }

    #[tokio::test]
    async fn test_development_shows_panic_text() {
        let detail = error_field(false, Box::new("boom")).await;
        assert_eq!(detail, "boom");
    }

    #[tokio::test]
    async fn test_production_hides_panic_text() {
        let detail = error_field(true, Box::new(String::from("secret path"))).await;
        assert_eq!(detail, "Internal server error");
    }
}
