//! HTTP route handlers for the onboarding API.
//!
//! # Route Structure
//!
//! ```text
//! # Health
//! GET  /api/health             - Liveness (status, timestamp, uptime)
//! GET  /api/health/ready       - Readiness (profile store answers)
//!
//! # Investors
//! POST /api/investors          - Create investor profile
//! GET  /api/investors          - List active investors, newest first
//! GET  /api/investors/{id}     - Get one investor
//!
//! # Startups
//! POST /api/startups           - Create startup profile
//! GET  /api/startups           - List active startups, newest first
//! GET  /api/startups/{id}      - Get one startup
//! ```
//!
//! Any other path answers 404 `{"message": "Route not found"}`.

pub mod health;
pub mod investors;
pub mod startups;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;

use onboarding_core::Payload;
use onboarding_core::api::{ErrorBody, messages};

use crate::error::AppError;
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route(
            "/investors",
            get(investors::list).post(investors::create),
        )
        .route("/investors/{id}", get(investors::show))
        .route("/startups", get(startups::list).post(startups::create))
        .route("/startups/{id}", get(startups::show));

    Router::new().nest("/api", api)
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::message(messages::ROUTE_NOT_FOUND)),
    )
}

/// Unwrap a JSON body that must be an object.
///
/// Malformed JSON and non-object bodies are both answered with 400.
pub(crate) fn object_body(body: Result<Json<Value>, JsonRejection>) -> Result<Payload, AppError> {
    match body? {
        Json(Value::Object(map)) => Ok(map),
        Json(_) => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}
