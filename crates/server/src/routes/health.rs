//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use onboarding_core::api::HealthBody;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Reports process uptime. Does not check dependencies.
pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
    })
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the profile store does not answer.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, engine = state.store().engine(), "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
