//! Startup profile route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use onboarding_core::StartupId;
use onboarding_core::api::{StartupEnvelope, StartupsEnvelope, messages};

use super::object_body;
use crate::error::{AppError, Result};
use crate::gateway;
use crate::state::AppState;
use crate::validation::validate_startup;

/// Create a startup profile.
///
/// POST /api/startups
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StartupEnvelope>)> {
    let payload = object_body(body)?;
    let new = validate_startup(&payload).inspect_err(|errors| {
        tracing::debug!(violations = errors.len(), "Startup submission rejected");
    })?;

    let startup = gateway::create_startup(state.store(), new).await?;

    Ok((
        StatusCode::CREATED,
        Json(StartupEnvelope {
            message: messages::STARTUP_CREATED.to_string(),
            startup,
        }),
    ))
}

/// List active startups, newest first.
///
/// GET /api/startups
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<StartupsEnvelope>> {
    let startups = state.store().startups().list_active().await?;

    Ok(Json(StartupsEnvelope {
        message: messages::STARTUPS_RETRIEVED.to_string(),
        startups,
    }))
}

/// Get one startup by ID. Unknown and malformed IDs are both 404.
///
/// GET /api/startups/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StartupEnvelope>> {
    let not_found = || AppError::NotFound(messages::STARTUP_NOT_FOUND.to_string());

    let id: StartupId = id.parse().map_err(|_| not_found())?;
    let startup = state
        .store()
        .startups()
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(StartupEnvelope {
        message: messages::STARTUP_RETRIEVED.to_string(),
        startup,
    }))
}
