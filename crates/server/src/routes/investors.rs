//! Investor profile route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use onboarding_core::InvestorId;
use onboarding_core::api::{InvestorEnvelope, InvestorsEnvelope, messages};

use super::object_body;
use crate::error::{AppError, Result};
use crate::gateway;
use crate::state::AppState;
use crate::validation::validate_investor;

/// Create an investor profile.
///
/// POST /api/investors
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<InvestorEnvelope>)> {
    let payload = object_body(body)?;
    let new = validate_investor(&payload).inspect_err(|errors| {
        tracing::debug!(violations = errors.len(), "Investor submission rejected");
    })?;

    let investor = gateway::create_investor(state.store(), new).await?;

    Ok((
        StatusCode::CREATED,
        Json(InvestorEnvelope {
            message: messages::INVESTOR_CREATED.to_string(),
            investor,
        }),
    ))
}

/// List active investors, newest first.
///
/// GET /api/investors
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<InvestorsEnvelope>> {
    let investors = state.store().investors().list_active().await?;

    Ok(Json(InvestorsEnvelope {
        message: messages::INVESTORS_RETRIEVED.to_string(),
        investors,
    }))
}

/// Get one investor by ID. Unknown and malformed IDs are both 404.
///
/// GET /api/investors/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvestorEnvelope>> {
    let not_found = || AppError::NotFound(messages::INVESTOR_NOT_FOUND.to_string());

    let id: InvestorId = id.parse().map_err(|_| not_found())?;
    let investor = state
        .store()
        .investors()
        .get(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(InvestorEnvelope {
        message: messages::INVESTOR_RETRIEVED.to_string(),
        investor,
    }))
}
