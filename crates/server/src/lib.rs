//! Onboarding server library.
//!
//! The HTTP API that validates, stores and returns investor and startup
//! profiles. Exposed as a library so that tests and tooling can build the
//! same router the binary serves.
//!
//! # Request path
//!
//! ```text
//! JSON body -> validation (field rules) -> gateway (record rules, timestamps)
//!           -> db (Postgres or memory) -> JSON envelope
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::config::{ServerConfig, StoreKind};
use crate::db::ProfileStore;
use crate::state::AppState;

/// Build the full application router with its middleware stack.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let body_limit = config.body_limit_bytes;
    let production = config.environment.is_production();
    let cors = cors_layer(&config.cors_origins);

    Router::new()
        .merge(routes::routes())
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(CatchPanicLayer::custom(middleware::panic_response(
            production,
        )))
        .with_state(state)
}

/// Open the profile store the configuration asks for.
///
/// # Errors
///
/// Returns `sqlx::Error` if `PostgreSQL` cannot be reached or no database
/// URL was configured for it.
pub async fn connect_store(config: &ServerConfig) -> Result<ProfileStore, sqlx::Error> {
    match config.store {
        StoreKind::Memory => Ok(ProfileStore::memory()),
        StoreKind::Postgres => {
            let database_url = config.database_url.as_ref().ok_or_else(|| {
                sqlx::Error::Configuration("no database URL configured".into())
            })?;
            Ok(ProfileStore::Postgres(db::create_pool(database_url).await?))
        }
    }
}

/// CORS for the configured browser origins. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(%origin, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
