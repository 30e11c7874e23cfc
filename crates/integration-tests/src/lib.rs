//! Integration tests for onboarding.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory store only
//! cargo test -p onboarding-integration-tests
//!
//! # Include the PostgreSQL-backed tests
//! ONBOARD_TEST_DATABASE_URL=postgres://localhost/onboarding_test \
//!     cargo test -p onboarding-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `api` - raw HTTP contract against an in-process server
//! - `flow` - the client state machine driving a real server
//! - `postgres` - the same contract against `PostgreSQL` (ignored by default)

use std::net::SocketAddr;

use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use onboarding_client::{ClientConfig, OnboardingClient};
use onboarding_server::{
    app,
    config::ServerConfig,
    db::{self, ProfileStore},
    state::AppState,
};

/// An onboarding server running on an ephemeral loopback port.
///
/// The server task is aborted when this value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    http: reqwest::Client,
    client: OnboardingClient,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    pub async fn spawn() -> Self {
        Self::spawn_with(ProfileStore::memory()).await
    }

    /// Start a server backed by `store`.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    pub async fn spawn_with(store: ProfileStore) -> Self {
        let config = ServerConfig::in_memory();
        let listener = TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let router = app(AppState::new(config, store));
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!(error = %e, "Test server stopped");
            }
        });

        let client_config = ClientConfig::with_api_url(&format!("http://{addr}/api"))
            .expect("Loopback URL is valid");
        let client = OnboardingClient::new(&client_config).expect("Failed to build client");

        Self {
            addr,
            http: reqwest::Client::new(),
            client,
            handle,
        }
    }

    /// The submission client pointed at this server.
    #[must_use]
    pub const fn client(&self) -> &OnboardingClient {
        &self.client
    }

    /// Absolute URL for an API path such as `/investors`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/api{path}", self.addr)
    }

    /// POST a JSON body and return the status and decoded body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        decode(response).await
    }

    /// GET a path and return the status and decoded body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        decode(response).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body: Value = response.json().await.expect("Response is not JSON");
    (status, body)
}

/// A migrated, emptied `PostgreSQL` store, when `ONBOARD_TEST_DATABASE_URL`
/// is set.
///
/// # Panics
///
/// Panics if the database is configured but unreachable or cannot be
/// migrated.
pub async fn postgres_store() -> Option<ProfileStore> {
    let url = std::env::var("ONBOARD_TEST_DATABASE_URL").ok()?;
    let pool = db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database");

    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to migrate test database");
    sqlx::query("TRUNCATE investor, startup")
        .execute(&pool)
        .await
        .expect("Failed to empty test database");

    Some(ProfileStore::Postgres(pool))
}
