//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ONBOARD_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; only required when `ONBOARD_STORE=postgres`)
//!
//! ## Optional
//! - `ONBOARD_STORE` - Profile store engine: `postgres` or `memory` (default: postgres)
//! - `ONBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `ONBOARD_PORT` - Listen port (default: 5000)
//! - `ONBOARD_ENV` - `development` or `production` (default: development)
//! - `ONBOARD_CORS_ORIGINS` - Comma-separated allowed origins (default: <http://localhost:3000>)
//! - `ONBOARD_BODY_LIMIT_BYTES` - Maximum request body size (default: 10 MiB)
//! - `ONBOARD_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which engine backs the profile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

/// Deployment environment. Controls how much panic detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected 'development' or 'production', got '{other}'")),
        }
    }
}

/// Onboarding server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Profile store engine
    pub store: StoreKind,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size in bytes
    pub body_limit_bytes: usize,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry trace sample rate
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = parse_env("ONBOARD_STORE", "postgres")?;
        let database_url = match store {
            StoreKind::Postgres => Some(get_database_url("ONBOARD_DATABASE_URL")?),
            StoreKind::Memory => None,
        };
        let host = parse_env("ONBOARD_HOST", "127.0.0.1")?;
        let port = parse_env("ONBOARD_PORT", "5000")?;
        let environment = parse_env("ONBOARD_ENV", "development")?;
        let cors_origins = parse_origins(&get_env_or_default(
            "ONBOARD_CORS_ORIGINS",
            "http://localhost:3000",
        ));
        let body_limit_bytes = get_optional_env("ONBOARD_BODY_LIMIT_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ONBOARD_BODY_LIMIT_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
        let log_json = get_optional_env("ONBOARD_LOG_JSON").is_some();

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            store,
            database_url,
            host,
            port,
            environment,
            cors_origins,
            body_limit_bytes,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for an in-memory server on `127.0.0.1` with an
    /// OS-assigned port. Used by tests and local tooling.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: StoreKind::Memory,
            database_url: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            environment: Environment::Development,
            cors_origins: vec!["http://localhost:3000".to_string()],
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("postgres".parse::<StoreKind>().unwrap(), StoreKind::Postgres);
        assert_eq!("Memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert!("redis".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!(!"dev".parse::<Environment>().unwrap().is_production());
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://app.example.com,,"),
            vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string()
            ]
        );
        assert!(parse_origins(" ").is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 5000,
            ..ServerConfig::in_memory()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = ServerConfig {
            store: StoreKind::Postgres,
            database_url: Some(SecretString::from("postgres://user:hunter2@db/onboarding")),
            ..ServerConfig::in_memory()
        };

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
