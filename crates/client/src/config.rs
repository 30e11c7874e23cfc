//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `ONBOARD_API_URL` - Base URL of the onboarding API
//!   (default: <http://localhost:5000/api>)

use thiserror::Error;
use url::Url;

/// Default API base URL when `ONBOARD_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Errors building a client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured API URL is not a usable base URL.
    #[error("Invalid API URL '{value}': {reason}")]
    InvalidApiUrl { value: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Onboarding client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, always ending in `/` so relative joins stay under it.
    pub api_url: Url,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidApiUrl` if `ONBOARD_API_URL` is not an
    /// absolute http(s) URL.
    pub fn from_env() -> Result<Self, ClientError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw = std::env::var("ONBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_api_url(&raw)
    }

    /// Configuration for an explicit API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidApiUrl` if `raw` is not an absolute
    /// http(s) URL.
    pub fn with_api_url(raw: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidApiUrl {
            value: raw.to_string(),
            reason,
        };

        let mut api_url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", api_url.scheme())));
        }
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        Ok(Self { api_url })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::with_api_url("http://localhost:5000/api").unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/api/");
        assert_eq!(
            config.api_url.join("investors").unwrap().as_str(),
            "http://localhost:5000/api/investors"
        );
    }

    #[test]
    fn test_trailing_slash_kept() {
        let config = ClientConfig::with_api_url("https://onboard.example/api/").unwrap();
        assert_eq!(config.api_url.as_str(), "https://onboard.example/api/");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::with_api_url("localhost:5000"),
            Err(ClientError::InvalidApiUrl { .. })
        ));
        assert!(ClientConfig::with_api_url("ftp://files.example/api").is_err());
        assert!(ClientConfig::with_api_url("not a url").is_err());
    }
}
