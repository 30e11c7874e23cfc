//! Wire envelopes exchanged between the client and the HTTP API.
//!
//! Every response body carries a `message`. Success bodies add the profile
//! (or list) under a persona-named key; failure bodies optionally add
//! `errors`.

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::profile::{Investor, Startup};

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Panic detail, only present on a caught panic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorEnvelope {
    pub message: String,
    pub investor: Investor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorsEnvelope {
    pub message: String,
    pub investors: Vec<Investor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupEnvelope {
    pub message: String,
    pub startup: Startup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupsEnvelope {
    pub message: String,
    pub startups: Vec<Startup>,
}

/// Liveness body for `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Seconds since the process started.
    pub uptime: f64,
}

/// Fixed response messages.
pub mod messages {
    pub const VALIDATION_FAILED: &str = "Validation failed";
    pub const INVESTOR_CREATED: &str = "Investor profile created successfully";
    pub const INVESTORS_RETRIEVED: &str = "Investors retrieved successfully";
    pub const INVESTOR_RETRIEVED: &str = "Investor retrieved successfully";
    pub const INVESTOR_NOT_FOUND: &str = "Investor not found";
    pub const STARTUP_CREATED: &str = "Startup profile created successfully";
    pub const STARTUPS_RETRIEVED: &str = "Startups retrieved successfully";
    pub const STARTUP_RETRIEVED: &str = "Startup retrieved successfully";
    pub const STARTUP_NOT_FOUND: &str = "Startup not found";
    pub const ROUTE_NOT_FOUND: &str = "Route not found";
    pub const INTERNAL: &str = "Internal server error";
    pub const PANIC: &str = "Something went wrong!";
}
