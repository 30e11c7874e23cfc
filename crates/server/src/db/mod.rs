//! Profile storage.
//!
//! # Engines
//!
//! - `PostgreSQL` - tables `investor` and `startup`, unique on `email`, with
//!   CHECK constraints mirroring the field rules
//! - Memory - process-local store used for development and tests
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p onboarding-cli -- migrate
//! ```
//!
//! The server never migrates on startup; [`MIGRATOR`] embeds the files for
//! the CLI and the database-backed tests.

pub mod investors;
pub mod memory;
pub mod startups;

use std::sync::Arc;
use std::time::Duration;

use onboarding_core::schema::{investor, startup};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use investors::InvestorRepository;
pub use memory::MemoryStore;
pub use startups::StartupRepository;

/// Embedded migrations from `crates/server/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violated on `field`.
    #[error("constraint violation: {field} already exists")]
    Conflict { field: &'static str },

    /// A CHECK constraint rejected the row.
    #[error("check violation on {field}: {message}")]
    Check {
        field: &'static str,
        message: &'static str,
    },
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// The storage engine behind every repository.
#[derive(Debug, Clone)]
pub enum ProfileStore {
    Postgres(PgPool),
    Memory(Arc<MemoryStore>),
}

impl ProfileStore {
    /// A fresh, empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::default()))
    }

    /// Short engine name for logs.
    #[must_use]
    pub const fn engine(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Investor profile repository.
    #[must_use]
    pub const fn investors(&self) -> InvestorRepository<'_> {
        InvestorRepository::new(self)
    }

    /// Startup profile repository.
    #[must_use]
    pub const fn startups(&self) -> StartupRepository<'_> {
        StartupRepository::new(self)
    }

    /// Check that the store answers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if `PostgreSQL` is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").fetch_one(pool).await?;
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }
}

/// Classify a write error from `PostgreSQL`.
///
/// Unique violations become [`RepositoryError::Conflict`] (email is the only
/// unique column); named CHECK violations become [`RepositoryError::Check`]
/// carrying the field rule they mirror.
pub(crate) fn classify_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict { field: "email" };
        }
        if db_err.is_check_violation()
            && let Some((field, message)) = db_err.constraint().and_then(check_constraint_rule)
        {
            return RepositoryError::Check { field, message };
        }
    }
    RepositoryError::Database(err)
}

/// Field and message for a named CHECK constraint.
fn check_constraint_rule(constraint: &str) -> Option<(&'static str, &'static str)> {
    let rule = match constraint {
        "investor_name_length" => (investor::NAME.field, investor::NAME.message),
        "investor_company_length" => (investor::COMPANY.field, investor::COMPANY.message),
        "investor_title_length" => (investor::TITLE.field, investor::TITLE.message),
        "investor_phone_length" => (investor::PHONE.field, investor::PHONE.message),
        "investor_geography_length" => (investor::GEOGRAPHY.field, investor::GEOGRAPHY.message),
        "investor_linkedin_length" => (investor::LINKEDIN.field, investor::LINKEDIN.message),
        "investor_bio_length" => (investor::BIO.field, investor::BIO.message),
        "investor_focus_not_empty" => (
            investor::INVESTMENT_FOCUS.field,
            investor::INVESTMENT_FOCUS.message,
        ),
        "investor_minimum_non_negative" => (
            investor::MINIMUM_INVESTMENT.field,
            investor::MINIMUM_INVESTMENT.message,
        ),
        "investor_maximum_non_negative" => (
            investor::MAXIMUM_INVESTMENT.field,
            investor::MAXIMUM_INVESTMENT.message,
        ),
        "investor_investment_range" => {
            (investor::MAXIMUM_INVESTMENT.field, investor::INVESTMENT_RANGE)
        }
        "startup_company_name_length" => {
            (startup::COMPANY_NAME.field, startup::COMPANY_NAME.message)
        }
        "startup_founder_name_length" => {
            (startup::FOUNDER_NAME.field, startup::FOUNDER_NAME.message)
        }
        "startup_phone_length" => (startup::PHONE.field, startup::PHONE.message),
        "startup_website_length" => (startup::WEBSITE.field, startup::WEBSITE.message),
        "startup_funding_amount_non_negative" => (
            startup::FUNDING_AMOUNT.field,
            startup::FUNDING_AMOUNT.message,
        ),
        "startup_description_length" => {
            (startup::DESCRIPTION.field, startup::DESCRIPTION.message)
        }
        "startup_location_length" => (startup::LOCATION.field, startup::LOCATION.message),
        "startup_team_size_range" => (startup::TEAM_SIZE.field, startup::TEAM_SIZE.message),
        "startup_revenue_non_negative" => (startup::REVENUE.field, startup::REVENUE.message),
        "startup_founded_range" => ("founded", startup::FOUNDED_MESSAGE),
        "startup_linkedin_length" => (startup::LINKEDIN.field, startup::LINKEDIN.message),
        "startup_target_market_length" => {
            (startup::TARGET_MARKET.field, startup::TARGET_MARKET.message)
        }
        "startup_use_of_funds_length" => {
            (startup::USE_OF_FUNDS.field, startup::USE_OF_FUNDS.message)
        }
        _ => return None,
    };
    Some(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_constraint_maps_to_maximum_investment() {
        assert_eq!(
            check_constraint_rule("investor_investment_range"),
            Some((
                "maximumInvestment",
                "Maximum investment must be greater than minimum investment"
            ))
        );
    }

    #[test]
    fn test_unknown_constraint_is_unmapped() {
        assert_eq!(check_constraint_rule("investor_pkey"), None);
    }

    #[test]
    fn test_non_database_error_stays_database() {
        let err = classify_write_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[tokio::test]
    async fn test_memory_store_pings() {
        let store = ProfileStore::memory();
        assert_eq!(store.engine(), "memory");
        assert!(store.ping().await.is_ok());
    }
}
