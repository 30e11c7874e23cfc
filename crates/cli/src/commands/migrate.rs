//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! onboard migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ONBOARD_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded in the
//! server library:
//! ```text
//! migrations/
//! └── 20260101000000_create_profiles.sql
//! ```

use secrecy::SecretString;
use thiserror::Error;

use onboarding_server::db::{MIGRATOR, create_pool};

/// Errors running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run every pending migration against the onboarding database.
///
/// # Errors
///
/// Returns `MigrationError` if no database URL is configured, the database
/// cannot be reached, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ONBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("ONBOARD_DATABASE_URL"))?;

    tracing::info!("Connecting to onboarding database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!(
        available = MIGRATOR.iter().count(),
        "Running onboarding migrations..."
    );
    MIGRATOR.run(&pool).await?;

    tracing::info!("Onboarding migrations complete!");
    Ok(())
}
