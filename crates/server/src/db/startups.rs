//! Startup profile repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use onboarding_core::{BusinessModel, Email, Industry, Startup, StartupId, StartupStage, Tag};

use super::{ProfileStore, RepositoryError, classify_write_error};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` startup queries.
#[derive(Debug, sqlx::FromRow)]
struct StartupRow {
    id: StartupId,
    company_name: String,
    founder_name: String,
    email: String,
    phone: Option<String>,
    website: Option<String>,
    industry: String,
    stage: String,
    funding_amount: Decimal,
    description: String,
    location: Option<String>,
    team_size: Option<i32>,
    revenue: Option<Decimal>,
    founded: Option<i32>,
    linkedin: Option<String>,
    business_model: Option<String>,
    target_market: Option<String>,
    use_of_funds: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn corrupt(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::DataCorruption(e.to_string())
}

impl TryFrom<StartupRow> for Startup {
    type Error = RepositoryError;

    fn try_from(row: StartupRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let business_model = row
            .business_model
            .as_deref()
            .map(BusinessModel::parse)
            .transpose()
            .map_err(corrupt)?;

        Ok(Self {
            id: row.id,
            company_name: row.company_name,
            founder_name: row.founder_name,
            email,
            phone: row.phone,
            website: row.website,
            industry: Industry::parse(&row.industry).map_err(corrupt)?,
            stage: StartupStage::parse(&row.stage).map_err(corrupt)?,
            funding_amount: row.funding_amount,
            description: row.description,
            location: row.location,
            team_size: row.team_size,
            revenue: row.revenue,
            founded: row.founded,
            linkedin: row.linkedin,
            business_model,
            target_market: row.target_market,
            use_of_funds: row.use_of_funds,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for startup profiles.
pub struct StartupRepository<'a> {
    store: &'a ProfileStore,
}

impl<'a> StartupRepository<'a> {
    /// Create a new startup repository.
    #[must_use]
    pub const fn new(store: &'a ProfileStore) -> Self {
        Self { store }
    }

    /// Insert a fully-formed startup record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Check` if a table constraint rejects the row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, startup: &Startup) -> Result<Startup, RepositoryError> {
        match self.store {
            ProfileStore::Postgres(pool) => insert_pg(pool, startup).await,
            ProfileStore::Memory(memory) => memory.insert_startup(startup.clone()).await,
        }
    }

    /// List active startups, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_active(&self) -> Result<Vec<Startup>, RepositoryError> {
        match self.store {
            ProfileStore::Postgres(pool) => {
                let rows = sqlx::query_as::<_, StartupRow>(
                    r"
                    SELECT id, company_name, founder_name, email, phone, website,
                           industry, stage, funding_amount, description, location,
                           team_size, revenue, founded, linkedin, business_model,
                           target_market, use_of_funds, is_active, created_at, updated_at
                    FROM startup
                    WHERE is_active
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(pool)
                .await?;

                rows.into_iter().map(Startup::try_from).collect()
            }
            ProfileStore::Memory(memory) => Ok(memory.list_startups().await),
        }
    }

    /// Get a startup by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: StartupId) -> Result<Option<Startup>, RepositoryError> {
        match self.store {
            ProfileStore::Postgres(pool) => {
                let row = sqlx::query_as::<_, StartupRow>(
                    r"
                    SELECT id, company_name, founder_name, email, phone, website,
                           industry, stage, funding_amount, description, location,
                           team_size, revenue, founded, linkedin, business_model,
                           target_market, use_of_funds, is_active, created_at, updated_at
                    FROM startup
                    WHERE id = $1
                    ",
                )
                .bind(id)
                .fetch_optional(pool)
                .await?;

                row.map(Startup::try_from).transpose()
            }
            ProfileStore::Memory(memory) => Ok(memory.get_startup(id).await),
        }
    }
}

async fn insert_pg(pool: &PgPool, startup: &Startup) -> Result<Startup, RepositoryError> {
    let row = sqlx::query_as::<_, StartupRow>(
        r"
        INSERT INTO startup (
            id, company_name, founder_name, email, phone, website,
            industry, stage, funding_amount, description, location,
            team_size, revenue, founded, linkedin, business_model,
            target_market, use_of_funds, is_active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21)
        RETURNING id, company_name, founder_name, email, phone, website,
                  industry, stage, funding_amount, description, location,
                  team_size, revenue, founded, linkedin, business_model,
                  target_market, use_of_funds, is_active, created_at, updated_at
        ",
    )
    .bind(startup.id)
    .bind(&startup.company_name)
    .bind(&startup.founder_name)
    .bind(&startup.email)
    .bind(&startup.phone)
    .bind(&startup.website)
    .bind(startup.industry.as_str())
    .bind(startup.stage.as_str())
    .bind(startup.funding_amount)
    .bind(&startup.description)
    .bind(&startup.location)
    .bind(startup.team_size)
    .bind(startup.revenue)
    .bind(startup.founded)
    .bind(&startup.linkedin)
    .bind(startup.business_model.map(BusinessModel::as_str))
    .bind(&startup.target_market)
    .bind(&startup.use_of_funds)
    .bind(startup.is_active)
    .bind(startup.created_at)
    .bind(startup.updated_at)
    .fetch_one(pool)
    .await
    .map_err(classify_write_error)?;

    Startup::try_from(row)
}
