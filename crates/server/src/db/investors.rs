//! Investor profile repository.
//!
//! `PostgreSQL` queries are built at runtime with `sqlx::query_as` and decoded
//! through an internal row type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use onboarding_core::{Email, InvestmentStage, Investor, InvestorId, Sector, Tag};

use super::{ProfileStore, RepositoryError, classify_write_error};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` investor queries.
#[derive(Debug, sqlx::FromRow)]
struct InvestorRow {
    id: InvestorId,
    name: String,
    email: String,
    phone: Option<String>,
    company: String,
    title: Option<String>,
    investment_focus: Vec<String>,
    minimum_investment: Decimal,
    maximum_investment: Decimal,
    preferred_stage: String,
    geography: Option<String>,
    linkedin: Option<String>,
    bio: Option<String>,
    accredited_investor: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvestorRow> for Investor {
    type Error = RepositoryError;

    fn try_from(row: InvestorRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let investment_focus = row
            .investment_focus
            .iter()
            .map(|s| Sector::parse(s))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let preferred_stage = InvestmentStage::parse(&row.preferred_stage)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            phone: row.phone,
            company: row.company,
            title: row.title,
            investment_focus,
            minimum_investment: row.minimum_investment,
            maximum_investment: row.maximum_investment,
            preferred_stage,
            geography: row.geography,
            linkedin: row.linkedin,
            bio: row.bio,
            accredited_investor: row.accredited_investor,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for investor profiles.
pub struct InvestorRepository<'a> {
    store: &'a ProfileStore,
}

impl<'a> InvestorRepository<'a> {
    /// Create a new investor repository.
    #[must_use]
    pub const fn new(store: &'a ProfileStore) -> Self {
        Self { store }
    }

    /// Insert a fully-formed investor record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Check` if a table constraint rejects the row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, investor: &Investor) -> Result<Investor, RepositoryError> {
        match self.store {
            ProfileStore::Postgres(pool) => insert_pg(pool, investor).await,
            ProfileStore::Memory(memory) => memory.insert_investor(investor.clone()).await,
        }
    }

    /// List active investors, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_active(&self) -> Result<Vec<Investor>, RepositoryError> {
        match self.store {
            ProfileStore::Postgres(pool) => {
                let rows = sqlx::query_as::<_, InvestorRow>(
                    r"
                    SELECT id, name, email, phone, company, title, investment_focus,
                           minimum_investment, maximum_investment, preferred_stage,
                           geography, linkedin, bio, accredited_investor, is_active,
                           created_at, updated_at
                    FROM investor
                    WHERE is_active
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(pool)
                .await?;

                rows.into_iter().map(Investor::try_from).collect()
            }
            ProfileStore::Memory(memory) => Ok(memory.list_investors().await),
        }
    }

    /// Get an investor by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: InvestorId) -> Result<Option<Investor>, RepositoryError> {
        match self.store {
            ProfileStore::Postgres(pool) => {
                let row = sqlx::query_as::<_, InvestorRow>(
                    r"
                    SELECT id, name, email, phone, company, title, investment_focus,
                           minimum_investment, maximum_investment, preferred_stage,
                           geography, linkedin, bio, accredited_investor, is_active,
                           created_at, updated_at
                    FROM investor
                    WHERE id = $1
                    ",
                )
                .bind(id)
                .fetch_optional(pool)
                .await?;

                row.map(Investor::try_from).transpose()
            }
            ProfileStore::Memory(memory) => Ok(memory.get_investor(id).await),
        }
    }
}

async fn insert_pg(pool: &PgPool, investor: &Investor) -> Result<Investor, RepositoryError> {
    let focus: Vec<String> = investor
        .investment_focus
        .iter()
        .map(|sector| sector.as_str().to_owned())
        .collect();

    let row = sqlx::query_as::<_, InvestorRow>(
        r"
        INSERT INTO investor (
            id, name, email, phone, company, title, investment_focus,
            minimum_investment, maximum_investment, preferred_stage,
            geography, linkedin, bio, accredited_investor, is_active,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING id, name, email, phone, company, title, investment_focus,
                  minimum_investment, maximum_investment, preferred_stage,
                  geography, linkedin, bio, accredited_investor, is_active,
                  created_at, updated_at
        ",
    )
    .bind(investor.id)
    .bind(&investor.name)
    .bind(&investor.email)
    .bind(&investor.phone)
    .bind(&investor.company)
    .bind(&investor.title)
    .bind(focus)
    .bind(investor.minimum_investment)
    .bind(investor.maximum_investment)
    .bind(investor.preferred_stage.as_str())
    .bind(&investor.geography)
    .bind(&investor.linkedin)
    .bind(&investor.bio)
    .bind(investor.accredited_investor)
    .bind(investor.is_active)
    .bind(investor.created_at)
    .bind(investor.updated_at)
    .fetch_one(pool)
    .await
    .map_err(classify_write_error)?;

    Investor::try_from(row)
}
