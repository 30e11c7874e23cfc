//! Persistence gateway.
//!
//! Sits between the request validator and the profile store. Record-level
//! rules are re-checked here as explicit functions so that nothing reaches
//! the store without passing them, whatever produced the `New*` value.
//! Timestamps are stamped here too, immediately before the insert.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use onboarding_core::schema::{FormatRule, TextRule, investor as inv, startup as st};
use onboarding_core::{
    Investor, InvestorId, NewInvestor, NewStartup, Persona, Startup, StartupId, ValidationErrors,
};

use crate::db::{ProfileStore, RepositoryError};

/// Why a profile could not be stored.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A record-level rule rejected the profile.
    #[error("record rejected: {0}")]
    Validation(ValidationErrors),

    /// A profile of this persona already uses the unique `field`.
    #[error("{persona} with this {field} already exists")]
    Conflict {
        persona: Persona,
        field: &'static str,
    },

    /// The store failed for reasons unrelated to the profile.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl GatewayError {
    fn from_repository(persona: Persona, err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict { field } => Self::Conflict { persona, field },
            RepositoryError::Check { field, message } => {
                let mut errors = ValidationErrors::new();
                errors.push(field, message);
                Self::Validation(errors)
            }
            other => Self::Repository(other),
        }
    }
}

/// Check, stamp and store a new investor.
///
/// # Errors
///
/// Returns `GatewayError::Validation` if a record-level rule fails,
/// `GatewayError::Conflict` if the email is taken, and
/// `GatewayError::Repository` if the store fails.
#[tracing::instrument(skip(store, new), fields(email = %new.email))]
pub async fn create_investor(
    store: &ProfileStore,
    new: NewInvestor,
) -> Result<Investor, GatewayError> {
    check_investor(&new)
        .into_result()
        .map_err(GatewayError::Validation)?;

    let now = Utc::now();
    let mut record = new.into_record(InvestorId::new_v4(), now);
    record.touch(now);

    let stored = store
        .investors()
        .insert(&record)
        .await
        .map_err(|e| GatewayError::from_repository(Persona::Investor, e))?;

    tracing::info!(investor_id = %stored.id, "Investor profile stored");
    Ok(stored)
}

/// Check, stamp and store a new startup.
///
/// # Errors
///
/// Returns `GatewayError::Validation` if a record-level rule fails,
/// `GatewayError::Conflict` if the email is taken, and
/// `GatewayError::Repository` if the store fails.
#[tracing::instrument(skip(store, new), fields(email = %new.email))]
pub async fn create_startup(store: &ProfileStore, new: NewStartup) -> Result<Startup, GatewayError> {
    check_startup(&new)
        .into_result()
        .map_err(GatewayError::Validation)?;

    let now = Utc::now();
    let mut record = new.into_record(StartupId::new_v4(), now);
    record.touch(now);

    let stored = store
        .startups()
        .insert(&record)
        .await
        .map_err(|e| GatewayError::from_repository(Persona::Startup, e))?;

    tracing::info!(startup_id = %stored.id, "Startup profile stored");
    Ok(stored)
}

/// Record-level rules for an investor.
#[must_use]
pub fn check_investor(new: &NewInvestor) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    required(&mut errors, &inv::NAME, &new.name);
    required(&mut errors, &inv::COMPANY, &new.company);
    optional(&mut errors, &inv::TITLE, new.title.as_deref());
    optional(&mut errors, &inv::GEOGRAPHY, new.geography.as_deref());
    optional(&mut errors, &inv::BIO, new.bio.as_deref());
    capped(&mut errors, &inv::PHONE, new.phone.as_deref());
    capped(&mut errors, &inv::LINKEDIN, new.linkedin.as_deref());

    if new.investment_focus.is_empty() {
        errors.push(inv::INVESTMENT_FOCUS.field, inv::INVESTMENT_FOCUS.message);
    }
    non_negative(
        &mut errors,
        inv::MINIMUM_INVESTMENT.field,
        inv::MINIMUM_INVESTMENT.message,
        new.minimum_investment,
    );
    non_negative(
        &mut errors,
        inv::MAXIMUM_INVESTMENT.field,
        inv::MAXIMUM_INVESTMENT.message,
        new.maximum_investment,
    );
    if new.minimum_investment >= new.maximum_investment {
        errors.push(inv::MAXIMUM_INVESTMENT.field, inv::INVESTMENT_RANGE);
    }

    errors
}

/// Record-level rules for a startup.
#[must_use]
pub fn check_startup(new: &NewStartup) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    required(&mut errors, &st::COMPANY_NAME, &new.company_name);
    required(&mut errors, &st::FOUNDER_NAME, &new.founder_name);
    required(&mut errors, &st::DESCRIPTION, &new.description);
    optional(&mut errors, &st::LOCATION, new.location.as_deref());
    optional(&mut errors, &st::TARGET_MARKET, new.target_market.as_deref());
    optional(&mut errors, &st::USE_OF_FUNDS, new.use_of_funds.as_deref());
    capped(&mut errors, &st::PHONE, new.phone.as_deref());
    capped(&mut errors, &st::WEBSITE, new.website.as_deref());
    capped(&mut errors, &st::LINKEDIN, new.linkedin.as_deref());

    non_negative(
        &mut errors,
        st::FUNDING_AMOUNT.field,
        st::FUNDING_AMOUNT.message,
        new.funding_amount,
    );
    if let Some(revenue) = new.revenue {
        non_negative(&mut errors, st::REVENUE.field, st::REVENUE.message, revenue);
    }
    if let Some(team_size) = new.team_size
        && !st::TEAM_SIZE.accepts(i64::from(team_size))
    {
        errors.push(st::TEAM_SIZE.field, st::TEAM_SIZE.message);
    }
    let founded_rule = st::founded();
    if let Some(founded) = new.founded
        && !founded_rule.accepts(i64::from(founded))
    {
        errors.push(founded_rule.field, founded_rule.message);
    }

    errors
}

fn required(errors: &mut ValidationErrors, rule: &TextRule, value: &str) {
    if !rule.accepts(value) {
        errors.push(rule.field, rule.message);
    }
}

fn optional(errors: &mut ValidationErrors, rule: &TextRule, value: Option<&str>) {
    if let Some(value) = value {
        required(errors, rule, value);
    }
}

fn capped(errors: &mut ValidationErrors, rule: &FormatRule, value: Option<&str>) {
    if value.is_some_and(|v| v.chars().count() > rule.max) {
        errors.push(rule.field, rule.message);
    }
}

fn non_negative(errors: &mut ValidationErrors, field: &str, message: &str, value: Decimal) {
    if value < Decimal::ZERO {
        errors.push(field, message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use onboarding_core::{Email, Industry, InvestmentStage, Sector, StartupStage};

    use super::*;

    fn new_investor(email: &str) -> NewInvestor {
        NewInvestor {
            name: "Jane Doe".to_owned(),
            email: Email::parse(email).unwrap(),
            phone: None,
            company: "Acme".to_owned(),
            title: None,
            investment_focus: vec![Sector::SaaS],
            minimum_investment: Decimal::from(10_000),
            maximum_investment: Decimal::from(100_000),
            preferred_stage: InvestmentStage::Seed,
            geography: None,
            linkedin: None,
            bio: None,
            accredited_investor: false,
        }
    }

    fn new_startup(email: &str) -> NewStartup {
        NewStartup {
            company_name: "Acme Robotics".to_owned(),
            founder_name: "Sam Lee".to_owned(),
            email: Email::parse(email).unwrap(),
            phone: None,
            website: None,
            industry: Industry::Technology,
            stage: StartupStage::Idea,
            funding_amount: Decimal::from(250_000),
            description: "Robots that fold laundry.".to_owned(),
            location: None,
            team_size: None,
            revenue: None,
            founded: None,
            linkedin: None,
            business_model: None,
            target_market: None,
            use_of_funds: None,
        }
    }

    #[tokio::test]
    async fn test_create_investor_stamps_and_stores() {
        let store = ProfileStore::memory();
        let stored = create_investor(&store, new_investor("jane@x.com"))
            .await
            .unwrap();

        assert!(stored.is_active);
        assert_eq!(stored.created_at, stored.updated_at);
        let fetched = store.investors().get(stored.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = ProfileStore::memory();
        create_investor(&store, new_investor("jane@x.com"))
            .await
            .unwrap();

        let err = create_investor(&store, new_investor("JANE@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Conflict {
                persona: Persona::Investor,
                field: "email"
            }
        ));
        assert_eq!(store.investors().list_active().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_email_across_personas_is_allowed() {
        let store = ProfileStore::memory();
        create_investor(&store, new_investor("dual@x.com"))
            .await
            .unwrap();
        assert!(create_startup(&store, new_startup("dual@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_range_rejected_before_store() {
        let store = ProfileStore::memory();
        let mut new = new_investor("jane@x.com");
        new.minimum_investment = Decimal::from(100_000);
        new.maximum_investment = Decimal::from(100_000);

        let err = create_investor(&store, new).await.unwrap_err();
        let GatewayError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.message_for("maximumInvestment"),
            Some("Maximum investment must be greater than minimum investment")
        );
        assert!(store.investors().list_active().await.unwrap().is_empty());
    }

    #[test]
    fn test_check_startup_bounds() {
        let mut new = new_startup("sam@acme.io");
        new.team_size = Some(0);
        new.founded = Some(1850);
        new.revenue = Some(Decimal::from(-5));
        new.description = "short".to_owned();

        let errors = check_startup(&new);
        assert!(errors.has_field("teamSize"));
        assert!(errors.has_field("founded"));
        assert!(errors.has_field("revenue"));
        assert!(errors.has_field("description"));
    }

    #[test]
    fn test_check_investor_caps_stored_lengths() {
        let mut new = new_investor("jane@x.com");
        new.linkedin = Some(format!("https://linkedin.com/in/{}", "x".repeat(200)));
        new.bio = Some("b".repeat(1001));

        let errors = check_investor(&new);
        assert!(errors.has_field("linkedin"));
        assert!(errors.has_field("bio"));
    }

    #[test]
    fn test_conflict_message() {
        let err = GatewayError::Conflict {
            persona: Persona::Startup,
            field: "email",
        };
        assert_eq!(err.to_string(), "startup with this email already exists");
    }
}
