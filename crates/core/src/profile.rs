//! Profile records.
//!
//! `New*` types are validated submissions that have not been stored yet;
//! [`Investor`] and [`Startup`] are stored records with identity and
//! timestamps. Both serialize in the camelCase wire form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    BusinessModel, Email, Industry, InvestmentStage, InvestorId, Sector, StartupId, StartupStage,
};

/// A validated investor submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestor {
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub investment_focus: Vec<Sector>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub minimum_investment: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub maximum_investment: Decimal,
    pub preferred_stage: InvestmentStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub accredited_investor: bool,
}

/// A stored investor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: InvestorId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub investment_focus: Vec<Sector>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub minimum_investment: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub maximum_investment: Decimal,
    pub preferred_stage: InvestmentStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub accredited_investor: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewInvestor {
    /// Turn the submission into an active record created at `now`.
    #[must_use]
    pub fn into_record(self, id: InvestorId, now: DateTime<Utc>) -> Investor {
        Investor {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            title: self.title,
            investment_focus: self.investment_focus,
            minimum_investment: self.minimum_investment,
            maximum_investment: self.maximum_investment,
            preferred_stage: self.preferred_stage,
            geography: self.geography,
            linkedin: self.linkedin,
            bio: self.bio,
            accredited_investor: self.accredited_investor,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Investor {
    /// Refresh `updated_at`; call on every mutation before saving.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// A validated startup submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStartup {
    pub company_name: String,
    pub founder_name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub industry: Industry,
    pub stage: StartupStage,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub funding_amount: Decimal,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<BusinessModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_of_funds: Option<String>,
}

/// A stored startup profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Startup {
    pub id: StartupId,
    pub company_name: String,
    pub founder_name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub industry: Industry,
    pub stage: StartupStage,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub funding_amount: Decimal,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<BusinessModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_of_funds: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewStartup {
    /// Turn the submission into an active record created at `now`.
    #[must_use]
    pub fn into_record(self, id: StartupId, now: DateTime<Utc>) -> Startup {
        Startup {
            id,
            company_name: self.company_name,
            founder_name: self.founder_name,
            email: self.email,
            phone: self.phone,
            website: self.website,
            industry: self.industry,
            stage: self.stage,
            funding_amount: self.funding_amount,
            description: self.description,
            location: self.location,
            team_size: self.team_size,
            revenue: self.revenue,
            founded: self.founded,
            linkedin: self.linkedin,
            business_model: self.business_model,
            target_market: self.target_market,
            use_of_funds: self.use_of_funds,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Startup {
    /// Refresh `updated_at`; call on every mutation before saving.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    fn new_investor() -> NewInvestor {
        NewInvestor {
            name: "Jane Doe".to_owned(),
            email: Email::parse("jane@x.com").unwrap(),
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

    #[test]
    fn test_record_starts_active_with_equal_timestamps() {
        let now = Utc::now();
        let record = new_investor().into_record(InvestorId::new_v4(), now);

        assert!(record.is_active);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn test_touch_only_moves_updated_at() {
        let now = Utc::now();
        let mut record = new_investor().into_record(InvestorId::new_v4(), now);

        let later = now + Duration::seconds(5);
        record.touch(later);

        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, later);
    }

    #[test]
    fn test_wire_shape_is_camel_case_with_numeric_amounts() {
        let record = new_investor().into_record(InvestorId::new_v4(), Utc::now());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["investmentFocus"], json!(["SaaS"]));
        assert_eq!(value["preferredStage"], json!("Seed"));
        assert_eq!(value["minimumInvestment"].as_f64(), Some(10_000.0));
        assert_eq!(value["isActive"], json!(true));
        assert!(value.get("phone").is_none());
        assert!(value.get("__v").is_none());
    }

    #[test]
    fn test_large_amounts_roundtrip_exactly() {
        let mut new = new_investor();
        new.minimum_investment = Decimal::from_str_exact("10000000000000000.01").unwrap();
        new.maximum_investment = Decimal::from_str_exact("10000000000000000.02").unwrap();
        let record = new.into_record(InvestorId::new_v4(), Utc::now());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""minimumInvestment":10000000000000000.01"#));
        assert!(json.contains(r#""maximumInvestment":10000000000000000.02"#));

        let parsed: Investor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.minimum_investment < parsed.maximum_investment);
    }

    #[test]
    fn test_stored_startup_roundtrips_through_json() {
        let startup = NewStartup {
            company_name: "Acme Robotics".to_owned(),
            founder_name: "Sam Lee".to_owned(),
            email: Email::parse("sam@acme.io").unwrap(),
            phone: None,
            website: Some("https://acme.io".to_owned()),
            industry: Industry::Technology,
            stage: StartupStage::Idea,
            funding_amount: Decimal::from(250_000),
            description: "Robots that fold laundry.".to_owned(),
            location: None,
            team_size: Some(4),
            revenue: Some(Decimal::from(1_200)),
            founded: Some(2024),
            linkedin: None,
            business_model: Some(BusinessModel::B2C),
            target_market: None,
            use_of_funds: None,
        }
        .into_record(StartupId::new_v4(), Utc::now());

        let json = serde_json::to_string(&startup).unwrap();
        let parsed: Startup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, startup);
    }
}
