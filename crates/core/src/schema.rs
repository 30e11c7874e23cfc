//! Declarative field rules shared by the client validator, the request
//! validator and the persistence gateway.
//!
//! Field names are the camelCase wire names. Messages are the text shown to
//! the person filling the form.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use url::Url;

/// Bounds on a free-text field, measured in characters after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    pub field: &'static str,
    pub min: usize,
    pub max: usize,
    pub message: &'static str,
}

impl TextRule {
    /// `true` when the trimmed length is within bounds.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let len = value.trim().chars().count();
        len >= self.min && len <= self.max
    }
}

/// A non-negative decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRule {
    pub field: &'static str,
    pub message: &'static str,
}

/// An integer with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRule {
    pub field: &'static str,
    pub min: i64,
    pub max: i64,
    pub message: &'static str,
}

impl IntRule {
    /// `true` when `value` is within the inclusive bounds.
    #[must_use]
    pub const fn accepts(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A field checked for shape (email, phone, URL) with a stored length cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRule {
    pub field: &'static str,
    pub max: usize,
    pub message: &'static str,
}

/// A field whose value must be one member of a fixed tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceRule {
    pub field: &'static str,
    pub message: &'static str,
}

/// Longest phone number the store keeps.
pub const PHONE_MAX_LEN: usize = 20;

/// Longest URL the store keeps.
pub const URL_MAX_LEN: usize = 200;

/// Investor profile rules.
pub mod investor {
    use super::{AmountRule, ChoiceRule, FormatRule, PHONE_MAX_LEN, TextRule, URL_MAX_LEN};

    pub const NAME: TextRule = TextRule {
        field: "name",
        min: 2,
        max: 100,
        message: "Name must be between 2 and 100 characters",
    };
    pub const EMAIL: FormatRule = FormatRule {
        field: "email",
        max: crate::Email::MAX_LENGTH,
        message: "Please provide a valid email address",
    };
    pub const PHONE: FormatRule = FormatRule {
        field: "phone",
        max: PHONE_MAX_LEN,
        message: "Please provide a valid phone number",
    };
    pub const COMPANY: TextRule = TextRule {
        field: "company",
        min: 2,
        max: 100,
        message: "Company name must be between 2 and 100 characters",
    };
    pub const TITLE: TextRule = TextRule {
        field: "title",
        min: 0,
        max: 100,
        message: "Title must be less than 100 characters",
    };
    pub const INVESTMENT_FOCUS: ChoiceRule = ChoiceRule {
        field: "investmentFocus",
        message: "At least one investment focus must be selected",
    };
    pub const INVESTMENT_FOCUS_MEMBER: &str = "Please select valid investment focus sectors";
    pub const MINIMUM_INVESTMENT: AmountRule = AmountRule {
        field: "minimumInvestment",
        message: "Minimum investment must be a positive number",
    };
    pub const MAXIMUM_INVESTMENT: AmountRule = AmountRule {
        field: "maximumInvestment",
        message: "Maximum investment must be a positive number",
    };
    pub const INVESTMENT_RANGE: &str = "Maximum investment must be greater than minimum investment";
    pub const PREFERRED_STAGE: ChoiceRule = ChoiceRule {
        field: "preferredStage",
        message: "Please select a valid preferred stage",
    };
    pub const GEOGRAPHY: TextRule = TextRule {
        field: "geography",
        min: 0,
        max: 200,
        message: "Geography must be less than 200 characters",
    };
    pub const LINKEDIN: FormatRule = FormatRule {
        field: "linkedin",
        max: URL_MAX_LEN,
        message: "Please provide a valid LinkedIn URL",
    };
    pub const BIO: TextRule = TextRule {
        field: "bio",
        min: 0,
        max: 1000,
        message: "Bio must be less than 1000 characters",
    };
    pub const ACCREDITED_INVESTOR: ChoiceRule = ChoiceRule {
        field: "accreditedInvestor",
        message: "Accredited investor must be a boolean value",
    };
}

/// Startup profile rules.
pub mod startup {
    use super::{
        AmountRule, ChoiceRule, FormatRule, IntRule, PHONE_MAX_LEN, TextRule, URL_MAX_LEN,
    };

    pub const COMPANY_NAME: TextRule = TextRule {
        field: "companyName",
        min: 2,
        max: 100,
        message: "Company name must be between 2 and 100 characters",
    };
    pub const FOUNDER_NAME: TextRule = TextRule {
        field: "founderName",
        min: 2,
        max: 100,
        message: "Founder name must be between 2 and 100 characters",
    };
    pub const EMAIL: FormatRule = FormatRule {
        field: "email",
        max: crate::Email::MAX_LENGTH,
        message: "Please provide a valid email address",
    };
    pub const PHONE: FormatRule = FormatRule {
        field: "phone",
        max: PHONE_MAX_LEN,
        message: "Please provide a valid phone number",
    };
    pub const WEBSITE: FormatRule = FormatRule {
        field: "website",
        max: URL_MAX_LEN,
        message: "Please provide a valid website URL",
    };
    pub const INDUSTRY: ChoiceRule = ChoiceRule {
        field: "industry",
        message: "Please select a valid industry",
    };
    pub const STAGE: ChoiceRule = ChoiceRule {
        field: "stage",
        message: "Please select a valid stage",
    };
    pub const FUNDING_AMOUNT: AmountRule = AmountRule {
        field: "fundingAmount",
        message: "Funding amount must be a positive number",
    };
    pub const DESCRIPTION: TextRule = TextRule {
        field: "description",
        min: 10,
        max: 2000,
        message: "Description must be between 10 and 2000 characters",
    };
    pub const LOCATION: TextRule = TextRule {
        field: "location",
        min: 0,
        max: 100,
        message: "Location must be less than 100 characters",
    };
    pub const TEAM_SIZE: IntRule = IntRule {
        field: "teamSize",
        min: 1,
        max: 10_000,
        message: "Team size must be between 1 and 10000",
    };
    pub const REVENUE: AmountRule = AmountRule {
        field: "revenue",
        message: "Revenue must be a positive number",
    };
    pub const FOUNDED_MIN: i64 = 1900;
    pub const FOUNDED_MESSAGE: &str = "Founded year must be between 1900 and current year";
    pub const LINKEDIN: FormatRule = FormatRule {
        field: "linkedin",
        max: URL_MAX_LEN,
        message: "Please provide a valid LinkedIn URL",
    };
    pub const BUSINESS_MODEL: ChoiceRule = ChoiceRule {
        field: "businessModel",
        message: "Please select a valid business model",
    };
    pub const TARGET_MARKET: TextRule = TextRule {
        field: "targetMarket",
        min: 0,
        max: 300,
        message: "Target market must be less than 300 characters",
    };
    pub const USE_OF_FUNDS: TextRule = TextRule {
        field: "useOfFunds",
        min: 0,
        max: 1000,
        message: "Use of funds must be less than 1000 characters",
    };

    /// Founding year bounds: 1900 through the current UTC year.
    #[must_use]
    pub fn founded() -> IntRule {
        IntRule {
            field: "founded",
            min: FOUNDED_MIN,
            max: i64::from(super::current_year()),
            message: FOUNDED_MESSAGE,
        }
    }
}

/// The current calendar year in UTC.
#[must_use]
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Loose `local@domain.tld` shape the client checks before submitting.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// `true` when `value` has the loose `local@domain.tld` shape.
///
/// This is the client's pre-submit check; the server applies the stricter
/// [`crate::Email::parse`].
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// `true` when `value` looks like a phone number: an optional leading `+`,
/// 7-15 digits, and only space, `-`, `.`, `(`, `)` as separators.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > PHONE_MAX_LEN {
        return false;
    }

    let body = value.strip_prefix('+').unwrap_or(value);
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '(') {
        return false;
    }

    let mut digits = 0_usize;
    for c in body.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !matches!(c, ' ' | '-' | '.' | '(' | ')') {
            return false;
        }
    }

    (7..=15).contains(&digits)
}

/// `true` when `value` is an http(s) URL with a dotted host name.
///
/// A bare `host.tld/path` without a scheme is read as https.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    let candidate = if value.contains("://") {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("https://{value}"))
    };

    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let Some(host) = url.host_str() else {
        return false;
    };

    let labels: Vec<&str> = host.split('.').collect();
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty()) && tld_ok
}
