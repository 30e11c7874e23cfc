//! Form models for the two onboarding personas.
//!
//! Forms hold exactly what a person typed: every text input is a `String`
//! (possibly blank), the focus checkboxes are a list, and the accreditation
//! checkbox is a `bool`. Interpreting those values is the server's job; the
//! client only runs the quick checks in [`crate::validate`].

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use onboarding_core::api::{InvestorEnvelope, StartupEnvelope};
use onboarding_core::{FieldErrors, Investor, Payload, Persona, Startup, clean_payload};

use crate::validate::{validate_investor_form, validate_startup_form};

/// Behaviour shared by the investor and startup forms.
pub trait ProfileForm: Default + Serialize {
    /// Which persona this form onboards.
    const PERSONA: Persona;

    /// Response body of a successful create.
    type Envelope: DeserializeOwned;

    /// The stored profile returned by the server.
    type Record;

    /// Run the local checks. An empty map means the form may be submitted.
    fn validate(&self) -> FieldErrors;

    /// Set one input by its wire name. Returns `false` for unknown fields.
    ///
    /// List inputs toggle `value` in or out; checkbox inputs read `"true"`.
    fn set_field(&mut self, field: &str, value: &str) -> bool;

    /// Extract the stored profile from a create response.
    fn into_record(envelope: Self::Envelope) -> Self::Record;

    /// The request body: every input in camelCase with blank text dropped.
    fn to_payload(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => clean_payload(&map),
            _ => Payload::new(),
        }
    }
}

// =============================================================================
// Investor
// =============================================================================

/// The investor onboarding form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub title: String,
    pub investment_focus: Vec<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub minimum_investment: String,
    #[serde(deserialize_with = "text_or_number")]
    pub maximum_investment: String,
    pub preferred_stage: String,
    pub geography: String,
    pub linkedin: String,
    pub bio: String,
    pub accredited_investor: bool,
}

impl InvestorForm {
    /// Tick or untick one investment focus sector, keeping tick order.
    pub fn toggle_focus(&mut self, sector: &str) {
        if let Some(pos) = self.investment_focus.iter().position(|s| s == sector) {
            self.investment_focus.remove(pos);
        } else {
            self.investment_focus.push(sector.to_string());
        }
    }
}

impl ProfileForm for InvestorForm {
    const PERSONA: Persona = Persona::Investor;
    type Envelope = InvestorEnvelope;
    type Record = Investor;

    fn validate(&self) -> FieldErrors {
        validate_investor_form(self)
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "company" => &mut self.company,
            "title" => &mut self.title,
            "minimumInvestment" => &mut self.minimum_investment,
            "maximumInvestment" => &mut self.maximum_investment,
            "preferredStage" => &mut self.preferred_stage,
            "geography" => &mut self.geography,
            "linkedin" => &mut self.linkedin,
            "bio" => &mut self.bio,
            "investmentFocus" => {
                self.toggle_focus(value);
                return true;
            }
            "accreditedInvestor" => {
                self.accredited_investor = value == "true";
                return true;
            }
            _ => return false,
        };
        value.clone_into(slot);
        true
    }

    fn into_record(envelope: InvestorEnvelope) -> Investor {
        envelope.investor
    }
}

// =============================================================================
// Startup
// =============================================================================

/// The startup onboarding form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartupForm {
    pub company_name: String,
    pub founder_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub industry: String,
    pub stage: String,
    #[serde(deserialize_with = "text_or_number")]
    pub funding_amount: String,
    pub description: String,
    pub location: String,
    #[serde(deserialize_with = "text_or_number")]
    pub team_size: String,
    #[serde(deserialize_with = "text_or_number")]
    pub revenue: String,
    #[serde(deserialize_with = "text_or_number")]
    pub founded: String,
    pub linkedin: String,
    pub business_model: String,
    pub target_market: String,
    pub use_of_funds: String,
}

impl ProfileForm for StartupForm {
    const PERSONA: Persona = Persona::Startup;
    type Envelope = StartupEnvelope;
    type Record = Startup;

    fn validate(&self) -> FieldErrors {
        validate_startup_form(self)
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "companyName" => &mut self.company_name,
            "founderName" => &mut self.founder_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "website" => &mut self.website,
            "industry" => &mut self.industry,
            "stage" => &mut self.stage,
            "fundingAmount" => &mut self.funding_amount,
            "description" => &mut self.description,
            "location" => &mut self.location,
            "teamSize" => &mut self.team_size,
            "revenue" => &mut self.revenue,
            "founded" => &mut self.founded,
            "linkedin" => &mut self.linkedin,
            "businessModel" => &mut self.business_model,
            "targetMarket" => &mut self.target_market,
            "useOfFunds" => &mut self.use_of_funds,
            _ => return false,
        };
        value.clone_into(slot);
        true
    }

    fn into_record(envelope: StartupEnvelope) -> Startup {
        envelope.startup
    }
}

/// Number inputs saved to a file may be JSON numbers; the form keeps text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected text or a number, got {other}"
        ))),
    }
}

// =============================================================================
// Form state
// =============================================================================

/// A form together with its current field errors and submit flag.
#[derive(Debug, Clone, Default)]
pub struct FormState<F> {
    form: F,
    errors: FieldErrors,
    submitting: bool,
}

impl<F: ProfileForm> FormState<F> {
    /// An empty form with no errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already filled form.
    #[must_use]
    pub fn from_form(form: F) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    /// The current inputs.
    #[must_use]
    pub const fn form(&self) -> &F {
        &self.form
    }

    /// Every field error currently shown.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error shown for one field, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// `true` while a submission is in flight. Advisory only.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Set one input by wire name and clear that field's error.
    ///
    /// Returns `false`, changing nothing, when the field is unknown.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let known = self.form.set_field(field, value);
        if known {
            self.errors.remove(field);
        }
        known
    }

    /// Edit the form directly, clearing the error on `field`.
    pub fn edit(&mut self, field: &str, change: impl FnOnce(&mut F)) {
        change(&mut self.form);
        self.errors.remove(field);
    }

    /// Recompute every local error from scratch. Returns `true` when the
    /// form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = self.form.validate();
        self.errors.is_empty()
    }

    pub(crate) const fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn end_submit(&mut self, errors: FieldErrors) {
        self.submitting = false;
        self.errors = errors;
    }
}
