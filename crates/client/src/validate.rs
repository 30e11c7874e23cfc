//! Local form checks run before a submission is sent.
//!
//! These are deliberately lighter than the server's rules: they catch empty
//! required inputs and an obviously malformed email so the person gets
//! instant feedback. Length bounds, tag membership, number parsing and the
//! investment range are left to the server, whose field errors are shown
//! the same way.

use onboarding_core::FieldErrors;
use onboarding_core::schema::looks_like_email;

use crate::form::{InvestorForm, StartupForm};

/// Message for an email that does not look like `local@domain.tld`.
pub const EMAIL_SHAPE_MESSAGE: &str = "Please enter a valid email address";

/// Message for an investor form with no focus sector ticked.
pub const FOCUS_REQUIRED_MESSAGE: &str = "Please select at least one investment focus";

/// Collects one message per field.
struct Checks(FieldErrors);

impl Checks {
    const fn new() -> Self {
        Self(FieldErrors::new())
    }

    /// Text inputs count as empty when only whitespace was typed.
    fn text(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
    }

    /// Selects and number inputs only count as empty when nothing was entered.
    fn selected(&mut self, field: &str, value: &str, message: &str) {
        if value.is_empty() {
            self.fail(field, message);
        }
    }

    /// The shape check overrides the required message when anything at all
    /// was typed, including whitespace.
    fn email(&mut self, value: &str) {
        self.text("email", value, "Email is required");
        if !value.is_empty() && !looks_like_email(value) {
            self.fail("email", EMAIL_SHAPE_MESSAGE);
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

/// Local checks for the investor form.
#[must_use]
pub fn validate_investor_form(form: &InvestorForm) -> FieldErrors {
    let mut checks = Checks::new();

    checks.text("name", &form.name, "Name is required");
    checks.text("company", &form.company, "Company is required");
    checks.selected(
        "minimumInvestment",
        &form.minimum_investment,
        "Minimum investment is required",
    );
    checks.selected(
        "maximumInvestment",
        &form.maximum_investment,
        "Maximum investment is required",
    );
    checks.selected(
        "preferredStage",
        &form.preferred_stage,
        "Preferred stage is required",
    );
    if form.investment_focus.is_empty() {
        checks.fail("investmentFocus", FOCUS_REQUIRED_MESSAGE);
    }
    checks.email(&form.email);

    checks.0
}

/// Local checks for the startup form.
#[must_use]
pub fn validate_startup_form(form: &StartupForm) -> FieldErrors {
    let mut checks = Checks::new();

    checks.text("companyName", &form.company_name, "Company name is required");
    checks.text("founderName", &form.founder_name, "Founder name is required");
    checks.selected("industry", &form.industry, "Industry is required");
    checks.selected("stage", &form.stage, "Stage is required");
    checks.selected(
        "fundingAmount",
        &form.funding_amount,
        "Funding amount is required",
    );
    checks.text("description", &form.description, "Description is required");
    checks.email(&form.email);

    checks.0
}
