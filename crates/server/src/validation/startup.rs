//! Startup submission validation.

use onboarding_core::schema::startup as rules;
use onboarding_core::{
    BusinessModel, Industry, NewStartup, Payload, StartupStage, ValidationErrors,
};

use super::FieldReader;

/// Validate a raw startup payload.
///
/// # Errors
///
/// Returns every violated rule, in field order, when any field is invalid.
pub fn validate_startup(raw: &Payload) -> Result<NewStartup, ValidationErrors> {
    let mut fields = FieldReader::new(raw);

    let company_name = fields.required_text(&rules::COMPANY_NAME);
    let founder_name = fields.required_text(&rules::FOUNDER_NAME);
    let email = fields.email(&rules::EMAIL);
    let phone = fields.phone(&rules::PHONE);
    let website = fields.url(&rules::WEBSITE);
    let industry = fields.required_choice::<Industry>(&rules::INDUSTRY);
    let stage = fields.required_choice::<StartupStage>(&rules::STAGE);
    let funding_amount = fields.required_amount(&rules::FUNDING_AMOUNT);
    let description = fields.required_text(&rules::DESCRIPTION);
    let location = fields.text(&rules::LOCATION);
    let team_size = fields.integer(&rules::TEAM_SIZE);
    let revenue = fields.amount(&rules::REVENUE);
    let founded = fields.integer(&rules::founded());
    let linkedin = fields.url(&rules::LINKEDIN);
    let business_model = fields.choice::<BusinessModel>(&rules::BUSINESS_MODEL);
    let target_market = fields.text(&rules::TARGET_MARKET);
    let use_of_funds = fields.text(&rules::USE_OF_FUNDS);

    let errors = fields.finish();
    match (
        company_name,
        founder_name,
        email,
        industry,
        stage,
        funding_amount,
        description,
    ) {
        (
            Some(company_name),
            Some(founder_name),
            Some(email),
            Some(industry),
            Some(stage),
            Some(funding_amount),
            Some(description),
        ) if errors.is_empty() => Ok(NewStartup {
            company_name,
            founder_name,
            email,
            phone,
            website,
            industry,
            stage,
            funding_amount,
            description,
            location,
            team_size,
            revenue,
            founded,
            linkedin,
            business_model,
            target_market,
            use_of_funds,
        }),
        _ => Err(errors),
    }
}
