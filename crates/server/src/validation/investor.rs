//! Investor submission validation.

use onboarding_core::schema::investor as rules;
use onboarding_core::{InvestmentStage, NewInvestor, Payload, Sector, ValidationErrors};

use super::FieldReader;

/// Validate a raw investor payload.
///
/// # Errors
///
/// Returns every violated rule, in field order, when any field is invalid.
/// The range check (`maximumInvestment` greater than `minimumInvestment`)
/// only runs when both amounts parsed.
pub fn validate_investor(raw: &Payload) -> Result<NewInvestor, ValidationErrors> {
    let mut fields = FieldReader::new(raw);

    let name = fields.required_text(&rules::NAME);
    let email = fields.email(&rules::EMAIL);
    let phone = fields.phone(&rules::PHONE);
    let company = fields.required_text(&rules::COMPANY);
    let title = fields.text(&rules::TITLE);
    let investment_focus =
        fields.tag_list::<Sector>(&rules::INVESTMENT_FOCUS, rules::INVESTMENT_FOCUS_MEMBER);
    let minimum_investment = fields.required_amount(&rules::MINIMUM_INVESTMENT);
    let maximum_investment = fields.required_amount(&rules::MAXIMUM_INVESTMENT);
    let preferred_stage = fields.required_choice::<InvestmentStage>(&rules::PREFERRED_STAGE);
    let geography = fields.text(&rules::GEOGRAPHY);
    let linkedin = fields.url(&rules::LINKEDIN);
    let bio = fields.text(&rules::BIO);
    let accredited_investor = fields.boolean(&rules::ACCREDITED_INVESTOR);

    if let (Some(min), Some(max)) = (minimum_investment, maximum_investment)
        && max <= min
    {
        fields.reject(rules::MAXIMUM_INVESTMENT.field, rules::INVESTMENT_RANGE);
    }

    let errors = fields.finish();
    match (
        name,
        email,
        company,
        investment_focus,
        minimum_investment,
        maximum_investment,
        preferred_stage,
    ) {
        (
            Some(name),
            Some(email),
            Some(company),
            Some(investment_focus),
            Some(minimum_investment),
            Some(maximum_investment),
            Some(preferred_stage),
        ) if errors.is_empty() => Ok(NewInvestor {
            name,
            email,
            phone,
            company,
            title,
            investment_focus,
            minimum_investment,
            maximum_investment,
            preferred_stage,
            geography,
            linkedin,
            bio,
            accredited_investor: accredited_investor.unwrap_or(false),
        }),
        _ => Err(errors),
    }
}
