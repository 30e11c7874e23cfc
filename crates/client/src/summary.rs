//! The success summary shown after a profile is stored.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use onboarding_core::{Investor, Persona, Startup};

use crate::flow::Submission;

/// What the person sees once their profile is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub persona: Persona,
    /// Labelled profile highlights, in display order.
    pub details: Vec<(&'static str, String)>,
    pub next_steps: Vec<String>,
}

impl Summary {
    /// Build the summary for a stored profile.
    #[must_use]
    pub fn new(submission: &Submission) -> Self {
        let persona = submission.persona();
        let details = match submission {
            Submission::Investor(investor) => investor_details(investor),
            Submission::Startup(startup) => startup_details(startup),
        };

        Self {
            persona,
            details,
            next_steps: vec![
                "Our team will review your profile within 24 hours".to_string(),
                "You'll receive an email confirmation shortly".to_string(),
                format!(
                    "We'll start matching you with relevant {}s",
                    persona.counterpart().noun()
                ),
                "Access to our platform will be granted once approved".to_string(),
            ],
        }
    }

    /// The value shown for a detail label.
    #[must_use]
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value.as_str())
    }
}

fn investor_details(investor: &Investor) -> Vec<(&'static str, String)> {
    let focus: Vec<&str> = investor
        .investment_focus
        .iter()
        .map(|s| onboarding_core::Tag::as_str(*s))
        .collect();

    vec![
        ("Name", investor.name.clone()),
        ("Company", investor.company.clone()),
        (
            "Investment Range",
            format!(
                "{} - {}",
                usd(investor.minimum_investment),
                usd(investor.maximum_investment)
            ),
        ),
        ("Preferred Stage", investor.preferred_stage.to_string()),
        ("Investment Focus", focus.join(", ")),
    ]
}

fn startup_details(startup: &Startup) -> Vec<(&'static str, String)> {
    vec![
        ("Company", startup.company_name.clone()),
        ("Founder", startup.founder_name.clone()),
        ("Industry", startup.industry.to_string()),
        ("Stage", startup.stage.to_string()),
        // whole dollars only
        ("Funding Sought", usd(startup.funding_amount.trunc())),
    ]
}

/// Dollar amount with thousands separators and at most three decimals,
/// e.g. `$1,250,000` or `$99.5`.
fn usd(amount: Decimal) -> String {
    let text = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, digits) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome aboard!")?;
        writeln!(
            f,
            "Your {} profile has been successfully created and submitted.",
            self.persona.noun()
        )?;
        writeln!(f)?;
        writeln!(f, "What's next?")?;
        for step in &self.next_steps {
            writeln!(f, "  - {step}")?;
        }
        writeln!(f)?;
        writeln!(f, "Profile Summary:")?;
        for (label, value) in &self.details {
            writeln!(f, "  {label}: {value}")?;
        }
        Ok(())
    }
}
