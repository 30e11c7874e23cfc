//! Profile commands that talk to a running onboarding API.
//!
//! # Environment Variables
//!
//! - `ONBOARD_API_URL` - API base URL (default: <http://localhost:5000/api>)

use std::path::Path;

use serde::Serialize;

use onboarding_client::{
    ClientConfig, FormState, InvestorForm, OnboardingClient, ProfileForm, StartupForm, SubmitError,
    Submission, Summary,
};
use onboarding_core::{InvestorId, Persona, StartupId};

fn client() -> Result<OnboardingClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Using onboarding API");
    Ok(OnboardingClient::new(&config)?)
}

/// Load a saved form, run the local checks and submit it.
///
/// On rejection every field message is logged before the command fails.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the
/// submission is rejected.
pub async fn submit(persona: Persona, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(file).await?;
    let client = client()?;

    let submission = match persona {
        Persona::Investor => {
            let form: InvestorForm = serde_json::from_str(&content)?;
            Submission::Investor(submit_form(&client, form).await?)
        }
        Persona::Startup => {
            let form: StartupForm = serde_json::from_str(&content)?;
            Submission::Startup(submit_form(&client, form).await?)
        }
    };

    #[allow(clippy::print_stdout)]
    {
        print!("{}", Summary::new(&submission));
        println!();
        match &submission {
            Submission::Investor(investor) => println!("{}", pretty(investor)?),
            Submission::Startup(startup) => println!("{}", pretty(startup)?),
        }
    }
    Ok(())
}

async fn submit_form<F: ProfileForm>(
    client: &OnboardingClient,
    form: F,
) -> Result<F::Record, SubmitError> {
    let mut state = FormState::from_form(form);
    client.submit(&mut state).await.inspect_err(|_| {
        for (field, message) in state.errors() {
            tracing::error!(field = %field, "{message}");
        }
    })
}

/// Print every active profile of one persona as JSON.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn list(persona: Persona) -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;

    let output = match persona {
        Persona::Investor => pretty(&client.list_investors().await?)?,
        Persona::Startup => pretty(&client.list_startups().await?)?,
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

/// Print one profile as JSON.
///
/// # Errors
///
/// Returns an error if `id` is not a UUID, the API request fails, or no
/// profile has that ID.
pub async fn get(persona: Persona, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;

    let output = match persona {
        Persona::Investor => client
            .get_investor(id.parse::<InvestorId>()?)
            .await?
            .map(|investor| pretty(&investor))
            .transpose()?,
        Persona::Startup => client
            .get_startup(id.parse::<StartupId>()?)
            .await?
            .map(|startup| pretty(&startup))
            .transpose()?,
    };

    let Some(output) = output else {
        return Err(format!("{} not found: {id}", persona.title()).into());
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

fn pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
