//! The onboarding flow state machine.
//!
//! ```text
//! Unselected --select--> FillingInvestor | FillingStartup
//! Filling*   --back----> Unselected
//! Filling*   --submit--> Submitted        (on success only)
//! Submitted  --reset---> Unselected
//! ```
//!
//! Any other transition is a [`FlowError::InvalidTransition`].

use thiserror::Error;

use onboarding_core::{Investor, Persona, Startup};

use crate::form::{FormState, InvestorForm, StartupForm};
use crate::submit::{OnboardingClient, SubmitError};
use crate::summary::Summary;

/// Errors moving through the flow.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The action is not allowed in the current stage.
    #[error("Cannot {action} while {stage}")]
    InvalidTransition {
        action: &'static str,
        stage: &'static str,
    },

    /// The submission failed; the form stays open with its errors.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// A stored profile returned by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Investor(Investor),
    Startup(Startup),
}

impl Submission {
    /// Which persona was onboarded.
    #[must_use]
    pub const fn persona(&self) -> Persona {
        match self {
            Self::Investor(_) => Persona::Investor,
            Self::Startup(_) => Persona::Startup,
        }
    }
}

/// Where the person is in the flow.
#[derive(Debug, Clone, Default)]
pub enum Stage {
    /// Choosing between investor and startup.
    #[default]
    Unselected,
    FillingInvestor(FormState<InvestorForm>),
    FillingStartup(FormState<StartupForm>),
    Submitted(Submission),
}

impl Stage {
    /// Short description used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Unselected => "no persona is selected",
            Self::FillingInvestor(_) => "filling the investor form",
            Self::FillingStartup(_) => "filling the startup form",
            Self::Submitted(_) => "showing a submitted profile",
        }
    }

    /// The persona being onboarded, once one is chosen.
    #[must_use]
    pub const fn persona(&self) -> Option<Persona> {
        match self {
            Self::Unselected => None,
            Self::FillingInvestor(_) => Some(Persona::Investor),
            Self::FillingStartup(_) => Some(Persona::Startup),
            Self::Submitted(submission) => Some(submission.persona()),
        }
    }
}

/// Top-level coordinator for one person's onboarding.
#[derive(Debug, Clone, Default)]
pub struct Onboarding {
    stage: Stage,
}

impl Onboarding {
    /// Start with no persona selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current stage.
    #[must_use]
    pub const fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Choose a persona and open its empty form.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless no persona is selected.
    pub fn select(&mut self, persona: Persona) -> Result<(), FlowError> {
        self.expect_unselected("select a persona")?;
        self.stage = match persona {
            Persona::Investor => Stage::FillingInvestor(FormState::new()),
            Persona::Startup => Stage::FillingStartup(FormState::new()),
        };
        Ok(())
    }

    /// Leave the form and return to persona selection. The form is discarded.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless a form is open.
    pub fn back(&mut self) -> Result<(), FlowError> {
        match self.stage {
            Stage::FillingInvestor(_) | Stage::FillingStartup(_) => {
                self.stage = Stage::Unselected;
                Ok(())
            }
            _ => Err(self.invalid("go back")),
        }
    }

    /// Start over after a successful submission.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless a profile was submitted.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        match self.stage {
            Stage::Submitted(_) => {
                self.stage = Stage::Unselected;
                Ok(())
            }
            _ => Err(self.invalid("reset")),
        }
    }

    /// The open investor form.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless the investor form is open.
    pub fn investor_form_mut(&mut self) -> Result<&mut FormState<InvestorForm>, FlowError> {
        let stage = self.stage.describe();
        match &mut self.stage {
            Stage::FillingInvestor(state) => Ok(state),
            _ => Err(FlowError::InvalidTransition {
                action: "edit the investor form",
                stage,
            }),
        }
    }

    /// The open startup form.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless the startup form is open.
    pub fn startup_form_mut(&mut self) -> Result<&mut FormState<StartupForm>, FlowError> {
        let stage = self.stage.describe();
        match &mut self.stage {
            Stage::FillingStartup(state) => Ok(state),
            _ => Err(FlowError::InvalidTransition {
                action: "edit the startup form",
                stage,
            }),
        }
    }

    /// Submit the open form. On success the flow moves to `Submitted` and
    /// the success summary is returned; on failure it stays on the form,
    /// which now shows the errors.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidTransition` unless a form is open, or
    /// `FlowError::Submit` when the submission fails.
    pub async fn submit(&mut self, client: &OnboardingClient) -> Result<Summary, FlowError> {
        let stage = self.stage.describe();
        let submission = match &mut self.stage {
            Stage::FillingInvestor(state) => Submission::Investor(client.submit(state).await?),
            Stage::FillingStartup(state) => Submission::Startup(client.submit(state).await?),
            _ => {
                return Err(FlowError::InvalidTransition {
                    action: "submit",
                    stage,
                });
            }
        };

        tracing::info!(persona = %submission.persona(), "Profile submitted");
        let summary = Summary::new(&submission);
        self.stage = Stage::Submitted(submission);
        Ok(summary)
    }

    /// The success summary, once a profile was submitted.
    #[must_use]
    pub fn summary(&self) -> Option<Summary> {
        match &self.stage {
            Stage::Submitted(submission) => Some(Summary::new(submission)),
            _ => None,
        }
    }

    fn expect_unselected(&self, action: &'static str) -> Result<(), FlowError> {
        match self.stage {
            Stage::Unselected => Ok(()),
            _ => Err(self.invalid(action)),
        }
    }

    const fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            stage: self.stage.describe(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_back() {
        let mut flow = Onboarding::new();
        assert!(flow.stage().persona().is_none());

        flow.select(Persona::Startup).unwrap();
        assert_eq!(flow.stage().persona(), Some(Persona::Startup));
        assert!(flow.startup_form_mut().is_ok());
        assert!(flow.investor_form_mut().is_err());

        flow.back().unwrap();
        assert!(matches!(flow.stage(), Stage::Unselected));
    }

    #[test]
    fn test_back_discards_form() {
        let mut flow = Onboarding::new();
        flow.select(Persona::Investor).unwrap();
        assert!(flow.investor_form_mut().unwrap().set("name", "Ada"));

        flow.back().unwrap();
        flow.select(Persona::Investor).unwrap();

        assert_eq!(flow.investor_form_mut().unwrap().form().name, "");
    }

    #[test]
    fn test_invalid_transitions() {
        let mut flow = Onboarding::new();

        assert!(matches!(
            flow.back(),
            Err(FlowError::InvalidTransition { action: "go back", .. })
        ));
        assert!(flow.reset().is_err());
        assert!(flow.summary().is_none());

        flow.select(Persona::Investor).unwrap();
        let err = flow.select(Persona::Startup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot select a persona while filling the investor form"
        );
        assert!(flow.reset().is_err());
    }

    #[tokio::test]
    async fn test_submit_requires_open_form() {
        let client = OnboardingClient::new(
            &crate::config::ClientConfig::with_api_url("http://127.0.0.1:9/api").unwrap(),
        )
        .unwrap();
        let mut flow = Onboarding::new();

        let err = flow.submit(&client).await.unwrap_err();

        assert!(matches!(
            err,
            FlowError::InvalidTransition { action: "submit", .. }
        ));
    }

    #[tokio::test]
    async fn test_failed_submit_stays_on_form() {
        let client = OnboardingClient::new(
            &crate::config::ClientConfig::with_api_url("http://127.0.0.1:9/api").unwrap(),
        )
        .unwrap();
        let mut flow = Onboarding::new();
        flow.select(Persona::Startup).unwrap();

        let err = flow.submit(&client).await.unwrap_err();

        assert!(matches!(err, FlowError::Submit(SubmitError::Invalid(_))));
        let form = flow.startup_form_mut().unwrap();
        assert_eq!(form.error("email"), Some("Email is required"));
    }
}
