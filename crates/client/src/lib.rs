//! Onboarding client.
//!
//! Everything a front end needs to collect and submit a profile:
//!
//! - [`form`] - investor and startup form models plus per-form state
//! - [`validate`] - the quick local checks run before any request
//! - [`submit`] - the HTTP client and submission error classification
//! - [`flow`] - the persona selection / fill / submitted state machine
//! - [`summary`] - the success summary shown after a submission
//!
//! # Example
//!
//! ```rust,ignore
//! use onboarding_client::{ClientConfig, Onboarding, OnboardingClient, Persona};
//!
//! let client = OnboardingClient::new(&ClientConfig::from_env()?)?;
//! let mut flow = Onboarding::new();
//! flow.select(Persona::Investor)?;
//! let form = flow.investor_form_mut()?;
//! form.set("name", "Ada Lovelace");
//! // ...
//! flow.submit(&client).await?;
//! println!("{}", flow.summary().map(|s| s.to_string()).unwrap_or_default());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod flow;
pub mod form;
pub mod submit;
pub mod summary;
pub mod validate;

pub use config::{ClientConfig, ClientError};
pub use flow::{FlowError, Onboarding, Stage, Submission};
pub use form::{FormState, InvestorForm, ProfileForm, StartupForm};
pub use onboarding_core::Persona;
pub use submit::{OnboardingClient, SubmitError};
pub use summary::Summary;
