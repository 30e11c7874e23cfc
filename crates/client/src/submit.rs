//! HTTP client for the onboarding API.
//!
//! A submit sends exactly one POST and never retries. Failures are sorted
//! into [`SubmitError`] so the caller can render them straight into the
//! form's field map.

use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use onboarding_core::api::{InvestorEnvelope, InvestorsEnvelope, StartupEnvelope, StartupsEnvelope};
use onboarding_core::{
    FieldError, FieldErrors, Investor, InvestorId, Persona, SUBMIT_FIELD, Startup, StartupId,
    ValidationErrors,
};

use crate::config::{ClientConfig, ClientError};
use crate::form::{FormState, InvestorForm, ProfileForm, StartupForm};

/// Shown when the server could not be reached or answered garbage.
pub const TRANSPORT_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when the server rejected a request without saying why.
pub const REJECTED_FALLBACK: &str = "Submission failed";

/// Why a request did not produce a result.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Local checks failed; nothing was sent.
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),

    /// The server reported field-level violations.
    #[error("Server rejected {} field(s)", .0.len())]
    Fields(ValidationErrors),

    /// The server refused the request with at most a message.
    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or(REJECTED_FALLBACK))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// No usable response arrived.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl SubmitError {
    /// The field map to show on the form.
    ///
    /// Field errors keep the last message per field; anything else becomes
    /// a single message under `"submit"`.
    #[must_use]
    pub fn to_field_map(&self) -> FieldErrors {
        match self {
            Self::Invalid(errors) => errors.clone(),
            Self::Fields(errors) => errors.to_field_map(),
            Self::Rejected { message, .. } => submit_only(message.as_deref().unwrap_or(REJECTED_FALLBACK)),
            Self::Transport(_) => submit_only(TRANSPORT_MESSAGE),
        }
    }
}

fn submit_only(message: &str) -> FieldErrors {
    FieldErrors::from([(SUBMIT_FIELD.to_string(), message.to_string())])
}

/// Log the cause and wrap it; the person only ever sees the generic text.
fn transport(err: reqwest::Error) -> SubmitError {
    tracing::warn!(error = %err, "Onboarding API unreachable or unreadable");
    SubmitError::Transport(err)
}

/// Sort a non-success response body into field errors or a plain rejection.
fn classify_rejection(status: StatusCode, body: &[u8]) -> SubmitError {
    let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let errors: ValidationErrors = errors
            .iter()
            .filter_map(|e| serde_json::from_value::<FieldError>(e.clone()).ok())
            .collect();
        // an array with no `{param, msg}` entries carries no field to show
        if !errors.is_empty() {
            tracing::debug!(%status, violations = errors.len(), "Server rejected fields");
            return SubmitError::Fields(errors);
        }
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(String::from);
    tracing::debug!(%status, message = message.as_deref(), "Server rejected request");
    SubmitError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// Client for the onboarding API.
#[derive(Debug, Clone)]
pub struct OnboardingClient {
    inner: Arc<OnboardingClientInner>,
}

#[derive(Debug)]
struct OnboardingClientInner {
    http: reqwest::Client,
    api_url: Url,
}

impl OnboardingClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("onboarding-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(OnboardingClientInner {
                http,
                api_url: config.api_url.clone(),
            }),
        })
    }

    /// The API base URL.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Validate and submit a form, recording the outcome on `state`.
    ///
    /// Local errors stop the submit before any request. Otherwise exactly
    /// one POST is sent; while it is in flight the form reports
    /// [`FormState::is_submitting`]. On failure the form's errors are
    /// replaced by [`SubmitError::to_field_map`].
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when local checks fail or the server does not
    /// store the profile.
    pub async fn submit<F: ProfileForm>(
        &self,
        state: &mut FormState<F>,
    ) -> Result<F::Record, SubmitError> {
        if !state.validate() {
            return Err(SubmitError::Invalid(state.errors().clone()));
        }

        state.begin_submit();
        let result = self.create(state.form()).await;
        state.end_submit(
            result
                .as_ref()
                .err()
                .map(SubmitError::to_field_map)
                .unwrap_or_default(),
        );
        result
    }

    /// POST an investor form as-is, without local checks.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the server does not store the profile.
    pub async fn submit_investor(&self, form: &InvestorForm) -> Result<Investor, SubmitError> {
        self.create(form).await
    }

    /// POST a startup form as-is, without local checks.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the server does not store the profile.
    pub async fn submit_startup(&self, form: &StartupForm) -> Result<Startup, SubmitError> {
        self.create(form).await
    }

    async fn create<F: ProfileForm>(&self, form: &F) -> Result<F::Record, SubmitError> {
        let url = self.endpoint(&[collection(F::PERSONA)]);
        let response = self
            .inner
            .http
            .post(url)
            .json(&form.to_payload())
            .send()
            .await
            .map_err(transport)?;

        let envelope: F::Envelope = read(response).await?;
        Ok(F::into_record(envelope))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Active investors, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the request fails.
    pub async fn list_investors(&self) -> Result<Vec<Investor>, SubmitError> {
        let body: InvestorsEnvelope = self.fetch(&[collection(Persona::Investor)]).await?;
        Ok(body.investors)
    }

    /// One investor, or `None` when the server has no such ID.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the request fails.
    pub async fn get_investor(&self, id: InvestorId) -> Result<Option<Investor>, SubmitError> {
        let id = id.to_string();
        let body: Option<InvestorEnvelope> = self
            .fetch_optional(&[collection(Persona::Investor), &id])
            .await?;
        Ok(body.map(|b| b.investor))
    }

    /// Active startups, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the request fails.
    pub async fn list_startups(&self) -> Result<Vec<Startup>, SubmitError> {
        let body: StartupsEnvelope = self.fetch(&[collection(Persona::Startup)]).await?;
        Ok(body.startups)
    }

    /// One startup, or `None` when the server has no such ID.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the request fails.
    pub async fn get_startup(&self, id: StartupId) -> Result<Option<Startup>, SubmitError> {
        let id = id.to_string();
        let body: Option<StartupEnvelope> = self
            .fetch_optional(&[collection(Persona::Startup), &id])
            .await?;
        Ok(body.map(|b| b.startup))
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SubmitError> {
        let response = self
            .inner
            .http
            .get(self.endpoint(segments))
            .send()
            .await
            .map_err(transport)?;
        read(response).await
    }

    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, SubmitError> {
        let response = self
            .inner
            .http
            .get(self.endpoint(segments))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read(response).await.map(Some)
    }

    /// Base URL with `segments` appended as escaped path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.api_url.clone();
        // http(s) URLs always have path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Collection path for a persona: `investors` or `startups`.
fn collection(persona: Persona) -> &'static str {
    match persona {
        Persona::Investor => "investors",
        Persona::Startup => "startups",
    }
}

/// Decode a success body, or classify a failure.
async fn read<T: DeserializeOwned>(response: Response) -> Result<T, SubmitError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport);
    }

    let body = response.bytes().await.map_err(transport)?;
    Err(classify_rejection(status, &body))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client(url: &str) -> OnboardingClient {
        OnboardingClient::new(&ClientConfig::with_api_url(url).unwrap()).unwrap()
    }

    #[test]
    fn test_field_errors_keep_last_message() {
        let body = json!({
            "message": "Validation failed",
            "errors": [
                {"param": "maximumInvestment", "msg": "Maximum investment must be a positive number"},
                {"param": "maximumInvestment", "msg": "Maximum investment must be greater than minimum investment"},
                {"param": "name", "msg": "Name must be between 2 and 100 characters"},
            ],
        });

        let err = classify_rejection(StatusCode::BAD_REQUEST, body.to_string().as_bytes());

        assert!(matches!(err, SubmitError::Fields(_)));
        let map = err.to_field_map();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map["maximumInvestment"],
            "Maximum investment must be greater than minimum investment"
        );
    }

    #[test]
    fn test_message_only_goes_to_submit() {
        let body = json!({"message": "An investor with this email already exists"});

        let err = classify_rejection(StatusCode::BAD_REQUEST, body.to_string().as_bytes());

        assert_eq!(
            err.to_field_map(),
            submit_only("An investor with this email already exists")
        );
    }

    #[test]
    fn test_plain_string_errors_go_to_submit() {
        let body = json!({
            "message": "Validation failed",
            "errors": ["Maximum investment must be greater than minimum investment"],
        });

        let err = classify_rejection(StatusCode::BAD_REQUEST, body.to_string().as_bytes());

        assert!(matches!(err, SubmitError::Rejected { status: 400, .. }));
        assert_eq!(err.to_field_map(), submit_only("Validation failed"));
    }

    #[test]
    fn test_empty_errors_array_goes_to_submit() {
        let body = json!({"errors": []});

        let err = classify_rejection(StatusCode::BAD_REQUEST, body.to_string().as_bytes());

        assert!(!err.to_field_map().is_empty());
        assert_eq!(err.to_field_map(), submit_only("Submission failed"));
    }

    #[test]
    fn test_unreadable_rejection_falls_back() {
        let err = classify_rejection(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");

        assert!(matches!(
            err,
            SubmitError::Rejected {
                status: 502,
                message: None
            }
        ));
        assert_eq!(err.to_field_map(), submit_only("Submission failed"));
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = client("http://localhost:5000/api");

        assert_eq!(
            client.endpoint(&["investors"]).as_str(),
            "http://localhost:5000/api/investors"
        );
        assert_eq!(
            client.endpoint(&["startups", "a b"]).as_str(),
            "http://localhost:5000/api/startups/a%20b"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // nothing listens on the discard port
        let client = client("http://127.0.0.1:9/api");
        let mut state = FormState::from_form(InvestorForm {
            name: "Ada Lovelace".into(),
            email: "ada@av.com".into(),
            company: "Analytical Ventures".into(),
            investment_focus: vec!["Technology".into()],
            minimum_investment: "10000".into(),
            maximum_investment: "100000".into(),
            preferred_stage: "Seed".into(),
            ..InvestorForm::default()
        });

        let err = client.submit(&mut state).await.unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(state.error("submit"), Some(TRANSPORT_MESSAGE));
        assert!(!state.is_submitting());
    }

    #[tokio::test]
    async fn test_local_errors_stop_submit() {
        let client = client("http://127.0.0.1:9/api");
        let mut state = FormState::<StartupForm>::new();

        let err = client.submit(&mut state).await.unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(state.error("companyName"), Some("Company name is required"));
    }
}
