//! The client pipeline end to end: form state, local checks, cleaning,
//! submission and the flow state machine against a live server.

#![allow(clippy::unwrap_used)]

use onboarding_client::{
    FlowError, FormState, InvestorForm, Onboarding, Persona, Stage, StartupForm, SubmitError,
};
use onboarding_core::{Sector, StartupStage};
use onboarding_integration_tests::TestServer;

fn fill_investor(flow: &mut Onboarding) {
    let form = flow.investor_form_mut().unwrap();
    for (field, value) in [
        ("name", "Jane Doe"),
        ("email", "jane@x.com"),
        ("company", "Acme"),
        ("investmentFocus", "SaaS"),
        ("investmentFocus", "Fintech"),
        ("minimumInvestment", "10000"),
        ("maximumInvestment", "100000"),
        ("preferredStage", "Seed"),
        ("phone", "   "),
    ] {
        assert!(form.set(field, value), "unknown field {field}");
    }
}

#[tokio::test]
async fn test_investor_flow_to_summary() {
    let server = TestServer::spawn().await;
    let mut flow = Onboarding::new();

    flow.select(Persona::Investor).unwrap();
    fill_investor(&mut flow);
    let summary = flow.submit(server.client()).await.unwrap();

    assert_eq!(summary.persona, Persona::Investor);
    assert_eq!(summary.detail("Investment Range"), Some("$10,000 - $100,000"));
    assert_eq!(summary.detail("Investment Focus"), Some("SaaS, Fintech"));
    match flow.stage() {
        Stage::Submitted(onboarding_client::Submission::Investor(investor)) => {
            assert_eq!(investor.investment_focus, vec![Sector::SaaS, Sector::Fintech]);
            assert_eq!(investor.phone, None);
            assert!(investor.is_active);
        }
        other => panic!("expected a submitted investor, got {other:?}"),
    }

    flow.reset().unwrap();
    assert!(matches!(flow.stage(), Stage::Unselected));
}

#[tokio::test]
async fn test_server_range_error_lands_on_form() {
    let server = TestServer::spawn().await;
    let mut flow = Onboarding::new();
    flow.select(Persona::Investor).unwrap();
    fill_investor(&mut flow);
    flow.investor_form_mut()
        .unwrap()
        .set("maximumInvestment", "5000");

    let err = flow.submit(server.client()).await.unwrap_err();

    assert!(matches!(err, FlowError::Submit(SubmitError::Fields(_))));
    let form = flow.investor_form_mut().unwrap();
    assert_eq!(
        form.error("maximumInvestment"),
        Some("Maximum investment must be greater than minimum investment")
    );
    assert!(!form.is_submitting());

    // fixing the field clears its error and the retry succeeds
    form.set("maximumInvestment", "50000");
    assert_eq!(form.error("maximumInvestment"), None);
    flow.submit(server.client()).await.unwrap();
    assert!(matches!(flow.stage(), Stage::Submitted(_)));
}

#[tokio::test]
async fn test_duplicate_email_goes_to_submit_field() {
    let server = TestServer::spawn().await;
    let form = StartupForm {
        company_name: "Acme Robotics".into(),
        founder_name: "Sam Lee".into(),
        email: "sam@acme.io".into(),
        industry: "Technology".into(),
        stage: "Series A".into(),
        funding_amount: "2000000".into(),
        description: "Robots that fold laundry for busy households.".into(),
        ..StartupForm::default()
    };

    let first = server.client().submit_startup(&form).await.unwrap();
    assert_eq!(first.stage, StartupStage::SeriesA);

    let mut state = FormState::from_form(form);
    let err = server.client().submit(&mut state).await.unwrap_err();

    assert!(matches!(err, SubmitError::Rejected { status: 400, .. }));
    assert_eq!(
        state.error("submit"),
        Some("A startup with this email already exists")
    );
}

#[tokio::test]
async fn test_client_skips_checks_server_enforces() {
    let server = TestServer::spawn().await;
    let mut state = FormState::from_form(StartupForm {
        company_name: "A".into(),
        founder_name: "Sam Lee".into(),
        email: "sam@acme.io".into(),
        industry: "technology".into(),
        stage: "Idea".into(),
        funding_amount: "-5".into(),
        description: "Robots that fold laundry.".into(),
        team_size: "0".into(),
        ..StartupForm::default()
    });

    let err = server.client().submit(&mut state).await.unwrap_err();

    let SubmitError::Fields(errors) = err else {
        panic!("expected server field errors, got {err:?}");
    };
    for field in ["companyName", "industry", "fundingAmount", "teamSize"] {
        assert!(errors.has_field(field), "no server error for {field}");
        assert!(state.error(field).is_some(), "error for {field} not shown");
    }
}

#[tokio::test]
async fn test_list_and_get_through_client() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let mut ada = InvestorForm {
        name: "Ada Lovelace".into(),
        email: "ada@av.com".into(),
        company: "Analytical Ventures".into(),
        minimum_investment: "25000".into(),
        maximum_investment: "250000".into(),
        preferred_stage: "Pre-Seed".into(),
        ..InvestorForm::default()
    };
    ada.toggle_focus("AI/ML");
    let stored = client.submit_investor(&ada).await.unwrap();

    let listed = client.list_investors().await.unwrap();
    assert_eq!(listed, vec![stored.clone()]);

    assert_eq!(client.get_investor(stored.id).await.unwrap(), Some(stored));
    assert_eq!(
        client
            .get_startup(onboarding_core::StartupId::new_v4())
            .await
            .unwrap(),
        None
    );
    assert!(client.list_startups().await.unwrap().is_empty());
}
