//! The HTTP contract against `PostgreSQL`.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - `ONBOARD_TEST_DATABASE_URL` pointing at a disposable database
//!
//! Each test empties both tables first, so run them with `--test-threads=1`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::json;

use onboarding_integration_tests::{TestServer, postgres_store};

async fn server() -> TestServer {
    let store = postgres_store()
        .await
        .expect("ONBOARD_TEST_DATABASE_URL must be set for database tests");
    TestServer::spawn_with(store).await
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ONBOARD_TEST_DATABASE_URL)"]
async fn test_investor_round_trip() {
    let server = server().await;

    let (status, created) = server
        .post_json(
            "/investors",
            &json!({
                "name": "Jane Doe",
                "email": "Jane@X.com",
                "company": "Acme",
                "investmentFocus": ["SaaS", "SaaS", "Fintech"],
                "minimumInvestment": "10000.50",
                "maximumInvestment": 100_000,
                "preferredStage": "Seed",
                "accreditedInvestor": true,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["investor"]["email"], "jane@x.com");
    assert_eq!(created["investor"]["investmentFocus"], json!(["SaaS", "Fintech"]));

    let id = created["investor"]["id"].as_str().unwrap();
    let (status, fetched) = server.get_json(&format!("/investors/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["investor"], created["investor"]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ONBOARD_TEST_DATABASE_URL)"]
async fn test_unique_index_reports_conflict() {
    let server = server().await;
    let startup = json!({
        "companyName": "Acme Robotics",
        "founderName": "Sam Lee",
        "email": "sam@acme.io",
        "industry": "Technology",
        "stage": "Idea",
        "fundingAmount": 250_000,
        "description": "Robots that fold laundry for busy households.",
        "founded": 2021,
        "teamSize": 4,
    });

    let (status, _) = server.post_json("/startups", &startup).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = server.post_json("/startups", &startup).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A startup with this email already exists");

    let (_, list) = server.get_json("/startups").await;
    assert_eq!(list["startups"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ONBOARD_TEST_DATABASE_URL)"]
async fn test_readiness_checks_database() {
    let server = server().await;

    let response = reqwest::get(server.url("/health/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
