//! HTTP contract tests against an in-process server.
//!
//! Each test spawns its own server on an ephemeral port with an empty
//! in-memory store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use onboarding_integration_tests::TestServer;

fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "company": "Acme",
        "investmentFocus": ["SaaS"],
        "minimumInvestment": 10000,
        "maximumInvestment": 100000,
        "preferredStage": "Seed",
    })
}

fn acme() -> Value {
    json!({
        "companyName": "Acme Robotics",
        "founderName": "Sam Lee",
        "email": "sam@acme.io",
        "industry": "Technology",
        "stage": "Seed",
        "fundingAmount": 750000,
        "description": "Robots that fold laundry for busy households.",
    })
}

fn error_params(body: &Value) -> Vec<&str> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["param"].as_str().unwrap())
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_scenario_investor_created() {
    let server = TestServer::spawn().await;

    let (status, body) = server.post_json("/investors", &jane()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Investor profile created successfully");
    assert_eq!(body["investor"]["isActive"], true);
    assert_eq!(body["investor"]["name"], "Jane Doe");
    assert_eq!(body["investor"]["minimumInvestment"].as_f64(), Some(10_000.0));
    assert_eq!(body["investor"]["maximumInvestment"].as_f64(), Some(100_000.0));
}

#[tokio::test]
async fn test_scenario_investor_range_rejected() {
    let server = TestServer::spawn().await;
    let mut payload = jane();
    payload["maximumInvestment"] = json!(5000);

    let (status, body) = server.post_json("/investors", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_params(&body).contains(&"maximumInvestment"));

    let (_, list) = server.get_json("/investors").await;
    assert_eq!(list["investors"], json!([]));
}

#[tokio::test]
async fn test_scenario_startup_description_too_short() {
    let server = TestServer::spawn().await;
    let mut payload = acme();
    payload["description"] = json!("Short");

    let (status, body) = server.post_json("/startups", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(error_params(&body), vec!["description"]);
    assert_eq!(
        body["errors"][0]["msg"],
        "Description must be between 10 and 2000 characters"
    );
}

#[tokio::test]
async fn test_scenario_investor_not_found() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .get_json("/investors/00000000-0000-4000-8000-000000000000")
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Investor not found"}));
}

// ============================================================================
// Field handling
// ============================================================================

#[tokio::test]
async fn test_whitespace_fields_are_absent() {
    let server = TestServer::spawn().await;
    let mut payload = jane();
    payload["phone"] = json!("   ");
    payload["bio"] = json!("");

    let (status, body) = server.post_json("/investors", &payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["investor"].get("phone").is_none());
    assert!(body["investor"].get("bio").is_none());
}

#[tokio::test]
async fn test_whitespace_required_field_is_missing() {
    let server = TestServer::spawn().await;
    let mut payload = acme();
    payload["founderName"] = json!("  \t ");

    let (status, body) = server.post_json("/startups", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_params(&body), vec!["founderName"]);
}

#[tokio::test]
async fn test_lowercase_tag_rejected() {
    let server = TestServer::spawn().await;
    let mut payload = jane();
    payload["investmentFocus"] = json!(["saas"]);

    let (status, body) = server.post_json("/investors", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_params(&body), vec!["investmentFocus"]);
}

#[tokio::test]
async fn test_email_normalized() {
    let server = TestServer::spawn().await;
    let mut payload = jane();
    payload["email"] = json!("  Jane@X.com ");

    let (status, body) = server.post_json("/investors", &payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["investor"]["email"], "jane@x.com");
}

// ============================================================================
// Uniqueness
// ============================================================================

#[tokio::test]
async fn test_duplicate_email_keeps_single_record() {
    let server = TestServer::spawn().await;
    server.post_json("/investors", &jane()).await;

    let mut again = jane();
    again["name"] = json!("Janet Doe");
    let (status, body) = server.post_json("/investors", &again).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "An investor with this email already exists");

    let (_, list) = server.get_json("/investors").await;
    let investors = list["investors"].as_array().unwrap();
    assert_eq!(investors.len(), 1);
    assert_eq!(investors[0]["name"], "Jane Doe");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicates_one_winner() {
    let server = TestServer::spawn().await;
    let url = server.url("/startups");
    let http = reqwest::Client::new();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let (http, url) = (http.clone(), url.clone());
            tokio::spawn(async move {
                let response = http.post(url).json(&acme()).send().await.unwrap();
                let status = response.status();
                let body: Value = response.json().await.unwrap();
                (status, body)
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let created = results
        .iter()
        .filter(|(status, _)| *status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    for (status, body) in results.iter().filter(|(s, _)| *s != StatusCode::CREATED) {
        assert_eq!(*status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "A startup with this email already exists");
    }

    let (_, list) = server.get_json("/startups").await;
    assert_eq!(list["startups"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Listing and lookup
// ============================================================================

#[tokio::test]
async fn test_get_startup_round_trip() {
    let server = TestServer::spawn().await;
    let (_, created) = server.post_json("/startups", &acme()).await;
    let id = created["startup"]["id"].as_str().unwrap();

    let (status, body) = server.get_json(&format!("/startups/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Startup retrieved successfully");
    assert_eq!(body["startup"], created["startup"]);
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get_json("/founders").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
}
