mod common;

use anyhow::Result;
use common::{minimal_lead, spawn_app};
use odo_site::domain::catalog;
use odo_site::domain::model::{CaseStudy, ResponseEnvelope, ServiceOffering};
use odo_site::LeadIntake;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_root_banner() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let response = reqwest::get(format!("{}/", base)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "One Digital Office API Running");
    Ok(())
}

#[tokio::test]
async fn test_services_endpoint_returns_full_catalog() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let first: Vec<ServiceOffering> = reqwest::get(format!("{}/api/services", base))
        .await?
        .json()
        .await?;
    let second: Vec<ServiceOffering> = reqwest::get(format!("{}/api/services", base))
        .await?
        .json()
        .await?;

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
    assert_eq!(first, catalog::list_services());
    Ok(())
}

#[tokio::test]
async fn test_case_studies_endpoint_uses_camel_case() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let raw: Value = reqwest::get(format!("{}/api/case-studies", base))
        .await?
        .json()
        .await?;
    assert_eq!(raw[0]["techStack"][0], "AWS");
    assert!(raw[0]["imageUrl"].as_str().unwrap().starts_with("https://"));

    let studies: Vec<CaseStudy> = serde_json::from_value(raw)?;
    assert_eq!(studies.len(), 6);

    // the Work page filters the full list on the client
    let mobile: Vec<&CaseStudy> = studies.iter().filter(|s| s.category == "Mobile").collect();
    assert_eq!(mobile.len(), 1);
    assert_eq!(mobile[0].client, "NeoBank");
    Ok(())
}

#[tokio::test]
async fn test_site_options_endpoint() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let options: Value = reqwest::get(format!("{}/api/site-options", base))
        .await?
        .json()
        .await?;
    assert_eq!(options["workFilters"][0], "All");
    assert_eq!(options["budgetRanges"][0]["value"], "10k-30k");
    assert_eq!(options["serviceInterests"].as_array().unwrap().len(), 6);
    Ok(())
}

#[tokio::test]
async fn test_minimal_lead_is_accepted_without_relay() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/lead", base))
        .json(&minimal_lead("A"))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({"success": true, "message": "Inquiry received"}));
    Ok(())
}

#[tokio::test]
async fn test_missing_fields_are_all_reported() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/lead", base))
        .json(&json!({"phone": "555-0100"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ResponseEnvelope = response.json().await?;
    assert!(!envelope.success);

    let errors = envelope.errors.unwrap();
    let fields: Vec<&str> = errors.iter().filter_map(|e| e.field()).collect();
    assert_eq!(fields, vec!["name", "email", "message"]);
    Ok(())
}

#[tokio::test]
async fn test_bad_email_is_reported() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/lead", base))
        .json(&json!({"name": "A", "email": "a.b.com", "message": "hi"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["path"], json!(["email"]));
    assert_eq!(body["errors"][0]["code"], "invalid_string");
    Ok(())
}

#[tokio::test]
async fn test_malformed_and_empty_bodies() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;
    let client = reqwest::Client::new();

    let malformed = client
        .post(format!("{}/api/lead", base))
        .header("content-type", "application/json")
        .body("{\"name\": \"A\",")
        .send()
        .await?;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    let body: Value = malformed.json().await?;
    assert_eq!(body["errors"][0]["code"], "invalid_json");

    let empty = client.post(format!("{}/api/lead", base)).send().await?;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    let body: Value = empty.json().await?;
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_status_reports_intake_counters() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/lead", base))
        .json(&minimal_lead("A"))
        .send()
        .await?;
    client
        .post(format!("{}/api/lead", base))
        .json(&json!({}))
        .send()
        .await?;

    let status: Value = client
        .get(format!("{}/api/status", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status["status"], "running");
    assert_eq!(status["mailRelay"], "unconfigured");
    assert_eq!(status["intake"]["accepted"], 1);
    assert_eq!(status["intake"]["rejected"], 1);
    assert_eq!(status["intake"]["deliverySkipped"], 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_json_404() -> Result<()> {
    let base = spawn_app(LeadIntake::unconfigured()).await;

    let response = reqwest::get(format!("{}/api/leads", base)).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    Ok(())
}
