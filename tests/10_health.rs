mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::Client::new().get(server.url("/health")).send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let server = common::ensure_server().await?;
    let body: Value = reqwest::Client::new().get(server.url("/")).send().await?.json().await?;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "HR Portal API");
    Ok(())
}

#[tokio::test]
async fn seeded_reference_data_is_public() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let locations: Value = client.get(server.url("/api/departments/locations")).send().await?.json().await?;
    let locations = locations["data"].as_array().cloned().unwrap_or_default();
    assert!(locations.iter().any(|l| l == "Mateur"));

    let res = client
        .get(server.url("/api/departments/by-location/Manzel%20Hayet%20(Monastir)"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let departments: Value = res.json().await?;
    assert_eq!(departments["data"].as_array().map(Vec::len), Some(12));

    let types: Value = client.get(server.url("/api/document-types/active")).send().await?.json().await?;
    assert_eq!(types["data"].as_array().map(Vec::len), Some(8));
    Ok(())
}
