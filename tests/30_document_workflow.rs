mod common;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn submit(server: &common::TestServer, user_id: &str) -> Result<Value> {
    let res = Client::new()
        .post(server.url("/api/documents"))
        .json(&json!({
            "userId": user_id,
            "documentTypes": ["Employment Contract", "Tax Documents"],
            "description": "Annual paperwork",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "submit failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["data"].clone())
}

async fn set_status(server: &common::TestServer, token: &str, id: &str, status: &str) -> Result<reqwest::Response> {
    Ok(Client::new()
        .put(server.url(&format!("/api/admin/documents/{}/status", id)))
        .bearer_auth(token)
        .json(&json!({ "newStatus": status, "comment": "checked" }))
        .send()
        .await?)
}

#[tokio::test]
async fn submitted_request_starts_pending_with_first_step_done() -> Result<()> {
    let server = common::ensure_server().await?;
    let user_id = common::register_employee(server, "Mateur", "Production").await?;
    let request = submit(server, &user_id).await?;

    assert_eq!(request["status"]["current"], "en attente");
    let progress = request["status"]["progress"].as_array().context("no progress")?;
    assert_eq!(progress.len(), 4);
    assert_eq!(progress[0]["completed"], true);
    assert!(progress[1..].iter().all(|step| step["completed"] == false));

    let mine: Value = Client::new()
        .get(server.url(&format!("/api/documents/user/{}", user_id)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(common::ids(&mine), vec![request["id"].as_str().unwrap_or_default().to_string()]);
    Ok(())
}

#[tokio::test]
async fn request_moves_through_workflow_and_stops_at_terminal_state() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::super_admin_token(server).await?;
    let user_id = common::register_employee(server, "Messadine", "Finance").await?;
    let id = submit(server, &user_id).await?["id"].as_str().unwrap_or_default().to_string();

    let res = set_status(server, &token, &id, "en cours").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = set_status(server, &token, &id, "accepté").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["status"]["current"], "accepté");

    let res = set_status(server, &token, &id, "refusé").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_TRANSITION");

    // Rejected change leaves the record untouched.
    let body: Value = Client::new()
        .get(server.url(&format!("/api/admin/documents/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["status"]["current"], "accepté");
    Ok(())
}

#[tokio::test]
async fn pending_cannot_jump_to_accepted() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::super_admin_token(server).await?;
    let user_id = common::register_employee(server, "Mateur", "IT").await?;
    let id = submit(server, &user_id).await?["id"].as_str().unwrap_or_default().to_string();

    let res = set_status(server, &token, &id, "accepté").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = set_status(server, &token, &id, "archived").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = set_status(server, &token, &id, "refusé").await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn submission_for_unknown_employee_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = Client::new()
        .post(server.url("/api/documents"))
        .json(&json!({ "userId": "missing", "documentTypes": ["Identity Card"] }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleted_request_is_gone() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::super_admin_token(server).await?;
    let user_id = common::register_employee(server, "Mateur", "Maintenance").await?;
    let id = submit(server, &user_id).await?["id"].as_str().unwrap_or_default().to_string();
    let client = Client::new();

    let res = client
        .delete(server.url(&format!("/api/admin/documents/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(server.url(&format!("/api/admin/documents/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let mine: Value = client
        .get(server.url(&format!("/api/documents/user/{}", user_id)))
        .send()
        .await?
        .json()
        .await?;
    assert!(common::ids(&mine).is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_employee_id_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let tag = common::unique("dup");
    let client = Client::new();
    let employee = |email: &str| {
        json!({
            "firstName": "Dup",
            "lastName": "Licate",
            "email": email,
            "employeeId": tag,
        })
    };

    let res = client
        .post(server.url("/api/users"))
        .json(&employee(&format!("{}@a.example", tag)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(server.url("/api/users"))
        .json(&employee(&format!("{}@b.example", tag)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}
