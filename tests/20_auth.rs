mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn super_admin_login_issues_bearer_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": common::SUPERADMIN_USERNAME, "password": common::SUPERADMIN_PASSWORD }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["role"], "SUPERADMIN");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": common::SUPERADMIN_USERNAME, "password": "nope" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn me_echoes_token_identity() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server, Some("Mateur"), Some("Production")).await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["role"], "ADMIN");
    assert_eq!(body["data"]["location"], "Mateur");
    assert_eq!(body["data"]["department"], "Production");
    Ok(())
}

#[tokio::test]
async fn missing_or_tampered_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/admin/employees")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let mut token = common::super_admin_token(server).await?;
    token.push('x');
    let res = client
        .get(server.url("/api/admin/employees"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn admin_token_on_super_admin_route_is_forbidden() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server, Some("Mateur"), Some("Production")).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/superadmin/stats"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(server.url("/api/departments"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Forbidden", "location": "Mateur" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn deactivated_admin_cannot_log_in() -> Result<()> {
    let server = common::ensure_server().await?;
    let root = common::super_admin_token(server).await?;
    let client = reqwest::Client::new();
    let username = common::unique("leaver");

    let created: Value = client
        .post(server.url("/api/superadmin/admins"))
        .bearer_auth(&root)
        .json(&json!({ "username": username, "password": "pw", "location": "Messadine", "department": "IT" }))
        .send()
        .await?
        .json()
        .await?;
    let id = created["data"]["id"].as_str().unwrap_or_default().to_string();

    let res = client
        .delete(server.url(&format!("/api/superadmin/admins/{}", id)))
        .bearer_auth(&root)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    assert!(common::login(server, &username, "pw").await.is_err());
    Ok(())
}

#[tokio::test]
async fn duplicate_admin_username_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    let root = common::super_admin_token(server).await?;

    let res = reqwest::Client::new()
        .post(server.url("/api/superadmin/admins"))
        .bearer_auth(&root)
        .json(&json!({ "username": common::SUPERADMIN_USERNAME, "password": "pw", "location": "Mateur" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "DUPLICATE_ENTITY");
    Ok(())
}

#[tokio::test]
async fn token_of_deactivated_admin_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let root = common::super_admin_token(server).await?;
    let client = reqwest::Client::new();
    let username = common::unique("revoked");

    let created: Value = client
        .post(server.url("/api/superadmin/admins"))
        .bearer_auth(&root)
        .json(&json!({ "username": username, "password": "pw", "location": "Mateur", "department": "IT" }))
        .send()
        .await?
        .json()
        .await?;
    let id = created["data"]["id"].as_str().unwrap_or_default().to_string();
    let token = common::login(server, &username, "pw").await?;

    let res = client
        .get(server.url("/api/admin/employees"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    client
        .delete(server.url(&format!("/api/superadmin/admins/{}", id)))
        .bearer_auth(&root)
        .send()
        .await?;

    let res = client
        .get(server.url("/api/admin/employees"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}
