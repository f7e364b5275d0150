#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use hr_portal_api::config::config;
use hr_portal_api::services::seed::seed;
use hr_portal_api::{app, AppState};

pub const SUPERADMIN_USERNAME: &str = "root";
pub const SUPERADMIN_PASSWORD: &str = "root-password";

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// In-process server on its own runtime thread; it goes away with the test binary.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Read once by the config singleton, so set before anything touches it
        std::env::set_var("APP_ENV", "development");
        std::env::set_var("STORE_BACKEND", "memory");
        std::env::set_var("JWT_SECRET", "integration-test-secret");
        std::env::set_var("SECURITY_PASSWORD_COST", "4");
        std::env::set_var("API_ENABLE_REQUEST_LOGGING", "false");
        std::env::set_var("SEED_ENABLED", "true");
        std::env::set_var("SEED_SUPERADMIN_USERNAME", SUPERADMIN_USERNAME);
        std::env::set_var("SEED_SUPERADMIN_PASSWORD", SUPERADMIN_PASSWORD);

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let listener = TcpListener::bind(("127.0.0.1", port)).context("failed to bind test port")?;
        listener.set_nonblocking(true)?;

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("failed to build server runtime");
            runtime.block_on(async move {
                let state = AppState::in_memory();
                seed(state.store.clone(), &config().seed).await.expect("seeding failed");
                let listener = tokio::net::TcpListener::from_std(listener).expect("failed to adopt listener");
                axum::serve(listener, app(state)).await.expect("server");
            });
        });

        Ok(Self { port, base_url })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to start test server"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Suffix for names that must not collide across tests sharing one server.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<String> {
    let res = reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed for {}: {}", username, res.status());

    let body: Value = res.json().await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("login response has no token")
}

pub async fn super_admin_token(server: &TestServer) -> Result<String> {
    login(server, SUPERADMIN_USERNAME, SUPERADMIN_PASSWORD).await
}

/// Creates a fresh admin scoped to `location`/`department` and logs it in.
pub async fn admin_token(server: &TestServer, location: Option<&str>, department: Option<&str>) -> Result<String> {
    let root = super_admin_token(server).await?;
    let username = unique("admin");
    let password = "admin-password";

    let res = reqwest::Client::new()
        .post(server.url("/api/superadmin/admins"))
        .bearer_auth(&root)
        .json(&json!({
            "username": username,
            "password": password,
            "location": location,
            "department": department,
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "admin creation failed: {}", res.status());

    login(server, &username, password).await
}

/// Registers an employee through the public endpoint and returns its id.
pub async fn register_employee(server: &TestServer, location: &str, department: &str) -> Result<String> {
    let tag = unique("emp");
    let res = reqwest::Client::new()
        .post(server.url("/api/users"))
        .json(&json!({
            "firstName": "Test",
            "lastName": tag,
            "email": format!("{}@example.com", tag),
            "employeeId": tag,
            "location": location,
            "department": department,
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "registration failed: {}", res.status());

    let body: Value = res.json().await?;
    body["data"]["id"].as_str().map(str::to_string).context("user has no id")
}

/// Ids found in a `{"data": [...]}` envelope.
pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["id"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
