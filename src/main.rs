use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hr_portal_api::config::config;
use hr_portal_api::services::seed::seed;
use hr_portal_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config();
    tracing::info!("Starting HR portal API in {:?} mode", config.environment);

    if hr_portal_api::is_production!() && config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    let state = AppState::from_config(&config.database)
        .await
        .context("failed to open document store")?;

    if config.seed.enabled {
        let report = seed(state.store.clone(), &config.seed).await.context("seeding failed")?;
        tracing::info!(
            "Seeded {} document types, {} departments",
            report.document_types,
            report.departments
        );
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("HR portal API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
