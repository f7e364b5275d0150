use anyhow::bail;

use crate::cli::utils::{open_state, output_success};
use crate::cli::OutputFormat;
use crate::config::{config, StoreBackend};
use crate::database::DatabaseManager;
use crate::services::seed::seed as run_seed;

pub async fn migrate(output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config().database;
    if database.backend != StoreBackend::Postgres {
        bail!("migrate requires STORE_BACKEND=postgres");
    }

    let pool = DatabaseManager::connect(database).await?;
    DatabaseManager::migrate(&pool).await?;
    output_success(output_format, "Document store migrated", None)
}

pub async fn seed(output_format: OutputFormat) -> anyhow::Result<()> {
    let state = open_state().await?;
    let report = run_seed(state.store.clone(), &config().seed).await?;

    let message = if report == Default::default() {
        "Store already populated, nothing inserted"
    } else {
        "Seed complete"
    };
    output_success(output_format, message, Some(serde_json::to_value(&report)?))
}
