use clap::Args;
use serde_json::json;

use crate::cli::utils::{open_state, output_success};
use crate::cli::OutputFormat;
use crate::database::models::admin::AdminInput;
use crate::database::models::super_admin::SuperAdminInput;

#[derive(Args)]
pub struct SuperAdminArgs {
    #[arg(help = "Login name")]
    pub username: String,

    #[arg(long, help = "Password")]
    pub password: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,
}

#[derive(Args)]
pub struct AdminArgs {
    #[arg(help = "Login name")]
    pub username: String,

    #[arg(long, help = "Password")]
    pub password: String,

    #[arg(long, help = "Location the admin is scoped to")]
    pub location: String,

    #[arg(long, help = "Department the admin is scoped to")]
    pub department: String,
}

pub async fn create_super_admin(args: SuperAdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = open_state().await?;
    let profile = state
        .admins()
        .create_super_admin(SuperAdminInput {
            username: args.username,
            password: args.password,
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
        })
        .await?;

    output_success(
        output_format,
        &format!("Super-admin '{}' created", profile.username),
        Some(serde_json::to_value(&profile)?),
    )
}

pub async fn create_admin(args: AdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = open_state().await?;
    let profile = state
        .admins()
        .create_admin(AdminInput {
            username: args.username,
            password: args.password,
            location: Some(args.location),
            department: Some(args.department),
        })
        .await?;

    output_success(
        output_format,
        &format!("Admin '{}' created", profile.username),
        Some(serde_json::to_value(&profile)?),
    )
}

pub async fn token(username: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = open_state().await?;
    let issued = state.auth().issue_for(username).await?;

    output_success(
        output_format,
        &format!("Token issued for '{}'", issued.username),
        Some(json!({
            "token": issued.token,
            "expiresIn": issued.expires_in,
            "role": issued.role,
        })),
    )
}
