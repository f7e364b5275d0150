pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "hrctl")]
#[command(about = "hrctl - operator tooling for the HR portal store")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the documents table and indexes (postgres only)")]
    Migrate,

    #[command(about = "Insert default document types, departments and the first super-admin")]
    Seed,

    #[command(about = "Create a super-admin account")]
    CreateSuperadmin(commands::account::SuperAdminArgs),

    #[command(about = "Create an admin scoped to a location and department")]
    CreateAdmin(commands::account::AdminArgs),

    #[command(about = "Issue a JWT for an existing account")]
    Token {
        #[arg(help = "Account username")]
        username: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::store::migrate(output_format).await,
        Commands::Seed => commands::store::seed(output_format).await,
        Commands::CreateSuperadmin(args) => commands::account::create_super_admin(args, output_format).await,
        Commands::CreateAdmin(args) => commands::account::create_admin(args, output_format).await,
        Commands::Token { username } => commands::account::token(&username, output_format).await,
    }
}
