use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{AppConfig, Storage};
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "User-scoped to-do item service")]
#[command(version)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Path to the YAML config file (default: ./config.yaml if present)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Do not create or update the database schema on startup")]
        skip_migrations: bool,
    },

    #[command(about = "Create or update the database schema and exit")]
    Migrate,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { skip_migrations: false }) {
        Commands::Serve { skip_migrations } => crate::server::serve(&config, !skip_migrations).await,
        Commands::Migrate => migrate(&config).await,
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.storage == Storage::Memory {
        info!("in-memory storage has no schema to migrate");
        return Ok(());
    }

    let pool = DatabaseManager::connect(&config.database, config.service.environment).await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;
    Ok(())
}
