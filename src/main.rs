use clap::Parser;
use todo_api::cli::Cli;
use todo_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    todo_api::logging::init(&config.log)?;
    tracing::info!("Starting todo-api in {:?} mode", config.service.environment);

    todo_api::cli::run(cli, config).await
}
