use dotenvy::dotenv;
use duocash::config::{AppConfig, database};
use duocash::errors::Result;
use duocash::services::{LogNotifier, TemplateAdvisor};
use duocash::web::{AppState, run_server};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize the database
    let db = database::create_connection(&config.database_url).await?;
    database::create_tables(&db).await?;
    info!("database initialized");

    // 5. Wire collaborators and serve
    let state = AppState::new(
        db,
        config,
        Arc::new(LogNotifier),
        Arc::new(TemplateAdvisor),
    );
    run_server(state).await
}
