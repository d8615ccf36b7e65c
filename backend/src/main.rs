use anyhow::{Context, Result};
use property_listing_backend::api::{self, AppState};
use property_listing_backend::config::Config;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting listing API server");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Stored listing endpoints need the database, everything else is pure
    let db = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(url)
                .await
                .context("Failed to connect to database")?;
            info!("Database connected successfully");
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set, stored listing endpoints will return 503");
            None
        }
    };

    let app = api::router(AppState { db });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
