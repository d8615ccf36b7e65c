//! Listing audit orchestrator - runs fetch, score, report and write steps

use anyhow::{Context, Result};
use chrono::Utc;
use property_listing_backend::audit::{
    enrich, fetch, report, write, AuditOptions, AuditSummary, WriteStats,
};
use property_listing_backend::config::Config;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::fs::File;
use std::io::BufWriter;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    info!("Starting listing audit");

    let options = AuditOptions::from_args(env::args().skip(1))?;

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Connect to database
    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(config.require_database_url()?)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected");

    let started_at = Utc::now();

    // Step 1: Fetch stored listings
    info!("Step 1/3: Fetching listings...");
    let rows = fetch::fetch_listings(&db, config.audit_limit).await?;
    info!("✓ Fetched {} listings", rows.len());

    if config.audit_limit > 0 {
        warn!("Limited to first {} listings", config.audit_limit);
    }

    // Step 2: Score completeness and resolve cities
    info!("Step 2/3: Scoring listings...");
    let audits = enrich::audit_all(&rows);
    info!("✓ Scored {} listings", audits.len());

    if let Some(path) = &options.report_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        match report::write_report(BufWriter::new(file), &audits) {
            Ok(()) => info!("✓ Report written to {}", path.display()),
            Err(e) => error!("✗ Report failed: {}", e),
        }
    }

    // Step 3: Write results back
    let stats = if options.dry_run {
        warn!("Step 3/3: Dry run, skipping database writes");
        WriteStats::default()
    } else {
        info!("Step 3/3: Writing to database...");
        write::write_audits(&db, &audits).await?
    };

    let summary = AuditSummary::new(started_at, &audits, stats);
    info!("Listing audit complete: {}", summary);

    Ok(())
}
