//! Write functions - persist audit results back to the properties table

use crate::audit::types::{ListingAudit, WriteStats};
use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info, warn};

/// Write audit results, skipping listings whose stored values are already current.
/// A failing row is counted and logged, never fatal.
pub async fn write_audits(db: &PgPool, audits: &[ListingAudit]) -> Result<WriteStats> {
    info!("Writing {} audit results to database", audits.len());

    let mut stats = WriteStats::default();

    for audit in audits {
        if !audit.changed {
            stats.skipped += 1;
            continue;
        }

        match write_single_audit(db, audit).await {
            Ok(true) => stats.updated += 1,
            Ok(false) => {
                debug!("Listing {} disappeared before write", audit.id);
                stats.skipped += 1;
            }
            Err(e) => {
                warn!("Failed to write audit for {}: {}", audit.id, e);
                stats.errors += 1;
            }
        }
    }

    info!("Write complete: {}", stats);

    Ok(stats)
}

/// Returns true if the listing row was updated
async fn write_single_audit(db: &PgPool, audit: &ListingAudit) -> Result<bool> {
    let missing_fields: Vec<String> = audit
        .completion
        .missing_fields
        .iter()
        .map(|field| field.to_string())
        .collect();

    let result = sqlx::query(
        r#"
        UPDATE properties SET
            normalized_city = $2,
            completion_percentage = $3,
            missing_fields = $4,
            completion_checked_at = $5
        WHERE id = $1
        "#,
    )
    .bind(audit.id)
    .bind(&audit.canonical_city)
    .bind(i16::from(audit.completion.percentage))
    .bind(&missing_fields)
    .bind(Utc::now())
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
