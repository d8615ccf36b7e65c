//! Fetch functions - read stored listings from PostgreSQL

use crate::audit::types::ListingRow;
use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Fetch listings to audit, oldest id first. A limit of 0 reads every listing.
pub async fn fetch_listings(db: &PgPool, limit: usize) -> Result<Vec<ListingRow>> {
    info!("Fetching listings (limit: {})", limit);

    // LIMIT NULL is the same as no limit
    let limit = (limit > 0).then(|| i64::try_from(limit).unwrap_or(i64::MAX));

    let rows = sqlx::query_as::<_, ListingRow>(
        r#"
        SELECT id, to_jsonb(p) AS attributes, completion_percentage, normalized_city
        FROM properties p
        ORDER BY id
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;

    info!("Fetched {} listings", rows.len());

    Ok(rows)
}

/// Fetch a single listing by id
pub async fn fetch_listing(db: &PgPool, id: Uuid) -> Result<Option<ListingRow>, sqlx::Error> {
    sqlx::query_as::<_, ListingRow>(
        r#"
        SELECT id, to_jsonb(p) AS attributes, completion_percentage, normalized_city
        FROM properties p
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
