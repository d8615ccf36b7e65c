//! Core data types for the listing audit pipeline

use crate::completion::CompletionResult;
use crate::listing::{ListingCategory, PropertyRecord};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use std::path::PathBuf;
use uuid::Uuid;

/// Stored listing as read from the properties table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    pub id: Uuid,
    /// Whole row as JSON, scored leniently
    pub attributes: Json<serde_json::Value>,
    pub completion_percentage: Option<i16>,
    pub normalized_city: Option<String>,
}

impl ListingRow {
    pub fn record(&self) -> PropertyRecord {
        PropertyRecord::from_value(&self.attributes.0)
    }
}

/// Scoring outcome for one stored listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingAudit {
    pub id: Uuid,
    pub category: ListingCategory,
    pub canonical_city: Option<String>,
    pub completion: CompletionResult,
    pub message: &'static str,
    pub suggestions: Vec<&'static str>,
    /// Stored percentage or city differs from the fresh result
    #[serde(skip)]
    pub changed: bool,
}

/// Write operation statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for WriteStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "updated: {}, skipped: {}, errors: {}",
            self.updated, self.skipped, self.errors
        )
    }
}

/// Audit run record
#[derive(Debug, Clone)]
pub struct AuditSummary {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub listings: usize,
    pub average_percentage: f64,
    pub stats: WriteStats,
}

impl AuditSummary {
    pub fn new(started_at: DateTime<Utc>, audits: &[ListingAudit], stats: WriteStats) -> Self {
        let average_percentage = if audits.is_empty() {
            0.0
        } else {
            let total: f64 = audits
                .iter()
                .map(|a| f64::from(a.completion.percentage))
                .sum();
            total / audits.len() as f64
        };

        AuditSummary {
            started_at,
            completed_at: Utc::now(),
            listings: audits.len(),
            average_percentage,
            stats,
        }
    }
}

impl std::fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} listings, average completion {:.1}%, {} (took {}s)",
            self.listings,
            self.average_percentage,
            self.stats,
            (self.completed_at - self.started_at).num_seconds()
        )
    }
}

/// Command line options for the audit job
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditOptions {
    /// Score and report without writing back to the database
    pub dry_run: bool,
    pub report_path: Option<PathBuf>,
}

impl AuditOptions {
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = AuditOptions::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dry-run" => options.dry_run = true,
                "--report" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--report requires a file path"))?;
                    options.report_path = Some(PathBuf::from(path));
                }
                other => return Err(anyhow::anyhow!("Unknown argument: {}", other)),
            }
        }

        Ok(options)
    }
}
