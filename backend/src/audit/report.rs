//! CSV report of audited listings

use crate::audit::types::ListingAudit;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: String,
    category: String,
    canonical_city: &'a str,
    percentage: u8,
    missing_fields: String,
    suggestions: String,
    message: &'a str,
}

/// Write one CSV row per audited listing; list columns are `;`-separated
pub fn write_report<W: Write>(writer: W, audits: &[ListingAudit]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for audit in audits {
        csv_writer.serialize(ReportRow {
            id: audit.id.to_string(),
            category: audit.category.to_string(),
            canonical_city: audit.canonical_city.as_deref().unwrap_or_default(),
            percentage: audit.completion.percentage,
            missing_fields: audit.completion.missing_fields.join(";"),
            suggestions: audit.suggestions.join(";"),
            message: audit.message,
        })?;
    }

    csv_writer.flush()?;
    info!("Wrote report for {} listings", audits.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::enrich::audit_listing;
    use crate::audit::types::ListingRow;
    use serde_json::json;
    use sqlx::types::Json;
    use uuid::Uuid;

    #[test]
    fn test_write_report() {
        let row = ListingRow {
            id: Uuid::nil(),
            attributes: Json(json!({
                "property_type": "land",
                "city": "Mysuru",
                "expected_price": 2500000
            })),
            completion_percentage: None,
            normalized_city: None,
        };
        let audits = vec![audit_listing(&row)];

        let mut out = Vec::new();
        write_report(&mut out, &audits).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "id,category,canonical_city,percentage,missing_fields,suggestions,message"
        );
        assert!(lines[1].starts_with("00000000-0000-0000-0000-000000000000,plot,Mysore,26,"));
        assert!(lines[1].contains("images;locality;plot_area"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_write_report_empty() {
        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();

        // No rows, no header
        assert!(out.is_empty());
    }
}
