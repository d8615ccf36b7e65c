//! Enrichment functions - canonical city and completeness for each stored listing

use crate::audit::types::{ListingAudit, ListingRow};
use crate::completion::{
    calculate_pg_property_completion, calculate_property_completion, completion_message,
    priority_suggestions,
};
use crate::listing::{ListingCategory, PropertyRecord};
use crate::location::{extract_city, normalize_location};
use tracing::{debug, info};

/// Canonical city for a listing.
/// Prefers the city field, falls back to pulling a city out of the locality.
/// Pure function - no side effects
pub fn canonical_city(record: &PropertyRecord) -> Option<String> {
    let known = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("unknown"))
            .map(str::to_string)
    };

    let city = match (known(&record.city), known(&record.locality)) {
        (Some(city), _) => normalize_location(&city),
        (None, Some(locality)) => extract_city(&locality),
        (None, None) => return None,
    };

    Some(city).filter(|c| !c.is_empty())
}

/// Score one listing with the table its property type calls for
/// Pure function - no side effects
pub fn audit_listing(row: &ListingRow) -> ListingAudit {
    let record = row.record();

    let (category, completion) = if record.is_pg() {
        (
            ListingCategory::PgHostel,
            calculate_pg_property_completion(&record),
        )
    } else {
        (record.category(), calculate_property_completion(&record))
    };

    let canonical_city = canonical_city(&record);

    let changed = row.completion_percentage != Some(i16::from(completion.percentage))
        || row.normalized_city != canonical_city;

    debug!(
        "Audited {}: {} {}% (city: {:?}, changed: {})",
        row.id, category, completion.percentage, canonical_city, changed
    );

    ListingAudit {
        id: row.id,
        category,
        canonical_city,
        message: completion_message(completion.percentage),
        suggestions: priority_suggestions(&completion.missing_fields),
        completion,
        changed,
    }
}

/// Audit every fetched listing
pub fn audit_all(rows: &[ListingRow]) -> Vec<ListingAudit> {
    info!("Auditing {} listings", rows.len());

    let audits: Vec<ListingAudit> = rows.iter().map(audit_listing).collect();

    let changed = audits.iter().filter(|a| a.changed).count();
    info!("Audit complete: {} listings, {} changed", audits.len(), changed);

    audits
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn mock_row(attributes: serde_json::Value) -> ListingRow {
        ListingRow {
            id: Uuid::new_v4(),
            attributes: Json(attributes),
            completion_percentage: None,
            normalized_city: None,
        }
    }

    #[test]
    fn test_canonical_city_prefers_city_field() {
        let record = PropertyRecord {
            city: Some("bengaluru".to_string()),
            locality: Some("Bandra West, Mumbai".to_string()),
            ..Default::default()
        };
        assert_eq!(canonical_city(&record), Some("Bangalore".to_string()));
    }

    #[test]
    fn test_canonical_city_from_locality() {
        let record = PropertyRecord {
            city: Some("Unknown".to_string()),
            locality: Some("Kothrud, Poona".to_string()),
            ..Default::default()
        };
        assert_eq!(canonical_city(&record), Some("Pune".to_string()));
    }

    #[test]
    fn test_canonical_city_missing() {
        assert_eq!(canonical_city(&PropertyRecord::default()), None);

        let record = PropertyRecord {
            city: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(canonical_city(&record), None);
    }

    #[test]
    fn test_audit_pg_listing_uses_pg_table() {
        let row = mock_row(json!({
            "property_type": "PG",
            "food_included": false,
            "expected_rent": 8000,
            "city": "Hyderabad"
        }));

        let audit = audit_listing(&row);

        assert_eq!(audit.category, ListingCategory::PgHostel);
        assert_eq!(
            audit.completion.completed_fields,
            vec!["food_included", "expected_rent", "city"]
        );
        assert_eq!(audit.canonical_city.as_deref(), Some("Hyderabad"));
        assert!(audit.changed);
    }

    #[test]
    fn test_audit_commercial_listing() {
        let row = mock_row(json!({
            "property_type": "office",
            "city": "gurugram",
            "images": []
        }));

        let audit = audit_listing(&row);

        assert_eq!(audit.category, ListingCategory::Commercial);
        assert_eq!(audit.canonical_city.as_deref(), Some("Gurgaon"));
        assert_eq!(audit.suggestions, vec!["images", "expected_price", "locality"]);
    }

    #[test]
    fn test_audit_unchanged_listing() {
        let mut row = mock_row(json!({ "city": "Chennai" }));
        let first = audit_listing(&row);

        row.completion_percentage = Some(i16::from(first.completion.percentage));
        row.normalized_city = first.canonical_city.clone();

        assert!(!audit_listing(&row).changed);
    }

    #[test]
    fn test_audit_all() {
        let rows = vec![mock_row(json!({})), mock_row(json!({ "title": "Villa" }))];
        let audits = audit_all(&rows);

        assert_eq!(audits.len(), 2);
        assert_eq!(audits[0].id, rows[0].id);
        assert_eq!(audits[0].completion.percentage, 0);
        assert_eq!(audits[1].completion.percentage, 5);
    }
}
