//! Listing completeness scoring - weighted percentage of filled-in attributes
//! Drives progress indicators only, never gates submission

pub mod advice;
pub mod rules;

pub use advice::{completion_message, priority_suggestions};
pub use rules::{rules_for, FieldCheck, ScoringRule};

use crate::listing::{ListingCategory, PropertyRecord};
use serde::Serialize;
use tracing::debug;

/// Outcome of scoring one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    /// 0-100
    pub percentage: u8,
    /// Rule order, required and optional alike
    pub missing_fields: Vec<&'static str>,
    pub completed_fields: Vec<&'static str>,
}

/// Score a residential, commercial or plot listing.
/// The rule table follows `property_type`; anything unrecognized scores as residential.
pub fn calculate_property_completion(record: &PropertyRecord) -> CompletionResult {
    score(record, record.category())
}

/// Score a PG/hostel listing against its own rule table
pub fn calculate_pg_property_completion(record: &PropertyRecord) -> CompletionResult {
    score(record, ListingCategory::PgHostel)
}

fn score(record: &PropertyRecord, category: ListingCategory) -> CompletionResult {
    let mut total_score = 0u32;
    let mut max_score = 0u32;
    let mut missing_fields = Vec::new();
    let mut completed_fields = Vec::new();

    for rule in rules_for(category) {
        max_score += rule.weight;

        if rule.check.is_satisfied(record.field(rule.field)) {
            total_score += rule.weight;
            completed_fields.push(rule.field);
        } else {
            missing_fields.push(rule.field);
        }
    }

    let percentage = if max_score == 0 {
        0
    } else {
        (f64::from(total_score) / f64::from(max_score) * 100.0).round() as u8
    };

    debug!(
        "Scored {} listing: {}% ({} missing)",
        category,
        percentage,
        missing_fields.len()
    );

    CompletionResult {
        percentage,
        missing_fields,
        completed_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Collection;
    use serde_json::json;

    fn complete_residential() -> PropertyRecord {
        PropertyRecord {
            title: Some("Spacious 3BHK near Metro".to_string()),
            property_type: Some("apartment".to_string()),
            listing_type: Some("sale".to_string()),
            expected_price: Some(12_500_000.0),
            super_area: Some(1650.0),
            carpet_area: Some(1320.0),
            bhk_type: Some("3BHK".to_string()),
            bathrooms: Some("3".to_string()),
            balconies: Some(0.0),
            floor_no: Some("7".to_string()),
            total_floors: Some("14".to_string()),
            furnishing_status: Some("semi_furnished".to_string()),
            city: Some("Bangalore".to_string()),
            state: Some("Karnataka".to_string()),
            locality: Some("HSR Layout".to_string()),
            pincode: Some("560102".to_string()),
            images: vec![json!("front.jpg")],
            amenities: Some(Collection::List(vec![json!("lift"), json!("gym")])),
            description: Some("East facing flat with park view".to_string()),
            ..Default::default()
        }
    }

    fn complete_pg() -> PropertyRecord {
        PropertyRecord {
            title: Some("Sunrise Ladies PG".to_string()),
            property_type: Some("pg".to_string()),
            place_available_for: Some("female".to_string()),
            preferred_guests: Some("working_professionals".to_string()),
            available_from: Some("2024-07-01".to_string()),
            food_included: Some(false),
            expected_rent: Some(9500.0),
            security_deposit: Some("19000".to_string()),
            available_services: Some(Collection::Text("laundry, housekeeping".to_string())),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            locality: Some("Kothrud".to_string()),
            pincode: Some("411038".to_string()),
            images: vec![json!({"url": "room.jpg"})],
            description: Some("Twin sharing rooms with attached bath".to_string()),
            gate_closing_time: Some("22:30".to_string()),
            pg_rules: Some("No smoking".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_residential_scores_100() {
        let result = calculate_property_completion(&complete_residential());

        assert_eq!(result.percentage, 100);
        assert!(result.missing_fields.is_empty());
        assert_eq!(result.completed_fields.len(), rules::RESIDENTIAL_RULES.len());
    }

    #[test]
    fn test_empty_record_scores_0() {
        let result = calculate_property_completion(&PropertyRecord::default());

        assert_eq!(result.percentage, 0);
        assert!(result.completed_fields.is_empty());
        assert_eq!(result.missing_fields.len(), rules::RESIDENTIAL_RULES.len());

        let pg = calculate_pg_property_completion(&PropertyRecord::default());
        assert_eq!(pg.percentage, 0);
        assert!(pg.completed_fields.is_empty());
    }

    #[test]
    fn test_missing_fields_follow_rule_order() {
        let mut record = complete_residential();
        record.images.clear();
        record.description = None;
        record.floor_no = Some(String::new());

        let result = calculate_property_completion(&record);

        // 12 + 3 + 3 lost
        assert_eq!(result.percentage, 82);
        assert_eq!(result.missing_fields, vec!["floor_no", "images", "description"]);
    }

    #[test]
    fn test_images_count_whatever_their_shape() {
        let record = PropertyRecord::from_value(&json!({
            "images": [{"path": "a.jpg"}, 42]
        }));

        let result = calculate_property_completion(&record);

        assert_eq!(result.completed_fields, vec!["images"]);
        assert_eq!(result.percentage, 12);
    }

    #[test]
    fn test_required_and_optional_misses_share_one_list() {
        let mut record = complete_residential();
        record.city = Some("Unknown".to_string()); // required
        record.carpet_area = Some(0.0); // optional

        let result = calculate_property_completion(&record);

        assert_eq!(result.missing_fields, vec!["carpet_area", "city"]);
        assert_eq!(result.percentage, 89);
    }

    #[test]
    fn test_commercial_uses_commercial_table() {
        let record = PropertyRecord {
            property_type: Some("Showroom".to_string()),
            washrooms: Some("2".to_string()),
            ..Default::default()
        };

        let result = calculate_property_completion(&record);

        // property_type (5) + washrooms (4)
        assert_eq!(result.percentage, 9);
        assert_eq!(result.completed_fields, vec!["property_type", "washrooms"]);
    }

    #[test]
    fn test_plot_uses_plot_table() {
        let record = PropertyRecord {
            property_type: Some("plot".to_string()),
            plot_area: Some(2400.0),
            bhk_type: Some("3BHK".to_string()),
            ..Default::default()
        };

        let result = calculate_property_completion(&record);

        // bhk_type is not scored for plots
        assert_eq!(result.percentage, 20);
        assert!(!result.missing_fields.contains(&"bhk_type"));
        assert!(!result.completed_fields.contains(&"bhk_type"));
    }

    #[test]
    fn test_unknown_category_scores_as_residential() {
        let mut record = complete_residential();
        record.property_type = Some("treehouse".to_string());

        let result = calculate_property_completion(&record);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_complete_pg_scores_100() {
        let result = calculate_pg_property_completion(&complete_pg());

        assert_eq!(result.percentage, 100);
        assert!(result.missing_fields.is_empty());
    }

    #[test]
    fn test_pg_food_included_type_check() {
        let mut record = complete_pg();
        record.food_included = None;

        let result = calculate_pg_property_completion(&record);
        assert_eq!(result.missing_fields, vec!["food_included"]);
        assert_eq!(result.percentage, 95);

        // Literal false from JSON counts as answered
        let record = PropertyRecord::from_value(&json!({ "food_included": false }));
        let result = calculate_pg_property_completion(&record);
        assert_eq!(result.completed_fields, vec!["food_included"]);
    }

    #[test]
    fn test_pg_rejects_values_outside_allowed_sets() {
        let mut record = complete_pg();
        record.preferred_guests = Some("tourists".to_string());
        record.pincode = Some("4110".to_string());

        let result = calculate_pg_property_completion(&record);

        // Short pincode is fine for PG listings
        assert_eq!(result.missing_fields, vec!["preferred_guests"]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let record = complete_pg();
        assert_eq!(
            calculate_pg_property_completion(&record),
            calculate_pg_property_completion(&record)
        );

        let record = complete_residential();
        assert_eq!(
            calculate_property_completion(&record),
            calculate_property_completion(&record)
        );
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = calculate_property_completion(&PropertyRecord::default());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["percentage"], 0);
        assert!(value["missingFields"].is_array());
        assert!(value["completedFields"].is_array());
    }
}
