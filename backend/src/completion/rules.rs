//! Completeness rule tables - one constant table per listing category
//! Weights in every table sum to 100

use crate::listing::{FieldValue, ListingCategory};

const PLACE_SENTINELS: &[&str] = &["Unknown", "unknown"];
const PINCODE_SENTINELS: &[&str] = &["000000", "0"];

const PG_AVAILABLE_FOR: &[&str] = &["male", "female", "anyone"];
const PG_PREFERRED_GUESTS: &[&str] = &["students", "working_professionals", "both"];

/// Predicate deciding whether one attribute counts as filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    /// Present and not an empty string
    Present,
    NonEmptyList,
    /// Non-empty object, list or string
    Collection,
    /// Number strictly greater than zero
    Positive,
    /// Number greater than or equal to zero
    NonNegative,
    /// Non-empty and not an "Unknown" placeholder
    KnownPlace,
    /// Six digits, not a zero placeholder
    Pincode,
    /// Not a zero placeholder, any format
    PincodeLoose,
    /// More than the given number of characters
    LongerThan(usize),
    OneOf(&'static [&'static str]),
    /// Any boolean, `false` included
    Boolean,
}

impl FieldCheck {
    pub fn is_satisfied(&self, value: FieldValue<'_>) -> bool {
        match (*self, value) {
            (FieldCheck::Present, value) => value.is_present(),
            (FieldCheck::NonEmptyList, FieldValue::List(items)) => !items.is_empty(),
            (FieldCheck::Collection, FieldValue::Collection(collection)) => !collection.is_empty(),
            (FieldCheck::Positive, FieldValue::Number(n)) => n > 0.0,
            (FieldCheck::NonNegative, FieldValue::Number(n)) => n >= 0.0,
            (FieldCheck::KnownPlace, FieldValue::Text(place)) => {
                !place.is_empty() && !is_one_of(PLACE_SENTINELS, place)
            }
            (FieldCheck::Pincode, FieldValue::Text(pincode)) => {
                !is_one_of(PINCODE_SENTINELS, pincode) && is_six_digit_pincode(pincode)
            }
            (FieldCheck::PincodeLoose, FieldValue::Text(pincode)) => {
                !pincode.is_empty() && !is_one_of(PINCODE_SENTINELS, pincode)
            }
            (FieldCheck::LongerThan(min), FieldValue::Text(text)) => text.chars().count() > min,
            (FieldCheck::OneOf(allowed), FieldValue::Text(text)) => is_one_of(allowed, text),
            (FieldCheck::Boolean, FieldValue::Flag(_)) => true,
            _ => false,
        }
    }
}

fn is_one_of(allowed: &[&str], value: &str) -> bool {
    allowed.iter().any(|candidate| *candidate == value)
}

fn is_six_digit_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit())
}

/// One weighted entry of a rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRule {
    pub field: &'static str,
    pub weight: u32,
    /// Tracked for the UI; does not change scoring
    pub required: bool,
    pub check: FieldCheck,
}

const fn rule(field: &'static str, weight: u32, required: bool, check: FieldCheck) -> ScoringRule {
    ScoringRule {
        field,
        weight,
        required,
        check,
    }
}

pub static RESIDENTIAL_RULES: &[ScoringRule] = &[
    rule("title", 5, true, FieldCheck::Present),
    rule("property_type", 5, true, FieldCheck::Present),
    rule("listing_type", 5, true, FieldCheck::Present),
    rule("expected_price", 10, true, FieldCheck::Positive),
    rule("super_area", 8, true, FieldCheck::Positive),
    rule("carpet_area", 5, false, FieldCheck::Positive),
    rule("bhk_type", 8, true, FieldCheck::Present),
    rule("bathrooms", 5, false, FieldCheck::Present),
    rule("balconies", 3, false, FieldCheck::NonNegative),
    rule("floor_no", 3, false, FieldCheck::Present),
    rule("total_floors", 3, false, FieldCheck::Present),
    rule("furnishing_status", 4, false, FieldCheck::Present),
    rule("city", 6, true, FieldCheck::KnownPlace),
    rule("state", 3, true, FieldCheck::KnownPlace),
    rule("locality", 5, true, FieldCheck::LongerThan(2)),
    rule("pincode", 3, true, FieldCheck::Pincode),
    rule("images", 12, true, FieldCheck::NonEmptyList),
    rule("amenities", 4, false, FieldCheck::Collection),
    rule("description", 3, false, FieldCheck::LongerThan(5)),
];

pub static COMMERCIAL_RULES: &[ScoringRule] = &[
    rule("title", 5, true, FieldCheck::Present),
    rule("property_type", 5, true, FieldCheck::Present),
    rule("listing_type", 5, true, FieldCheck::Present),
    rule("expected_price", 12, true, FieldCheck::Positive),
    rule("super_area", 10, true, FieldCheck::Positive),
    rule("carpet_area", 6, false, FieldCheck::Positive),
    rule("washrooms", 4, false, FieldCheck::Present),
    rule("floor_no", 4, false, FieldCheck::Present),
    rule("total_floors", 3, false, FieldCheck::Present),
    rule("furnishing_status", 4, false, FieldCheck::Present),
    rule("city", 6, true, FieldCheck::KnownPlace),
    rule("state", 3, true, FieldCheck::KnownPlace),
    rule("locality", 5, true, FieldCheck::LongerThan(2)),
    rule("pincode", 3, true, FieldCheck::Pincode),
    rule("images", 12, true, FieldCheck::NonEmptyList),
    rule("amenities", 5, false, FieldCheck::Collection),
    rule("description", 8, false, FieldCheck::LongerThan(5)),
];

pub static PLOT_RULES: &[ScoringRule] = &[
    rule("title", 6, true, FieldCheck::Present),
    rule("property_type", 5, true, FieldCheck::Present),
    rule("listing_type", 5, true, FieldCheck::Present),
    rule("expected_price", 14, true, FieldCheck::Positive),
    rule("plot_area", 15, true, FieldCheck::Positive),
    rule("boundary_wall", 4, false, FieldCheck::Present),
    rule("open_sides", 4, false, FieldCheck::Present),
    rule("facing", 4, false, FieldCheck::Present),
    rule("city", 7, true, FieldCheck::KnownPlace),
    rule("state", 4, true, FieldCheck::KnownPlace),
    rule("locality", 6, true, FieldCheck::LongerThan(2)),
    rule("pincode", 4, true, FieldCheck::Pincode),
    rule("images", 14, true, FieldCheck::NonEmptyList),
    rule("description", 8, false, FieldCheck::LongerThan(5)),
];

pub static PG_HOSTEL_RULES: &[ScoringRule] = &[
    rule("title", 6, true, FieldCheck::Present),
    rule("place_available_for", 6, true, FieldCheck::OneOf(PG_AVAILABLE_FOR)),
    rule("preferred_guests", 6, true, FieldCheck::OneOf(PG_PREFERRED_GUESTS)),
    rule("available_from", 4, false, FieldCheck::Present),
    rule("food_included", 5, false, FieldCheck::Boolean),
    rule("expected_rent", 14, true, FieldCheck::Positive),
    rule("security_deposit", 4, false, FieldCheck::Present),
    rule("available_services", 6, false, FieldCheck::Collection),
    rule("city", 7, true, FieldCheck::KnownPlace),
    rule("state", 4, true, FieldCheck::KnownPlace),
    rule("locality", 6, true, FieldCheck::LongerThan(2)),
    rule("pincode", 3, true, FieldCheck::PincodeLoose),
    rule("images", 15, true, FieldCheck::NonEmptyList),
    rule("description", 8, false, FieldCheck::LongerThan(5)),
    rule("gate_closing_time", 2, false, FieldCheck::Present),
    rule("pg_rules", 4, false, FieldCheck::Present),
];

/// Rule table for a category
pub fn rules_for(category: ListingCategory) -> &'static [ScoringRule] {
    match category {
        ListingCategory::Residential => RESIDENTIAL_RULES,
        ListingCategory::Commercial => COMMERCIAL_RULES,
        ListingCategory::Plot => PLOT_RULES,
        ListingCategory::PgHostel => PG_HOSTEL_RULES,
    }
}
