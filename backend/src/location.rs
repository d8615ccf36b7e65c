//! Location normalization - map free-text Indian city/locality strings to canonical names
//! Pure functions over static lookup tables

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Alias (lowercase, trimmed) -> canonical city name.
/// Order matters: the substring fallback returns the first alias contained in the input.
static LOCATION_ALIASES: &[(&str, &str)] = &[
    ("bangalore", "Bangalore"),
    ("bengaluru", "Bangalore"),
    ("blr", "Bangalore"),
    ("mumbai", "Mumbai"),
    ("bombay", "Mumbai"),
    ("navi mumbai", "Navi Mumbai"),
    ("thane", "Thane"),
    ("delhi", "Delhi"),
    ("new delhi", "Delhi"),
    ("gurgaon", "Gurgaon"),
    ("gurugram", "Gurgaon"),
    ("noida", "Noida"),
    ("greater noida", "Greater Noida"),
    ("chennai", "Chennai"),
    ("madras", "Chennai"),
    ("kolkata", "Kolkata"),
    ("calcutta", "Kolkata"),
    ("hyderabad", "Hyderabad"),
    ("secunderabad", "Hyderabad"),
    ("pune", "Pune"),
    ("poona", "Pune"),
    ("ahmedabad", "Ahmedabad"),
    ("amdavad", "Ahmedabad"),
    ("jaipur", "Jaipur"),
    ("lucknow", "Lucknow"),
    ("chandigarh", "Chandigarh"),
    ("kochi", "Kochi"),
    ("cochin", "Kochi"),
    ("thiruvananthapuram", "Thiruvananthapuram"),
    ("trivandrum", "Thiruvananthapuram"),
    ("mysore", "Mysore"),
    ("mysuru", "Mysore"),
    ("mangalore", "Mangalore"),
    ("mangaluru", "Mangalore"),
    ("visakhapatnam", "Visakhapatnam"),
    ("vizag", "Visakhapatnam"),
    ("vadodara", "Vadodara"),
    ("baroda", "Vadodara"),
    ("indore", "Indore"),
    ("bhopal", "Bhopal"),
    ("nagpur", "Nagpur"),
    ("surat", "Surat"),
    ("coimbatore", "Coimbatore"),
];

/// Cities matched at city level rather than locality level in search filters
static MAJOR_CITIES: &[&str] = &[
    "mumbai",
    "delhi",
    "bangalore",
    "hyderabad",
    "chennai",
    "kolkata",
    "pune",
    "ahmedabad",
    "gurgaon",
    "noida",
    "navi mumbai",
    "thane",
];

static ALIAS_LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| LOCATION_ALIASES.iter().copied().collect());

static MAJOR_CITY_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MAJOR_CITIES.iter().copied().collect());

/// Every alias with its canonical name, in lookup order
pub fn location_aliases() -> &'static [(&'static str, &'static str)] {
    LOCATION_ALIASES
}

/// Normalize a location string to its canonical display form.
///
/// Exact alias match first, then the first alias contained anywhere in the
/// input, then title-casing of the trimmed input. Never fails; empty input
/// yields an empty string.
pub fn normalize_location(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let key = trimmed.to_lowercase();

    if let Some(canonical) = ALIAS_LOOKUP.get(key.as_str()) {
        return canonical.to_string();
    }

    // First textual match wins, not the longest
    if let Some((_, canonical)) = LOCATION_ALIASES
        .iter()
        .find(|(alias, _)| key.contains(*alias))
    {
        return canonical.to_string();
    }

    title_case(trimmed)
}

/// Same as [`normalize_location`] for values that may be absent
pub fn normalize_optional_location(raw: Option<&str>) -> String {
    raw.map(normalize_location).unwrap_or_default()
}

/// Check membership in the major city set.
/// No alias resolution happens here, callers normalize first.
pub fn is_major_city(location: &str) -> bool {
    MAJOR_CITY_SET.contains(location.trim().to_lowercase().as_str())
}

/// True when both locations normalize to the same place or one contains the other.
/// Only raw empty input is rejected; whitespace normalizes to "" and matches anything.
pub fn matches_location_filter(property_location: &str, filter_location: &str) -> bool {
    if property_location.is_empty() || filter_location.is_empty() {
        return false;
    }

    let property = normalize_location(property_location).to_lowercase();
    let filter = normalize_location(filter_location).to_lowercase();

    property == filter || property.contains(&filter) || filter.contains(&property)
}

/// Pull the city out of a "locality, city, state" style string
pub fn extract_city(full_location: &str) -> String {
    let parts: Vec<&str> = full_location.split(',').collect();

    for part in &parts {
        let normalized = normalize_location(part);
        if is_major_city(&normalized) {
            return normalized;
        }
    }

    match parts.as_slice() {
        [_, .., last] => normalize_location(last),
        _ => normalize_location(full_location),
    }
}

/// Uppercase the first letter of each whitespace-delimited word, lowercase the rest.
/// Separators are kept as written.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_start = true;

    for c in input.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}
