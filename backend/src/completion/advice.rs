//! User-facing hints derived from a completion result

/// Fields worth nudging the lister about, most valuable first
static PRIORITY_FIELDS: &[&str] = &[
    "images",
    "expected_price",
    "expected_rent",
    "city",
    "locality",
    "super_area",
    "plot_area",
    "bhk_type",
    "description",
    "amenities",
    "available_services",
    "pincode",
];

const MAX_SUGGESTIONS: usize = 3;

/// Encouragement line for a completion percentage
pub fn completion_message(percentage: u8) -> &'static str {
    match percentage {
        90..=u8::MAX => "Excellent! Your listing is nearly complete and ready to attract buyers.",
        80..=89 => "Great job! Add a few more details to make your listing stand out.",
        70..=79 => "Good progress! A few more details will improve your visibility.",
        60..=69 => "You're getting there. Complete the key details to attract more interest.",
        50..=59 => "Halfway there! Add photos and key details to boost your listing.",
        30..=49 => "Your listing needs more information to attract serious enquiries.",
        _ => "Let's get started! Add basic details, photos and location to your listing.",
    }
}

/// Up to three missing fields, in priority order rather than input order
pub fn priority_suggestions<S: AsRef<str>>(missing_fields: &[S]) -> Vec<&'static str> {
    PRIORITY_FIELDS
        .iter()
        .copied()
        .filter(|field| missing_fields.iter().any(|m| m.as_ref() == *field))
        .take(MAX_SUGGESTIONS)
        .collect()
}
