// Library module for testable functions

pub mod api;
pub mod audit;
pub mod calculators;
pub mod completion;
pub mod config;
pub mod listing;
pub mod location;
pub mod sanitize;

pub use completion::{
    calculate_pg_property_completion, calculate_property_completion, CompletionResult,
};
pub use listing::{ListingCategory, PropertyRecord};
pub use location::{extract_city, is_major_city, matches_location_filter, normalize_location};
