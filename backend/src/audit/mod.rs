//! Listing audit module - recompute completeness and canonical city for stored listings

pub mod enrich;
pub mod fetch;
pub mod report;
pub mod types;
pub mod write;

pub use types::*;
