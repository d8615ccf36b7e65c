//! Property listing record - one superset struct over every category's attributes
//! Deserialization is lenient: a wrongly typed attribute reads as absent, never as an error.
//! Text attributes keep arrays and objects as compact JSON so they still count as filled in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse listing type that selects a completeness rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    Residential,
    Commercial,
    Plot,
    PgHostel,
}

impl ListingCategory {
    /// Classify a `property_type` for the standard scorer.
    /// Unrecognized values (PG/hostel included) fall through to residential.
    pub fn classify(property_type: Option<&str>) -> Self {
        let normalized = property_type.unwrap_or_default().trim().to_lowercase();

        match normalized.as_str() {
            "commercial" | "office" | "shop" | "warehouse" | "showroom" => {
                ListingCategory::Commercial
            }
            "plot" | "land" => ListingCategory::Plot,
            _ => ListingCategory::Residential,
        }
    }

    /// Whether a `property_type` names a PG or hostel listing
    pub fn is_pg_type(property_type: Option<&str>) -> bool {
        let normalized = property_type.unwrap_or_default().trim().to_lowercase();
        matches!(normalized.as_str(), "pg" | "hostel" | "pg/hostel" | "pg_hostel")
    }
}

impl std::fmt::Display for ListingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingCategory::Residential => write!(f, "residential"),
            ListingCategory::Commercial => write!(f, "commercial"),
            ListingCategory::Plot => write!(f, "plot"),
            ListingCategory::PgHostel => write!(f, "pg_hostel"),
        }
    }
}

/// Collection-like attribute; any of the three shapes counts when non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Collection {
    Map(Map<String, Value>),
    List(Vec<Value>),
    Text(String),
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        match self {
            Collection::Map(map) => map.is_empty(),
            Collection::List(items) => items.is_empty(),
            Collection::Text(text) => text.is_empty(),
        }
    }
}

/// Property listing attributes - pure data, read only by the scorers
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PropertyRecord {
    // Core listing
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub property_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub listing_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,

    // Pricing
    #[serde(deserialize_with = "lenient::number")]
    pub expected_price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub expected_rent: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub security_deposit: Option<String>,

    // Area and layout
    #[serde(deserialize_with = "lenient::number")]
    pub super_area: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub carpet_area: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub plot_area: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub bhk_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bathrooms: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub balconies: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub washrooms: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub floor_no: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub total_floors: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub furnishing_status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub facing: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub open_sides: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub boundary_wall: Option<String>,

    // Address
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub locality: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pincode: Option<String>,

    // Media and features
    /// Image entries in any shape: URL strings, upload objects, ...
    #[serde(deserialize_with = "lenient::list")]
    pub images: Vec<Value>,
    #[serde(deserialize_with = "lenient::collection")]
    pub amenities: Option<Collection>,

    // PG / hostel
    #[serde(deserialize_with = "lenient::text")]
    pub place_available_for: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub preferred_guests: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub available_from: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub food_included: Option<bool>,
    #[serde(deserialize_with = "lenient::collection")]
    pub available_services: Option<Collection>,
    #[serde(deserialize_with = "lenient::text")]
    pub gate_closing_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pg_rules: Option<String>,
}

/// Borrowed, typed view of one attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    Flag(bool),
    List(&'a [Value]),
    Collection(&'a Collection),
}

impl FieldValue<'_> {
    /// Present, not null and not an empty string
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(text) => !text.is_empty(),
            _ => true,
        }
    }
}

impl PropertyRecord {
    /// Build a record from arbitrary JSON; non-objects yield an empty record
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return PropertyRecord::default();
        }
        PropertyRecord::deserialize(value).unwrap_or_default()
    }

    pub fn category(&self) -> ListingCategory {
        ListingCategory::classify(self.property_type.as_deref())
    }

    pub fn is_pg(&self) -> bool {
        ListingCategory::is_pg_type(self.property_type.as_deref())
    }

    /// Look up an attribute by its field name
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => text(&self.title),
            "property_type" => text(&self.property_type),
            "listing_type" => text(&self.listing_type),
            "description" => text(&self.description),
            "expected_price" => number(self.expected_price),
            "expected_rent" => number(self.expected_rent),
            "security_deposit" => text(&self.security_deposit),
            "super_area" => number(self.super_area),
            "carpet_area" => number(self.carpet_area),
            "plot_area" => number(self.plot_area),
            "bhk_type" => text(&self.bhk_type),
            "bathrooms" => text(&self.bathrooms),
            "balconies" => number(self.balconies),
            "washrooms" => text(&self.washrooms),
            "floor_no" => text(&self.floor_no),
            "total_floors" => text(&self.total_floors),
            "furnishing_status" => text(&self.furnishing_status),
            "facing" => text(&self.facing),
            "open_sides" => text(&self.open_sides),
            "boundary_wall" => text(&self.boundary_wall),
            "city" => text(&self.city),
            "state" => text(&self.state),
            "locality" => text(&self.locality),
            "pincode" => text(&self.pincode),
            "images" => FieldValue::List(&self.images),
            "amenities" => collection(&self.amenities),
            "place_available_for" => text(&self.place_available_for),
            "preferred_guests" => text(&self.preferred_guests),
            "available_from" => text(&self.available_from),
            "food_included" => self.food_included.map_or(FieldValue::Missing, FieldValue::Flag),
            "available_services" => collection(&self.available_services),
            "gate_closing_time" => text(&self.gate_closing_time),
            "pg_rules" => text(&self.pg_rules),
            _ => FieldValue::Missing,
        }
    }
}

fn text(value: &Option<String>) -> FieldValue<'_> {
    value.as_deref().map_or(FieldValue::Missing, FieldValue::Text)
}

fn number(value: Option<f64>) -> FieldValue<'static> {
    value.map_or(FieldValue::Missing, FieldValue::Number)
}

fn collection(value: &Option<Collection>) -> FieldValue<'_> {
    value.as_ref().map_or(FieldValue::Missing, FieldValue::Collection)
}

/// Deserializers that type-check instead of failing
mod lenient {
    use super::Collection;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            value @ (Value::Array(_) | Value::Object(_)) => Some(value.to_string()),
            Value::Null => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }

    /// Any array, every element kept whatever its shape
    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items,
            _ => Vec::new(),
        })
    }

    pub fn collection<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Collection>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Object(map) => Some(Collection::Map(map)),
            Value::Array(items) => Some(Collection::List(items)),
            Value::String(s) => Some(Collection::Text(s)),
            _ => None,
        })
    }
}
