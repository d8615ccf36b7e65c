//! HTTP API exposing location, completeness and calculator helpers to the web UI

use crate::audit::{enrich, fetch, ListingAudit};
use crate::calculators::{
    calculate_affordable_budget, calculate_emi, calculate_rental_yield, BudgetEstimate,
    EmiBreakdown, MAX_AMOUNT, MAX_ANNUAL_RATE_PCT, MAX_TENURE_MONTHS,
};
use crate::completion::{
    calculate_pg_property_completion, calculate_property_completion, completion_message,
    priority_suggestions, CompletionResult,
};
use crate::listing::PropertyRecord;
use crate::location::{extract_city, is_major_city, matches_location_filter, normalize_location};
use crate::sanitize::{is_valid_email, sanitize_phone, sanitize_search_query, sanitize_text};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::error;
use uuid::Uuid;

const NAME_MAX_CHARS: usize = 80;
const MESSAGE_MAX_CHARS: usize = 1000;

#[derive(Clone, Default)]
pub struct AppState {
    /// Absent when the server runs without a database
    pub db: Option<PgPool>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database is not configured")]
    DatabaseUnavailable,

    #[error("listing {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody(rejection) => rejection.status(),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiResponse {
            message: self.to_string(),
            status: "error".to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
    pub status: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api/health", get(health_check))
        .route("/api/locations/normalize", get(normalize))
        .route("/api/locations/city", get(city))
        .route("/api/locations/matches", get(location_matches))
        .route("/api/listings/completion", post(listing_completion))
        .route("/api/properties/:id/completion", get(stored_listing_completion))
        .route("/api/calculators/emi", post(emi))
        .route("/api/calculators/budget", post(budget))
        .route("/api/calculators/rental-yield", post(rental_yield))
        .route("/api/enquiries/validate", post(validate_enquiry))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse> {
    Json(ApiResponse {
        message: "Listing API is running!".to_string(),
        status: "ok".to_string(),
    })
}

#[derive(Deserialize)]
struct LocationQuery {
    q: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NormalizedLocation {
    input: String,
    normalized: String,
    is_major_city: bool,
}

async fn normalize(Query(query): Query<LocationQuery>) -> Json<NormalizedLocation> {
    let input = sanitize_search_query(query.q.as_deref().unwrap_or_default());
    let normalized = normalize_location(&input);

    Json(NormalizedLocation {
        is_major_city: is_major_city(&normalized),
        input,
        normalized,
    })
}

#[derive(Serialize)]
struct ExtractedCity {
    input: String,
    city: String,
}

async fn city(Query(query): Query<LocationQuery>) -> Json<ExtractedCity> {
    let input = sanitize_search_query(query.q.as_deref().unwrap_or_default());

    Json(ExtractedCity {
        city: extract_city(&input),
        input,
    })
}

#[derive(Deserialize)]
struct MatchQuery {
    property: Option<String>,
    filter: Option<String>,
}

#[derive(Serialize)]
struct LocationMatch {
    matches: bool,
}

async fn location_matches(Query(query): Query<MatchQuery>) -> Json<LocationMatch> {
    let property = sanitize_search_query(query.property.as_deref().unwrap_or_default());
    let filter = sanitize_search_query(query.filter.as_deref().unwrap_or_default());

    Json(LocationMatch {
        matches: matches_location_filter(&property, &filter),
    })
}

#[derive(Serialize)]
struct CompletionResponse {
    #[serde(flatten)]
    completion: CompletionResult,
    message: &'static str,
    suggestions: Vec<&'static str>,
}

impl From<CompletionResult> for CompletionResponse {
    fn from(completion: CompletionResult) -> Self {
        CompletionResponse {
            message: completion_message(completion.percentage),
            suggestions: priority_suggestions(&completion.missing_fields),
            completion,
        }
    }
}

/// Score a listing straight from form state; PG/hostel types use the PG table
async fn listing_completion(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let Json(body) = payload?;
    let record = PropertyRecord::from_value(&body);

    let completion = if record.is_pg() {
        calculate_pg_property_completion(&record)
    } else {
        calculate_property_completion(&record)
    };

    Ok(Json(completion.into()))
}

async fn stored_listing_completion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingAudit>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let row = fetch::fetch_listing(db, id)
        .await?
        .ok_or(ApiError::NotFound(id))?;

    Ok(Json(enrich::audit_listing(&row)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmiRequest {
    principal: f64,
    annual_rate: f64,
    tenure_months: u32,
}

async fn emi(
    payload: Result<Json<EmiRequest>, JsonRejection>,
) -> Result<Json<EmiBreakdown>, ApiError> {
    let Json(req) = payload?;
    calculate_emi(req.principal, req.annual_rate, req.tenure_months)
        .map(Json)
        .ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "principal must be between 0 and {}, {}",
                MAX_AMOUNT,
                loan_terms_hint()
            ))
        })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRequest {
    monthly_income: f64,
    #[serde(default)]
    existing_emis: f64,
    annual_rate: f64,
    tenure_months: u32,
    #[serde(default)]
    down_payment: f64,
}

async fn budget(
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> Result<Json<BudgetEstimate>, ApiError> {
    let Json(req) = payload?;
    calculate_affordable_budget(
        req.monthly_income,
        req.existing_emis,
        req.annual_rate,
        req.tenure_months,
        req.down_payment,
    )
    .map(Json)
    .ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "income must be between 0 and {}, EMIs and down payment must not be negative, {}",
            MAX_AMOUNT,
            loan_terms_hint()
        ))
    })
}

fn loan_terms_hint() -> String {
    format!(
        "rate must be 0-{}% and tenure 1-{} months",
        MAX_ANNUAL_RATE_PCT, MAX_TENURE_MONTHS
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RentalYieldRequest {
    price: f64,
    monthly_rent: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RentalYield {
    rental_yield: f64,
}

async fn rental_yield(
    payload: Result<Json<RentalYieldRequest>, JsonRejection>,
) -> Result<Json<RentalYield>, ApiError> {
    let Json(req) = payload?;
    calculate_rental_yield(req.price, req.monthly_rent)
        .map(|rental_yield| Json(RentalYield { rental_yield }))
        .ok_or_else(|| ApiError::InvalidInput("price must be positive".to_string()))
}

#[derive(Deserialize)]
struct EnquiryRequest {
    name: String,
    phone: String,
    email: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
struct Enquiry {
    name: String,
    phone: String,
    email: Option<String>,
    message: Option<String>,
}

/// Clean up a lead capture form before it is stored
async fn validate_enquiry(
    payload: Result<Json<EnquiryRequest>, JsonRejection>,
) -> Result<Json<Enquiry>, ApiError> {
    let Json(req) = payload?;
    let mut problems = Vec::new();

    let name = sanitize_text(&req.name, NAME_MAX_CHARS);
    if name.is_empty() {
        problems.push("name is required");
    }

    let phone = sanitize_phone(&req.phone);
    if phone.is_none() {
        problems.push("phone must be a valid 10-digit mobile number");
    }

    let email = req
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    if email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        problems.push("email is not valid");
    }

    let message = req
        .message
        .map(|m| sanitize_text(&m, MESSAGE_MAX_CHARS))
        .filter(|m| !m.is_empty());

    match phone {
        Some(phone) if problems.is_empty() => Ok(Json(Enquiry {
            name,
            phone,
            email,
            message,
        })),
        _ => Err(ApiError::InvalidInput(problems.join(", "))),
    }
}
