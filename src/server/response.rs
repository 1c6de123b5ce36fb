//! API request and response types.
//!
//! Successful responses flatten their payload next to `success`, so a meal
//! search answers `{"success": true, "meals": [...], "timestamp": ...}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorResponse, MealFinderError};
use crate::mealdb::{DietaryFilter, IngredientQuery, Meal};

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response payload (present on success).
    #[serde(flatten)]
    pub data: Option<T>,
    /// Error information (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
    /// Response timestamp.
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response with data.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a failed response with an error.
    pub fn error(error: ErrorResponse) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }

    /// Creates a failed response from a MealFinderError.
    pub fn from_error(err: &MealFinderError) -> ApiResponse<T> {
        Self::error(ErrorResponse::from_error(err))
    }
}

/// Health check response data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthData {
    /// Health status.
    pub status: HealthStatus,
    /// Application version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Server status response data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusData {
    /// Recipe service in use.
    pub upstream: UpstreamInfo,
    /// Request counters.
    pub stats: StatsInfo,
    /// Application version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Recipe service information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamInfo {
    /// Source name (e.g. "themealdb").
    pub source: String,
    /// Base URL requests go to.
    pub base_url: String,
}

/// Statistics information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsInfo {
    pub requests_total: u64,
    pub requests_success: u64,
    pub requests_failed: u64,
}

/// A list of meals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealsData {
    /// Matching meals, possibly empty.
    pub meals: Vec<Meal>,
    /// Number of meals returned.
    pub count: usize,
}

impl MealsData {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self {
            count: meals.len(),
            meals,
        }
    }
}

/// A single meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealData {
    pub meal: Meal,
}

/// A JSON field that may be sent as one string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    /// A single, possibly comma-separated, string.
    One(String),
    /// A list of values.
    Many(Vec<String>),
}

impl StringOrList {
    /// Flattens the value into individual entries, splitting on commas.
    pub fn into_values(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => split_commas(&s),
            StringOrList::Many(items) => items.iter().flat_map(|s| split_commas(s)).collect(),
        }
    }
}

fn split_commas(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Body of `POST /api/generate-meals`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateMealsRequest {
    /// Ingredients to search for.
    #[serde(default)]
    pub ingredients: Option<StringOrList>,
    /// Dietary tags to keep; also accepted as `diet`.
    #[serde(default, alias = "diet")]
    pub dietary_tags: Option<StringOrList>,
}

impl GenerateMealsRequest {
    /// Converts the body into a typed query and filter.
    ///
    /// Missing fields become an empty query or an empty filter.
    pub fn into_parts(self) -> (IngredientQuery, DietaryFilter) {
        let ingredients = self
            .ingredients
            .map(StringOrList::into_values)
            .unwrap_or_default();
        let tags = self
            .dietary_tags
            .map(StringOrList::into_values)
            .unwrap_or_default();

        (IngredientQuery::new(ingredients), DietaryFilter::new(tags))
    }
}

/// Form or query-string parameters of the search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Comma-separated ingredients.
    #[serde(default)]
    pub ingredients: Option<String>,
    /// Comma-separated dietary tags; also accepted as `dietary_tags`.
    #[serde(default, alias = "dietary_tags")]
    pub diet: Option<String>,
}

impl SearchParams {
    pub fn into_parts(self) -> (IngredientQuery, DietaryFilter) {
        let ingredients = IngredientQuery::parse(self.ingredients.as_deref().unwrap_or_default());
        let tags = split_commas(self.diet.as_deref().unwrap_or_default());
        (ingredients, DietaryFilter::new(tags))
    }
}
