//! HTTP request handlers.
//!
//! This module contains all the HTTP endpoint handlers for the mealfinder API.
//! Handlers never fail because the recipe service failed: a search that could
//! not reach it simply finds no meals.

use crate::error::MealFinderError;
use crate::mealdb::{DietaryFilter, IngredientQuery};
use crate::server::response::{
    ApiResponse, GenerateMealsRequest, HealthData, HealthStatus, MealData, MealsData,
    SearchParams, StatsInfo, StatusData, UpstreamInfo,
};
use crate::server::state::AppState;
use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Version string for the application.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check handler.
///
/// GET /api/v1/health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();

    let data = HealthData {
        status: HealthStatus::Healthy,
        version: VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    state.increment_success();
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

/// Server status handler.
///
/// GET /api/v1/status
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();

    let stats_snapshot = state.stats.snapshot();

    let data = StatusData {
        upstream: UpstreamInfo {
            source: state.source.name().to_string(),
            base_url: state.upstream_url.clone(),
        },
        stats: StatsInfo {
            requests_total: stats_snapshot.requests_total,
            requests_success: stats_snapshot.requests_success,
            requests_failed: stats_snapshot.requests_failed,
        },
        version: VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    state.increment_success();
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

/// Meal generation handler used by the browser frontend.
///
/// POST /api/generate-meals
pub async fn generate_meals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateMealsRequest>,
) -> impl IntoResponse {
    let (ingredients, filter) = request.into_parts();
    find_meals(state, ingredients, filter).await
}

/// Form search handler.
///
/// POST /api/meals/search
pub async fn search_meals_form(
    State(state): State<Arc<AppState>>,
    Form(params): Form<SearchParams>,
) -> impl IntoResponse {
    let (ingredients, filter) = params.into_parts();
    find_meals(state, ingredients, filter).await
}

/// Query-string search handler.
///
/// GET /api/meals/search?ingredients=..&diet=..
pub async fn search_meals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let (ingredients, filter) = params.into_parts();
    find_meals(state, ingredients, filter).await
}

/// Common search handler.
async fn find_meals(
    state: Arc<AppState>,
    ingredients: IngredientQuery,
    filter: DietaryFilter,
) -> (StatusCode, Json<ApiResponse<MealsData>>) {
    state.increment_requests();

    let request_id = Uuid::new_v4();

    if ingredients.is_empty() {
        info!(request_id = %request_id, "No ingredients given, returning no meals");
        state.increment_success();
        return (
            StatusCode::OK,
            Json(ApiResponse::success(MealsData::new(Vec::new()))),
        );
    }

    let start_time = Instant::now();
    info!(
        request_id = %request_id,
        ingredients = %ingredients,
        tags = ?filter.tags(),
        "Searching meals"
    );

    let meals = state.source.filtered_meals(&ingredients, &filter).await;

    info!(
        request_id = %request_id,
        count = meals.len(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Meal search finished"
    );

    state.increment_success();
    (StatusCode::OK, Json(ApiResponse::success(MealsData::new(meals))))
}

/// Random meal handler.
///
/// GET /api/meals/random
pub async fn random_meal(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.increment_requests();

    match state.source.random_meal().await {
        Some(meal) => {
            state.increment_success();
            (StatusCode::OK, Json(ApiResponse::success(MealData { meal })))
        }
        None => {
            warn!("No random meal available");
            state.increment_failed();
            let err = MealFinderError::MealNotFound {
                id: "random".to_string(),
            };
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<MealData>::from_error(&err)),
            )
        }
    }
}

/// Meal detail handler.
///
/// GET /api/meals/:id
pub async fn get_meal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.increment_requests();

    match state.source.meal_details(&id).await {
        Some(meal) => {
            state.increment_success();
            (StatusCode::OK, Json(ApiResponse::success(MealData { meal })))
        }
        None => {
            state.increment_failed();
            let err = MealFinderError::MealNotFound { id };
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<MealData>::from_error(&err)),
            )
        }
    }
}
