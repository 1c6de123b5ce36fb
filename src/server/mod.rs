//! HTTP Server module - local REST API over the recipe service.
//!
//! This module provides the HTTP server for mealfinder, including
//! routing, request handling, and response formatting.

pub mod handlers;
pub mod response;
pub mod state;


use crate::config::Config;
use crate::error::{MealFinderError, Result};
use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Creates the API router with all endpoints.
pub fn create_router(state: Arc<AppState>, cors: bool) -> Router {
    let router = Router::new()
        // Health and status endpoints
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/status", get(handlers::status))
        // Frontend endpoint
        .route("/api/generate-meals", post(handlers::generate_meals))
        // Meal endpoints
        .route(
            "/api/meals/search",
            get(handlers::search_meals).post(handlers::search_meals_form),
        )
        .route("/api/meals/random", get(handlers::random_meal))
        .route("/api/meals/:id", get(handlers::get_meal))
        .layer(TraceLayer::new_for_http());

    let router = if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Starts the HTTP server and runs until Ctrl+C.
pub async fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let router = create_router(state, config.server.cors);

    let addr = SocketAddr::new(
        config.server.bind.parse().map_err(|e| {
            MealFinderError::config(format!("Invalid bind address: {}", e))
        })?,
        config.server.port,
    );

    info!(upstream = %config.mealdb.base_url, "Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
    }
}
