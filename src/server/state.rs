//! Application state management.
//!
//! This module manages the shared state across HTTP request handlers.

use crate::config::Config;
use crate::error::Result;
use crate::mealdb::{MealDbClient, MealSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state.
pub struct AppState {
    /// Where meals come from.
    pub source: Arc<dyn MealSource>,
    /// Base URL of the recipe service, for status reporting.
    pub upstream_url: String,
    /// Application start time.
    pub start_time: Instant,
    /// Statistics counters.
    pub stats: Stats,
}

impl AppState {
    /// Creates application state around an existing meal source.
    pub fn new(source: Arc<dyn MealSource>, upstream_url: impl Into<String>) -> Self {
        Self {
            source,
            upstream_url: upstream_url.into(),
            start_time: Instant::now(),
            stats: Stats::default(),
        }
    }

    /// Creates application state with a recipe service client built from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = MealDbClient::from_config(&config.mealdb)?;
        let upstream_url = client.base_url().to_string();
        Ok(Self::new(Arc::new(client), upstream_url))
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Increments the total request counter.
    pub fn increment_requests(&self) {
        self.stats.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the successful request counter.
    pub fn increment_success(&self) {
        self.stats.requests_success.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the failed request counter.
    pub fn increment_failed(&self) {
        self.stats.requests_failed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Statistics counters.
#[derive(Default)]
pub struct Stats {
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_failed: AtomicU64,
}

impl Stats {
    /// Gets the current statistics as a snapshot.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of statistics counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub requests_total: u64,
    pub requests_success: u64,
    pub requests_failed: u64,
}
