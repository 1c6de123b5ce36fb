//! Recipe service connection settings.

use serde::{Deserialize, Serialize};

use crate::mealdb::DEFAULT_BASE_URL;

/// Recipe service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MealDbConfig {
    /// Base URL of the recipe API (e.g. "https://www.themealdb.com/api/json/v1/1").
    pub base_url: String,

    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10,
            user_agent: format!("mealfinder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
