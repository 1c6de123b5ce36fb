//! Recipe service integration.
//!
//! This module wraps the public recipe database: the [`MealDbClient`] issues
//! the HTTP calls, [`MealSource`] is the seam request handlers depend on, and
//! [`types`] normalizes the remote JSON into [`Meal`] records.

pub mod client;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use client::{MealDbClient, DEFAULT_BASE_URL};
pub use source::MealSource;
pub use types::{DietaryFilter, IngredientLine, IngredientQuery, Meal, MealsEnvelope};
