//! The `MealSource` trait.
//!
//! Request handlers depend on this trait rather than on the HTTP client, so
//! the client is constructed once and injected, and tests can substitute an
//! in-memory source.

use crate::mealdb::types::{DietaryFilter, IngredientQuery, Meal};
use async_trait::async_trait;
use tracing::debug;

/// A read-only source of meal records.
///
/// Every operation is best-effort: failures are reported as an absent meal
/// or an empty list, never as an error.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Returns a short name identifying this source.
    fn name(&self) -> &'static str;

    /// Fetches one random meal.
    async fn random_meal(&self) -> Option<Meal>;

    /// Looks up a meal by identifier.
    async fn meal_by_id(&self, id: &str) -> Option<Meal>;

    /// Lists meals containing the given ingredients.
    ///
    /// An empty query yields an empty list.
    async fn meals_by_ingredients(&self, ingredients: &IngredientQuery) -> Vec<Meal>;

    /// Fetches the full detail record for one identifier.
    async fn meal_details(&self, id: &str) -> Option<Meal>;

    /// Lists ingredient matches, keeping only meals tagged with a requested tag.
    ///
    /// With an empty filter this is exactly [`MealSource::meals_by_ingredients`].
    /// Otherwise each match's details are fetched one after another; a match
    /// whose details cannot be fetched is dropped.
    async fn filtered_meals(
        &self,
        ingredients: &IngredientQuery,
        filter: &DietaryFilter,
    ) -> Vec<Meal> {
        let meals = self.meals_by_ingredients(ingredients).await;
        if filter.is_empty() {
            return meals;
        }

        let mut retained = Vec::with_capacity(meals.len());
        for meal in meals {
            match self.meal_details(&meal.id).await {
                Some(details) if filter.matches(details.tags.as_deref()) => retained.push(meal),
                Some(_) => {}
                None => {
                    debug!(meal_id = %meal.id, "Dropping meal without details");
                }
            }
        }

        debug!(
            ingredients = %ingredients,
            tags = ?filter.tags(),
            retained = retained.len(),
            "Applied dietary filter"
        );

        retained
    }
}
