//! In-memory meal source for tests.

use crate::mealdb::source::MealSource;
use crate::mealdb::types::{IngredientQuery, Meal};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned meals keyed by ingredient parameter and identifier.
#[derive(Default)]
pub struct InMemoryMealSource {
    by_ingredient: HashMap<String, Vec<Meal>>,
    details: HashMap<String, Meal>,
    random: Option<Meal>,
    detail_calls: AtomicUsize,
}

impl InMemoryMealSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the matches for a comma-joined ingredient parameter.
    pub fn with_ingredient(mut self, param: &str, meals: Vec<Meal>) -> Self {
        self.by_ingredient.insert(param.to_lowercase(), meals);
        self
    }

    pub fn with_details(mut self, meal: Meal) -> Self {
        self.details.insert(meal.id.clone(), meal);
        self
    }

    pub fn with_random(mut self, meal: Meal) -> Self {
        self.random = Some(meal);
        self
    }

    /// Number of detail lookups served so far.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MealSource for InMemoryMealSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn random_meal(&self) -> Option<Meal> {
        self.random.clone()
    }

    async fn meal_by_id(&self, id: &str) -> Option<Meal> {
        self.details.get(id).cloned()
    }

    async fn meals_by_ingredients(&self, ingredients: &IngredientQuery) -> Vec<Meal> {
        self.by_ingredient
            .get(&ingredients.to_param().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    async fn meal_details(&self, id: &str) -> Option<Meal> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details.get(id).cloned()
    }
}
