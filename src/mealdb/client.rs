//! HTTP client for the recipe service.
//!
//! Every endpoint has a fallible `try_*` form that reports what went wrong,
//! and a best-effort form (the [`MealSource`] implementation) that logs the
//! failure and degrades to an absent meal or an empty list.

use crate::config::MealDbConfig;
use crate::error::{MealFinderError, Result};
use crate::mealdb::source::MealSource;
use crate::mealdb::types::{IngredientQuery, Meal, MealsEnvelope};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default base URL of the public recipe service.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Default timeout for HTTP requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const RANDOM_ENDPOINT: &str = "random.php";
const LOOKUP_ENDPOINT: &str = "lookup.php";
const FILTER_ENDPOINT: &str = "filter.php";

/// Client for the recipe service.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    /// HTTP client.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl MealDbClient {
    /// Creates a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new client with a custom timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            MealFinderError::config_with_source("Failed to create HTTP client", e)
        })?;

        Ok(Self::from_parts(client, base_url.into()))
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &MealDbConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                MealFinderError::config_with_source("Failed to create HTTP client", e)
            })?;

        Ok(Self::from_parts(client, config.base_url.clone()))
    }

    fn from_parts(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one random meal.
    pub async fn try_random_meal(&self) -> Result<Option<Meal>> {
        let meals = self.fetch_meals(RANDOM_ENDPOINT, &[]).await?;
        Ok(meals.into_iter().next())
    }

    /// Looks up the full record for one identifier.
    pub async fn try_lookup(&self, id: &str) -> Result<Option<Meal>> {
        let meals = self.fetch_meals(LOOKUP_ENDPOINT, &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    /// Lists meals containing the given ingredients.
    pub async fn try_filter_by_ingredients(&self, ingredients: &IngredientQuery) -> Result<Vec<Meal>> {
        if ingredients.is_empty() {
            return Ok(Vec::new());
        }

        let param = ingredients.to_param();
        self.fetch_meals(FILTER_ENDPOINT, &[("i", param.as_str())])
            .await
    }

    /// Issues one GET request and normalizes the `{meals: [...]}` envelope.
    async fn fetch_meals(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Vec<Meal>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, query = ?query, "Requesting recipe service");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MealFinderError::upstream_with_source(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MealFinderError::UpstreamStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: MealsEnvelope = response
            .json()
            .await
            .map_err(|e| MealFinderError::decode_with_source(endpoint, e))?;

        let meals = envelope.into_meals();
        debug!(endpoint = %endpoint, count = meals.len(), "Recipe service responded");
        Ok(meals)
    }
}

/// Logs a failed call and substitutes the fallback value.
fn soft<T>(operation: &str, result: Result<T>, fallback: T) -> T {
    result.unwrap_or_else(|err| {
        warn!(operation = %operation, error = %err, "Recipe service call failed");
        fallback
    })
}

#[async_trait]
impl MealSource for MealDbClient {
    fn name(&self) -> &'static str {
        "themealdb"
    }

    async fn random_meal(&self) -> Option<Meal> {
        soft("random_meal", self.try_random_meal().await, None)
    }

    async fn meal_by_id(&self, id: &str) -> Option<Meal> {
        soft("meal_by_id", self.try_lookup(id).await, None)
    }

    async fn meals_by_ingredients(&self, ingredients: &IngredientQuery) -> Vec<Meal> {
        soft(
            "meals_by_ingredients",
            self.try_filter_by_ingredients(ingredients).await,
            Vec::new(),
        )
    }

    async fn meal_details(&self, id: &str) -> Option<Meal> {
        debug!(meal_id = %id, "Fetching meal details");
        soft("meal_details", self.try_lookup(id).await, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mealdb::types::DietaryFilter;
    use mockito::Matcher;

    const TERIYAKI: &str = r#"{"meals": [{
        "idMeal": "52772",
        "strMeal": "Teriyaki Chicken Casserole",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "strTags": "Meat,Casserole",
        "strCategory": "Chicken",
        "strIngredient1": "soy sauce",
        "strMeasure1": "3/4 cup"
    }]}"#;

    fn lookup_query(id: &str) -> Matcher {
        Matcher::UrlEncoded("i".into(), id.into())
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = MealDbClient::new("http://localhost:9000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/api");
    }

    #[test]
    fn test_client_from_config() {
        let config = MealDbConfig::default();
        let client = MealDbClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.name(), "themealdb");
    }

    #[tokio::test]
    async fn test_random_meal() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/random.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TERIYAKI)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meal = client.random_meal().await.unwrap();

        assert_eq!(meal.id, "52772");
        assert_eq!(meal.tag_list(), vec!["Meat", "Casserole"]);
    }

    #[tokio::test]
    async fn test_random_meal_non_success_is_absent() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/random.php")
            .with_status(503)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        assert!(client.random_meal().await.is_none());

        let err = client.try_random_meal().await.unwrap_err();
        assert!(matches!(
            err,
            MealFinderError::UpstreamStatus { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_meal_by_id() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("52772"))
            .with_status(200)
            .with_body(TERIYAKI)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meal = client.meal_by_id("52772").await.unwrap();

        assert_eq!(meal.display_name(), "Teriyaki Chicken Casserole");
        assert_eq!(meal.category.as_deref(), Some("Chicken"));
        assert_eq!(meal.ingredients.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("0"))
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        assert!(client.meal_by_id("0").await.is_none());
        assert!(client.meal_details("0").await.is_none());
        assert!(client.try_lookup("0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_meal_details_non_success_is_absent() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("52772"))
            .with_status(500)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        assert!(client.meal_details("52772").await.is_none());
    }

    #[tokio::test]
    async fn test_meals_by_ingredients_sends_comma_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "chicken,rice".into()))
            .with_status(200)
            .with_body(
                r#"{"meals": [
                    {"idMeal": "1", "strMeal": "Chicken Rice", "strMealThumb": "a.jpg"},
                    {"idMeal": "2", "strMeal": "Paella", "strMealThumb": "b.jpg"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meals = client
            .meals_by_ingredients(&IngredientQuery::parse("chicken, rice"))
            .await;

        mock.assert_async().await;
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[1].thumbnail.as_deref(), Some("b.jpg"));
    }

    #[tokio::test]
    async fn test_meals_by_ingredients_no_matches_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "unobtainium".into()))
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meals = client
            .meals_by_ingredients(&IngredientQuery::parse("unobtainium"))
            .await;
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn test_meals_by_ingredients_failure_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meals = client
            .meals_by_ingredients(&IngredientQuery::parse("chicken"))
            .await;
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let query = IngredientQuery::parse("chicken");
        assert!(client.meals_by_ingredients(&query).await.is_empty());

        let err = client.try_filter_by_ingredients(&query).await.unwrap_err();
        assert!(matches!(err, MealFinderError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_empty_query_skips_remote_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meals = client
            .meals_by_ingredients(&IngredientQuery::parse(""))
            .await;

        assert!(meals.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_service_is_soft() {
        let client =
            MealDbClient::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

        assert!(client.random_meal().await.is_none());
        assert!(client
            .meals_by_ingredients(&IngredientQuery::parse("eggs"))
            .await
            .is_empty());

        let err = client.try_random_meal().await.unwrap_err();
        assert!(matches!(err, MealFinderError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_filtered_meals_over_http() {
        let mut server = mockito::Server::new_async().await;
        let _filter = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "eggs".into()))
            .with_status(200)
            .with_body(
                r#"{"meals": [
                    {"idMeal": "1", "strMeal": "Frittata"},
                    {"idMeal": "2", "strMeal": "Bacon and Eggs"},
                    {"idMeal": "3", "strMeal": "Egg Drop Soup"},
                    {"idMeal": "4", "strMeal": "Shakshuka"}
                ]}"#,
            )
            .create_async()
            .await;
        let _d1 = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("1"))
            .with_status(200)
            .with_body(r#"{"meals": [{"idMeal": "1", "strTags": "Vegetarian,Dinner"}]}"#)
            .create_async()
            .await;
        let _d2 = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("2"))
            .with_status(200)
            .with_body(r#"{"meals": [{"idMeal": "2", "strTags": "Meat,Quick"}]}"#)
            .create_async()
            .await;
        let _d3 = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("3"))
            .with_status(200)
            .with_body(r#"{"meals": [{"idMeal": "3", "strTags": null}]}"#)
            .create_async()
            .await;
        let _d4 = server
            .mock("GET", "/lookup.php")
            .match_query(lookup_query("4"))
            .with_status(500)
            .create_async()
            .await;

        let client = MealDbClient::new(server.url()).unwrap();
        let meals = client
            .filtered_meals(
                &IngredientQuery::parse("eggs"),
                &DietaryFilter::new(["vegetarian"]),
            )
            .await;

        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].display_name(), "Frittata");
    }
}
