//! Meal record and query types.
//!
//! The recipe service returns loosely shaped JSON: fields can be missing,
//! `null`, or empty strings, and ingredients are spread over twenty numbered
//! fields. Everything is normalized into [`Meal`] at the client boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Highest ingredient/measure slot the recipe service fills in.
const MAX_INGREDIENT_SLOTS: usize = 20;

/// A meal record fetched from the recipe service.
///
/// Field names are serialized with the remote service's keys so that the
/// local API hands out the same shape clients already know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Meal {
    /// Opaque identifier, only meaningful to the recipe service.
    #[serde(rename = "idMeal")]
    pub id: String,

    /// Meal name.
    #[serde(rename = "strMeal")]
    pub name: Option<String>,

    /// Thumbnail image URL.
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,

    /// Comma-separated tag string (e.g. "Vegetarian,Dinner").
    #[serde(rename = "strTags")]
    pub tags: Option<String>,

    /// Category (detail records only).
    #[serde(rename = "strCategory", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Area of origin (detail records only).
    #[serde(rename = "strArea", skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Cooking instructions (detail records only).
    #[serde(rename = "strInstructions", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Video link (detail records only).
    #[serde(rename = "strYoutube", skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,

    /// Original recipe URL (detail records only).
    #[serde(rename = "strSource", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Ingredient lines, in the order the recipe lists them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<IngredientLine>,
}

/// One ingredient of a detailed meal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Ingredient name.
    pub name: String,
    /// Quantity, when the recipe gives one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
}

impl Meal {
    /// Creates a summary record with only an identifier and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            thumbnail: None,
            tags: None,
            category: None,
            area: None,
            instructions: None,
            youtube: None,
            source: None,
            ingredients: Vec::new(),
        }
    }

    /// Sets the tag string.
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Sets the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Returns the meal name, or a placeholder when the record has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed meal)")
    }

    /// Splits the tag string into individual trimmed tags.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Builds a meal from one raw JSON record.
    ///
    /// Returns `None` when the record has no usable `idMeal`.
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        let id = string_field(record, "idMeal")?;

        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = string_field(record, &format!("strIngredient{}", slot))?;
                let measure = string_field(record, &format!("strMeasure{}", slot));
                Some(IngredientLine { name, measure })
            })
            .collect();

        Some(Self {
            id,
            name: string_field(record, "strMeal"),
            thumbnail: string_field(record, "strMealThumb"),
            tags: string_field(record, "strTags"),
            category: string_field(record, "strCategory"),
            area: string_field(record, "strArea"),
            instructions: string_field(record, "strInstructions"),
            youtube: string_field(record, "strYoutube"),
            source: string_field(record, "strSource"),
            ingredients,
        })
    }
}

impl TryFrom<Value> for Meal {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let record = value
            .as_object()
            .ok_or_else(|| "meal record must be a JSON object".to_string())?;

        if let Some(Value::Array(lines)) = record.get("ingredients") {
            // Locally serialized meals carry their ingredients as a list.
            let mut meal = Meal::from_record(record).ok_or("meal record has no idMeal")?;
            meal.ingredients = lines
                .iter()
                .filter_map(|line| serde_json::from_value(line.clone()).ok())
                .collect();
            return Ok(meal);
        }

        Meal::from_record(record).ok_or_else(|| "meal record has no idMeal".to_string())
    }
}

/// Reads a string field, treating `null`, blanks and missing keys alike.
///
/// Numbers are accepted for identifiers the service occasionally emits unquoted.
fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Response envelope shared by every recipe service endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct MealsEnvelope {
    /// Raw meal records; `null` when nothing matched.
    #[serde(default)]
    pub meals: Option<Value>,
}

impl MealsEnvelope {
    /// Normalizes the envelope into meals, skipping malformed records.
    pub fn into_meals(self) -> Vec<Meal> {
        match self.meals {
            Some(Value::Array(records)) => records
                .iter()
                .filter_map(Value::as_object)
                .filter_map(Meal::from_record)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A set of ingredient names to search for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientQuery {
    names: Vec<String>,
}

impl IngredientQuery {
    /// Builds a query from individual names. Blank names are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated ingredient string.
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    /// Returns the ingredient names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true when no ingredient was given.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Serializes the query as the comma-joined filter parameter.
    pub fn to_param(&self) -> String {
        self.names.join(",")
    }
}

impl fmt::Display for IngredientQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_param())
    }
}

/// Case-insensitive dietary tag filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryFilter {
    needles: Vec<String>,
}

impl DietaryFilter {
    /// Builds a filter from tag substrings. Blank tags are dropped.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            needles: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Returns the normalized (lowercased) tags.
    pub fn tags(&self) -> &[String] {
        &self.needles
    }

    /// Returns true when no tag was given.
    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    /// Returns true when the tag string contains at least one requested tag.
    ///
    /// A missing tag string is treated as empty and never matches.
    pub fn matches(&self, tag_string: Option<&str>) -> bool {
        let haystack = tag_string.unwrap_or_default().to_lowercase();
        self.needles.iter().any(|needle| haystack.contains(needle))
    }
}
