use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::duration::MINIMUM_MINUTES;

/// An unvalidated recipe candidate produced by a source adapter, before it
/// is accepted into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
    #[serde(default = "default_duration", rename = "durationInMinutes")]
    pub duration_in_minutes: i64,
    #[serde(default = "default_type", rename = "type")]
    pub recipe_type: String,
    #[serde(default, deserialize_with = "ingredient_names")]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Default for RawRecipe {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            duration_in_minutes: MINIMUM_MINUTES,
            recipe_type: default_type(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }
}

fn default_duration() -> i64 {
    MINIMUM_MINUTES
}

fn default_type() -> String {
    "Other".to_string()
}

/// Ingredients arrive either as plain strings or as objects with a `name`
/// field (the preset data files use the object form).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientEntry {
    Name(String),
    Object { name: String },
}

fn ingredient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<IngredientEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            IngredientEntry::Name(name) => name,
            IngredientEntry::Object { name } => name,
        })
        .collect())
}

/// A recipe row as persisted, with its ingredients materialized.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub description: String,
    pub steps: Vec<String>,
    #[serde(rename = "durationInMinutes")]
    pub duration_in_minutes: i64,
    #[serde(rename = "type")]
    pub recipe_type: String,
    pub source: String,
    pub cloned_at: String,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub id: i64,
    #[serde(rename = "recipeId")]
    pub recipe_id: i64,
    pub name: String,
    #[serde(rename = "isChecked")]
    pub is_checked: bool,
}

/// Aggregate counts over the stored cookbook.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_recipes: i64,
    pub by_type: BTreeMap<String, i64>,
    pub by_source: BTreeMap<String, i64>,
    pub total_ingredients: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_payload() {
        let recipe: RawRecipe = serde_json::from_str(r#"{"title": "Phở Bò"}"#).unwrap();
        assert_eq!(recipe.title, "Phở Bò");
        assert_eq!(recipe.duration_in_minutes, 30);
        assert_eq!(recipe.recipe_type, "Other");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_deserialize_ingredient_strings() {
        let recipe: RawRecipe =
            serde_json::from_str(r#"{"title": "t", "ingredients": ["thịt bò", "bánh phở"]}"#)
                .unwrap();
        assert_eq!(recipe.ingredients, vec!["thịt bò", "bánh phở"]);
    }

    #[test]
    fn test_deserialize_ingredient_objects() {
        let recipe: RawRecipe = serde_json::from_str(
            r#"{"title": "t", "ingredients": [{"name": "500g thịt bò"}, {"name": "gừng"}]}"#,
        )
        .unwrap();
        assert_eq!(recipe.ingredients, vec!["500g thịt bò", "gừng"]);
    }

    #[test]
    fn test_missing_title_defaults_to_empty() {
        let recipe: RawRecipe = serde_json::from_str(r#"{"description": "no title"}"#).unwrap();
        assert!(recipe.title.is_empty());
    }
}
