use std::fs;

use log::{info, warn};
use serde_json::Value;

use crate::adapters::{Source, SourceAdapter};
use crate::error::CloneError;
use crate::model::RawRecipe;

/// Reads recipes from a JSON file holding either a single object or a list
/// of objects in the canonical shape. Malformed JSON is a hard per-file
/// failure; individual entries that do not fit the shape are skipped.
pub struct JsonFileAdapter;

pub(crate) fn candidates_from_value(value: Value) -> Vec<RawRecipe> {
    let entries = match value {
        Value::Array(entries) => entries,
        single => vec![single],
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawRecipe>(entry) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                warn!("Skipping entry that does not look like a recipe: {e}");
                None
            }
        })
        .collect()
}

impl SourceAdapter for JsonFileAdapter {
    fn provenance(&self, _source: &Source) -> String {
        "json_import".to_string()
    }

    fn accepts(&self, source: &Source) -> bool {
        matches!(source, Source::JsonFile(_))
    }

    fn extract(&self, source: &Source) -> Result<Vec<RawRecipe>, CloneError> {
        let Source::JsonFile(path) = source else {
            return Ok(Vec::new());
        };

        info!("Reading recipes from {}", path.display());
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;

        Ok(candidates_from_value(value))
    }
}
