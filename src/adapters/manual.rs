use crate::adapters::{Source, SourceAdapter};
use crate::error::CloneError;
use crate::model::RawRecipe;

/// Accepts already-structured fields directly; performs no inference.
pub struct ManualAdapter;

impl SourceAdapter for ManualAdapter {
    fn provenance(&self, _source: &Source) -> String {
        "manual_input".to_string()
    }

    fn accepts(&self, source: &Source) -> bool {
        matches!(source, Source::Manual(_))
    }

    fn extract(&self, source: &Source) -> Result<Vec<RawRecipe>, CloneError> {
        match source {
            Source::Manual(recipe) => Ok(vec![recipe.clone()]),
            _ => Ok(Vec::new()),
        }
    }
}
