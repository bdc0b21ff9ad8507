pub mod adapters;
pub mod config;
pub mod duration;
pub mod error;
pub mod extractors;
pub mod model;
pub mod pipeline;
pub mod store;

pub use crate::adapters::Source;
pub use crate::config::CloneConfig;
pub use crate::error::CloneError;
pub use crate::model::{Ingredient, RawRecipe, Recipe, Statistics};
pub use crate::pipeline::{read_url_batch, IngestionPipeline};
pub use crate::store::RecipeStore;

use crate::adapters::{ScrapeAdapter, SourceAdapter};

/// Scrape a single recipe candidate from a cooking-site page, without
/// touching the store.
pub fn scrape_recipe(url: &str) -> Result<RawRecipe, CloneError> {
    let adapter = ScrapeAdapter::new(&CloneConfig::default())?;
    let mut candidates = adapter.extract(&Source::Page(url.to_string()))?;
    candidates.pop().ok_or(CloneError::NoExtractorMatched)
}
