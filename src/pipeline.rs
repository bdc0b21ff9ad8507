use std::fs;
use std::path::Path;

use log::{error, info, warn};

use crate::adapters::{
    JsonFileAdapter, ManualAdapter, RemoteApiAdapter, ScrapeAdapter, Source, SourceAdapter,
};
use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::store::RecipeStore;

/// Orchestrates ingestion: dispatch each source to the first adapter that
/// accepts it, then hand every extracted candidate to the store.
///
/// Per-item failures are logged and skipped; a batch always runs to
/// completion and reports how many recipes were newly stored.
pub struct IngestionPipeline {
    adapters: Vec<Box<dyn SourceAdapter>>,
    store: RecipeStore,
}

impl IngestionPipeline {
    pub fn new(config: &CloneConfig) -> Result<Self, CloneError> {
        let store = RecipeStore::open(Path::new(&config.database_path))?;
        Self::with_store(config, store)
    }

    /// Build the pipeline against an explicit store (tests use an
    /// in-memory one).
    pub fn with_store(config: &CloneConfig, store: RecipeStore) -> Result<Self, CloneError> {
        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(ManualAdapter),
            Box::new(JsonFileAdapter),
            Box::new(RemoteApiAdapter::new(config)?),
            Box::new(ScrapeAdapter::new(config)?),
        ];
        Ok(Self { adapters, store })
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Ingest every source in the batch, independently. Returns the number
    /// of recipes that were both extracted and newly stored.
    pub fn ingest_batch(&mut self, sources: &[Source]) -> usize {
        let mut succeeded = 0;
        for (index, source) in sources.iter().enumerate() {
            info!(
                "[{}/{}] Processing {}",
                index + 1,
                sources.len(),
                source.describe()
            );
            succeeded += self.ingest(source);
        }
        info!("Cloned {succeeded} new recipes from {} sources", sources.len());
        succeeded
    }

    /// Ingest a single source. Returns the number of newly stored recipes.
    pub fn ingest(&mut self, source: &Source) -> usize {
        let Some(adapter) = self.adapters.iter().find(|a| a.accepts(source)) else {
            warn!("No adapter accepts {}", source.describe());
            return 0;
        };

        let candidates = match adapter.extract(source) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Failed to extract from {}: {e}", source.describe());
                return 0;
            }
        };
        if candidates.is_empty() {
            warn!("No recipe candidates in {}", source.describe());
            return 0;
        }

        let provenance = adapter.provenance(source);
        let mut stored = 0;
        for candidate in &candidates {
            match self.store.insert(candidate, &provenance) {
                Ok(true) => stored += 1,
                Ok(false) => {}
                Err(e) => error!("Failed to store '{}': {e}", candidate.title),
            }
        }
        stored
    }
}

/// Read a batch of page sources from a newline-delimited URL file. Lines
/// that do not start with a recognized scheme are discarded.
pub fn read_url_batch(path: &Path) -> Result<Vec<Source>, CloneError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http://") || line.starts_with("https://"))
        .map(|line| Source::Page(line.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::model::RawRecipe;

    fn test_pipeline() -> IngestionPipeline {
        let store = RecipeStore::open_in_memory().unwrap();
        IngestionPipeline::with_store(&CloneConfig::default(), store).unwrap()
    }

    fn manual(title: &str) -> Source {
        Source::Manual(RawRecipe {
            title: title.to_string(),
            ingredients: vec!["a".to_string()],
            steps: vec!["b".to_string()],
            ..RawRecipe::default()
        })
    }

    #[test]
    fn test_manual_ingestion_and_dedup() {
        let mut pipeline = test_pipeline();

        assert_eq!(pipeline.ingest(&manual("Phở Bò")), 1);
        // same title again: extracted, but not newly stored
        assert_eq!(pipeline.ingest(&manual("Phở Bò")), 0);

        let recipes = pipeline.store().list_all().unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].source, "manual_input");
    }

    #[test]
    fn test_batch_counts_only_new_recipes() {
        let mut pipeline = test_pipeline();
        let sources = vec![
            manual("A"),
            manual("B"),
            manual("A"), // duplicate
            Source::JsonFile("/no/such/file.json".into()), // broken item
        ];

        assert_eq!(pipeline.ingest_batch(&sources), 2);
    }

    #[test]
    fn test_read_url_batch_discards_non_urls() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://cooky.vn/recipe/1").unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "ftp://example.com/recipe").unwrap();
        writeln!(file, "http://example.com/recipe/2").unwrap();

        let sources = read_url_batch(file.path()).unwrap();
        assert_eq!(sources.len(), 2);
        assert!(matches!(&sources[0], Source::Page(url) if url.ends_with("/recipe/1")));
    }

    #[test]
    fn test_missing_url_file_is_reported() {
        assert!(read_url_batch(Path::new("/no/such/urls.txt")).is_err());
    }
}
