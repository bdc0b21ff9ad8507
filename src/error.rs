use thiserror::Error;

/// Errors that can occur during recipe cloning operations
#[derive(Error, Debug)]
pub enum CloneError {
    /// Failed to fetch a page or API endpoint
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Failed to read a source file
    #[error("Failed to read source file: {0}")]
    IoError(#[from] std::io::Error),

    /// Payload was not valid JSON
    #[error("Invalid JSON payload: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to parse a recipe out of a document
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// No extractor could successfully parse the recipe
    #[error("No extractor could parse the recipe from this webpage")]
    NoExtractorMatched,

    /// No adapter accepted the source
    #[error("No adapter accepts source: {0}")]
    NoAdapterMatched(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
