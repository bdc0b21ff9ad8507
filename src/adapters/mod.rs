use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::model::RawRecipe;

mod json_file;
mod manual;
mod remote_api;
mod scrape;

pub use self::json_file::JsonFileAdapter;
pub use self::manual::ManualAdapter;
pub use self::remote_api::RemoteApiAdapter;
pub use self::scrape::ScrapeAdapter;

/// A handle to one ingestible source.
#[derive(Debug, Clone)]
pub enum Source {
    /// Already-structured fields, entered by hand
    Manual(RawRecipe),
    /// A file containing one recipe object or a list of them
    JsonFile(PathBuf),
    /// A JSON API endpoint to GET
    Api(String),
    /// A cooking-site page to scrape
    Page(String),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Source::Manual(recipe) => format!("manual entry '{}'", recipe.title),
            Source::JsonFile(path) => format!("file {}", path.display()),
            Source::Api(url) => format!("api {url}"),
            Source::Page(url) => format!("page {url}"),
        }
    }
}

/// One ingestion origin. Adapters produce candidates; they never touch the
/// store. Adding a new origin means appending an adapter to the pipeline's
/// list, not editing dispatch code.
pub trait SourceAdapter {
    /// Tag recorded on every recipe this adapter produced.
    fn provenance(&self, source: &Source) -> String;

    /// Whether this adapter handles the given source.
    fn accepts(&self, source: &Source) -> bool;

    /// Produce zero or more recipe candidates from the source.
    fn extract(&self, source: &Source) -> Result<Vec<RawRecipe>, CloneError>;
}

/// Blocking HTTP client shared by the network-backed adapters.
pub(crate) fn build_client(config: &CloneConfig) -> Result<Client, CloneError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
