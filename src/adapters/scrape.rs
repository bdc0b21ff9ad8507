use log::{debug, info};
use reqwest::blocking::Client;
use scraper::Html;

use crate::adapters::{build_client, Source, SourceAdapter};
use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::extractors::{extractor_chain, ParsingContext, SiteProfile};
use crate::model::RawRecipe;

/// Scrapes one recipe from a cooking-site page: fetch, parse, then run the
/// extractor chain for the page's domain. First extractor to succeed wins.
pub struct ScrapeAdapter {
    client: Client,
}

impl ScrapeAdapter {
    pub fn new(config: &CloneConfig) -> Result<Self, CloneError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

impl SourceAdapter for ScrapeAdapter {
    fn provenance(&self, source: &Source) -> String {
        match source {
            Source::Page(url) => SiteProfile::for_url(url)
                .map(|profile| profile.name.to_string())
                .unwrap_or_else(|| "web_scrape".to_string()),
            _ => "web_scrape".to_string(),
        }
    }

    fn accepts(&self, source: &Source) -> bool {
        matches!(source, Source::Page(_))
    }

    fn extract(&self, source: &Source) -> Result<Vec<RawRecipe>, CloneError> {
        let Source::Page(url) = source else {
            return Ok(Vec::new());
        };

        info!("Scraping page: {url}");
        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .text()?;

        let context = ParsingContext {
            url: url.clone(),
            document: Html::parse_document(&body),
        };

        for extractor in extractor_chain(url) {
            match extractor.parse(&context) {
                Ok(recipe) => return Ok(vec![recipe]),
                Err(e) => debug!("Extractor passed on {url}: {e}"),
            }
        }

        Err(CloneError::NoExtractorMatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_uses_site_profile_name() {
        let adapter = ScrapeAdapter::new(&CloneConfig::default()).unwrap();
        assert_eq!(
            adapter.provenance(&Source::Page("https://cooky.vn/recipe/1".to_string())),
            "cooky"
        );
        assert_eq!(
            adapter.provenance(&Source::Page("https://example.com/r/1".to_string())),
            "web_scrape"
        );
    }

    #[test]
    fn test_accepts_only_pages() {
        let adapter = ScrapeAdapter::new(&CloneConfig::default()).unwrap();
        assert!(adapter.accepts(&Source::Page("https://example.com".to_string())));
        assert!(!adapter.accepts(&Source::Api("https://example.com".to_string())));
    }
}
