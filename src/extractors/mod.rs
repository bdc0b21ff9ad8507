use scraper::Html;

use crate::error::CloneError;
use crate::model::RawRecipe;

mod fallback;
mod json_ld;
mod site_class;

pub use self::fallback::FallbackExtractor;
pub use self::json_ld::JsonLdExtractor;
pub use self::site_class::{SiteClassExtractor, SiteProfile};

/// Scraped descriptions are truncated to this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;
/// Scraped ingredient lists are clamped to this many entries.
pub const MAX_INGREDIENTS: usize = 20;
/// Scraped step lists are clamped to this many entries.
pub const MAX_STEPS: usize = 15;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

pub trait Extractor {
    /// Attempt to pull a recipe candidate out of the document.
    ///
    /// An `Err` means this extractor found nothing usable; the caller moves
    /// on to the next extractor in the chain.
    fn parse(&self, context: &ParsingContext) -> Result<RawRecipe, CloneError>;
}

/// Build the ordered extractor chain for a page URL: a site-specific
/// extractor when the domain is known, then the schema.org structured-data
/// extractor, then the generic fallback. First success wins.
pub fn extractor_chain(url: &str) -> Vec<Box<dyn Extractor>> {
    let mut chain: Vec<Box<dyn Extractor>> = Vec::new();

    if let Some(profile) = SiteProfile::for_url(url) {
        chain.push(Box::new(SiteClassExtractor::new(profile)));
    }

    chain.push(Box::new(JsonLdExtractor));
    chain.push(Box::new(FallbackExtractor));

    chain
}

/// Truncate to a maximum number of characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Append `text` unless it is empty or already present in `items`.
pub(crate) fn push_unique(items: &mut Vec<String>, text: String) {
    if !text.is_empty() && !items.contains(&text) {
        items.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        // 5 chars, 10 bytes; byte-indexed truncation would split a codepoint
        assert_eq!(truncate_chars("phởbò", 3), "phở");
        assert_eq!(truncate_chars("short", 200), "short");
    }

    #[test]
    fn test_push_unique_drops_repeats_and_empties() {
        let mut items = Vec::new();
        push_unique(&mut items, "a".to_string());
        push_unique(&mut items, "a".to_string());
        push_unique(&mut items, String::new());
        push_unique(&mut items, "b".to_string());
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_chain_order_for_known_site() {
        let chain = extractor_chain("https://cooky.vn/recipe/12345");
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_chain_order_for_unknown_site() {
        let chain = extractor_chain("https://example.com/some-recipe");
        assert_eq!(chain.len(), 2);
    }
}
