use log::debug;
use scraper::Selector;
use url::Url;

use crate::duration::MINIMUM_MINUTES;
use crate::error::CloneError;
use crate::extractors::{truncate_chars, Extractor, ParsingContext, MAX_DESCRIPTION_CHARS};
use crate::model::RawRecipe;

/// Last-resort extractor for pages with no structured data and no known
/// site profile: first heading, meta description, first image. Lists are
/// left empty and the duration defaults to the floor.
pub struct FallbackExtractor;

fn select_first_text(context: &ParsingContext, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    context
        .document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Resolve a possibly-relative image reference against the page URL.
fn absolute_image_url(page_url: &str, src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        return src.to_string();
    }
    Url::parse(page_url)
        .and_then(|base| base.join(src))
        .map(|joined| joined.to_string())
        .unwrap_or_else(|_| src.to_string())
}

impl Extractor for FallbackExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RawRecipe, CloneError> {
        debug!("Falling back to generic HTML extraction for {}", context.url);

        let title =
            select_first_text(context, "h1, h2").unwrap_or_else(|| "Unknown".to_string());

        let description = Selector::parse("meta[name='description']")
            .ok()
            .and_then(|selector| {
                context
                    .document
                    .select(&selector)
                    .next()
                    .and_then(|el| el.value().attr("content"))
                    .map(str::to_string)
            })
            .or_else(|| select_first_text(context, "p"))
            .map(|text| truncate_chars(text.trim(), MAX_DESCRIPTION_CHARS))
            .unwrap_or_default();

        let image_url = Selector::parse("img")
            .ok()
            .and_then(|selector| {
                context
                    .document
                    .select(&selector)
                    .next()
                    .and_then(|el| el.value().attr("src"))
            })
            .map(|src| absolute_image_url(&context.url, src))
            .unwrap_or_default();

        Ok(RawRecipe {
            title,
            description,
            image_url,
            duration_in_minutes: MINIMUM_MINUTES,
            recipe_type: "Other".to_string(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        })
    }
}
