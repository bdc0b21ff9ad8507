use log::debug;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::duration::MINIMUM_MINUTES;
use crate::error::CloneError;
use crate::extractors::{
    push_unique, truncate_chars, Extractor, ParsingContext, MAX_DESCRIPTION_CHARS, MAX_INGREDIENTS,
    MAX_STEPS,
};
use crate::model::RawRecipe;

/// A candidate location for one recipe field: the element tags to try, each
/// combined with each class name, in order. First non-empty match wins.
struct FieldMatcher {
    tags: &'static [&'static str],
    classes: &'static [&'static str],
}

/// Declarative scraping rules for one cooking site. Adding support for a new
/// site means adding a profile here, not writing new extraction code.
pub struct SiteProfile {
    pub name: &'static str,
    domains: &'static [&'static str],
    default_type: &'static str,
    title: FieldMatcher,
    description: FieldMatcher,
    image: FieldMatcher,
    duration: FieldMatcher,
    ingredients: FieldMatcher,
    ingredient_items: FieldMatcher,
    steps: FieldMatcher,
    step_items: FieldMatcher,
}

static PROFILES: &[SiteProfile] = &[SiteProfile {
    name: "cooky",
    domains: &["cooky.vn"],
    default_type: "Việt Nam",
    title: FieldMatcher {
        tags: &["h1"],
        classes: &["title", "recipe-title"],
    },
    description: FieldMatcher {
        tags: &["p", "div"],
        classes: &["description", "intro"],
    },
    image: FieldMatcher {
        tags: &["img"],
        classes: &["recipe-image", "main-image"],
    },
    duration: FieldMatcher {
        tags: &["span", "div"],
        classes: &["time", "duration", "cook-time"],
    },
    ingredients: FieldMatcher {
        tags: &["ul", "ol", "div"],
        classes: &["ingredients", "ingredient-list", "ingredients-list"],
    },
    ingredient_items: FieldMatcher {
        tags: &["li", "p", "div"],
        classes: &["ingredient", "ingredient-item"],
    },
    steps: FieldMatcher {
        tags: &["ol", "div", "ul"],
        classes: &["steps", "instructions", "directions"],
    },
    step_items: FieldMatcher {
        tags: &["li", "p", "div"],
        classes: &["step", "instruction", "direction"],
    },
}];

impl SiteProfile {
    /// Look up the profile for a page URL by domain.
    pub fn for_url(url: &str) -> Option<&'static SiteProfile> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        PROFILES.iter().find(|profile| {
            profile
                .domains
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
        })
    }
}

/// Extracts a recipe by trying a site's known tag/class combinations.
pub struct SiteClassExtractor {
    profile: &'static SiteProfile,
}

impl SiteClassExtractor {
    pub fn new(profile: &'static SiteProfile) -> Self {
        Self { profile }
    }

    fn selectors(matcher: &FieldMatcher) -> impl Iterator<Item = Selector> + '_ {
        matcher.tags.iter().flat_map(move |tag| {
            matcher
                .classes
                .iter()
                .filter_map(move |class| Selector::parse(&format!("{tag}.{class}")).ok())
        })
    }

    fn element_text(element: ElementRef) -> String {
        element.text().collect::<Vec<_>>().join(" ").trim().to_string()
    }

    fn find_text(document: &Html, matcher: &FieldMatcher) -> Option<String> {
        for selector in Self::selectors(matcher) {
            if let Some(element) = document.select(&selector).next() {
                let text = Self::element_text(element);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    fn find_image(document: &Html, matcher: &FieldMatcher) -> Option<String> {
        for selector in Self::selectors(matcher) {
            if let Some(element) = document.select(&selector).next() {
                if let Some(src) = element.value().attr("src") {
                    return Some(src.to_string());
                }
            }
        }
        None
    }

    /// Scan the duration hint for the first integer token, e.g. "45 phút".
    fn find_duration(document: &Html, matcher: &FieldMatcher) -> i64 {
        Self::find_text(document, matcher)
            .and_then(|text| {
                text.split_whitespace()
                    .find_map(|token| token.parse::<i64>().ok().filter(|n| *n >= 0))
            })
            .unwrap_or(MINIMUM_MINUTES)
    }

    /// Collect item texts under the first matching container, deduplicated.
    fn find_list(document: &Html, container: &FieldMatcher, items: &FieldMatcher) -> Vec<String> {
        let mut collected = Vec::new();
        for selector in Self::selectors(container) {
            for container_el in document.select(&selector) {
                for item_selector in Self::selectors(items) {
                    for item in container_el.select(&item_selector) {
                        push_unique(&mut collected, Self::element_text(item));
                    }
                }
            }
            if !collected.is_empty() {
                return collected;
            }
        }
        collected
    }
}

impl Extractor for SiteClassExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RawRecipe, CloneError> {
        debug!(
            "Trying site-specific class matchers for {} on {}",
            self.profile.name, context.url
        );

        let document = &context.document;
        let title = Self::find_text(document, &self.profile.title).unwrap_or_default();

        let mut ingredients = Self::find_list(
            document,
            &self.profile.ingredients,
            &self.profile.ingredient_items,
        );
        ingredients.truncate(MAX_INGREDIENTS);

        let mut steps = Self::find_list(document, &self.profile.steps, &self.profile.step_items);
        steps.truncate(MAX_STEPS);

        if title.is_empty() {
            return Err(CloneError::ParseError(format!(
                "No {} recipe title found on page",
                self.profile.name
            )));
        }
        if ingredients.is_empty() && steps.is_empty() {
            return Err(CloneError::ParseError(format!(
                "No {} recipe content found on page",
                self.profile.name
            )));
        }

        let description = Self::find_text(document, &self.profile.description)
            .map(|text| truncate_chars(&text, MAX_DESCRIPTION_CHARS))
            .unwrap_or_default();

        Ok(RawRecipe {
            title,
            description,
            image_url: Self::find_image(document, &self.profile.image).unwrap_or_default(),
            duration_in_minutes: Self::find_duration(document, &self.profile.duration),
            recipe_type: self.profile.default_type.to_string(),
            ingredients,
            steps,
        })
    }
}
