use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;

use crate::duration::parse_iso_duration;
use crate::error::CloneError;
use crate::extractors::{
    push_unique, truncate_chars, Extractor, ParsingContext, MAX_DESCRIPTION_CHARS, MAX_INGREDIENTS,
    MAX_STEPS,
};
use crate::model::RawRecipe;

/// Extracts a recipe from an embedded schema.org JSON-LD block.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(default)]
    description: Option<DescriptionType>,
    #[serde(default)]
    image: ImageType,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(default, rename = "recipeIngredient")]
    recipe_ingredient: Vec<String>,
    #[serde(default, rename = "recipeInstructions")]
    recipe_instructions: RecipeInstructions,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ImageType {
    #[default]
    None,
    String(String),
    Object(ImageObject),
    // potentially multiple images, as plain URLs or as objects
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepEntry {
    Text(String),
    Object(TextObject),
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    #[default]
    None,
    String(String),
    Multiple(Vec<StepEntry>),
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

impl From<JsonLdRecipe> for RawRecipe {
    fn from(schema: JsonLdRecipe) -> Self {
        let description = match schema.description {
            Some(DescriptionType::String(desc)) => decode_html_symbols(&desc),
            Some(DescriptionType::Object(desc)) => decode_html_symbols(&desc.text),
            None => String::new(),
        };

        let image_url = match schema.image {
            ImageType::None => String::new(),
            ImageType::String(img) => img,
            ImageType::Object(img) => img.url,
            ImageType::MultipleStrings(imgs) => imgs.into_iter().next().unwrap_or_default(),
            ImageType::MultipleObjects(imgs) => {
                imgs.into_iter().next().map(|img| img.url).unwrap_or_default()
            }
        };

        let duration_in_minutes = parse_iso_duration(schema.cook_time.as_deref().unwrap_or("PT30M"));

        let mut ingredients = Vec::new();
        for ing in schema.recipe_ingredient {
            push_unique(&mut ingredients, decode_html_symbols(ing.trim()));
        }
        ingredients.truncate(MAX_INGREDIENTS);

        let mut steps = Vec::new();
        let entries = match schema.recipe_instructions {
            RecipeInstructions::None => Vec::new(),
            RecipeInstructions::String(text) => vec![StepEntry::Text(text)],
            RecipeInstructions::Multiple(entries) => entries,
        };
        for entry in entries {
            let text = match entry {
                StepEntry::Text(text) => text,
                StepEntry::Object(obj) => obj.text,
            };
            push_unique(&mut steps, decode_html_symbols(text.trim()));
        }
        steps.truncate(MAX_STEPS);

        RawRecipe {
            title: decode_html_symbols(&schema.name),
            description: truncate_chars(&description, MAX_DESCRIPTION_CHARS),
            image_url,
            duration_in_minutes,
            recipe_type: "Other".to_string(),
            ingredients,
            steps,
        }
    }
}

/// Clean up JSON text as it appears in the wild inside script tags.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Some pages prepend junk before the first JSON object
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    // Trailing commas and stray HTML comments break serde_json
    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

fn is_recipe_node(value: &Value) -> bool {
    value.get("@type") == Some(&Value::String("Recipe".to_string()))
        || value.get("recipeInstructions").is_some()
}

/// Locate the Recipe node in a JSON-LD document: a bare object, an element
/// of a top-level array, or an entry of an `@graph` wrapper.
fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    if json_ld.is_array() {
        return json_ld
            .as_array()
            .and_then(|arr| arr.iter().find(|item| is_recipe_node(item)));
    }

    if is_recipe_node(json_ld) {
        return Some(json_ld);
    }

    json_ld
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|arr| arr.iter().find(|item| is_recipe_node(item)))
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RawRecipe, CloneError> {
        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| CloneError::ParseError(e.to_string()))?;

        // Try each script element until we find a valid recipe
        for script in context.document.select(&selector) {
            let cleaned_json = sanitize_json(&script.inner_html());
            let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned_json) else {
                debug!("Skipping ld+json block with malformed JSON on {}", context.url);
                continue;
            };

            if let Some(node) = find_recipe_node(&json_ld) {
                match serde_json::from_value::<JsonLdRecipe>(node.clone()) {
                    Ok(schema) => {
                        debug!("Found JSON-LD recipe on {}", context.url);
                        return Ok(RawRecipe::from(schema));
                    }
                    Err(e) => {
                        debug!("JSON-LD recipe node did not deserialize: {e}");
                    }
                }
            }
        }

        Err(CloneError::ParseError(
            "No valid recipe found in any JSON-LD script".to_string(),
        ))
    }
}
