use log::info;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::adapters::{build_client, json_file::candidates_from_value, Source, SourceAdapter};
use crate::config::CloneConfig;
use crate::error::CloneError;
use crate::model::RawRecipe;

/// Fetches recipes from a remote JSON API with a single bounded-timeout GET.
pub struct RemoteApiAdapter {
    client: Client,
}

impl RemoteApiAdapter {
    pub fn new(config: &CloneConfig) -> Result<Self, CloneError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

/// APIs respond with a bare list, a single object, or an object wrapping
/// its payload under a `recipes` or `data` key. Non-list payloads are
/// treated as a single-element list downstream.
fn unwrap_collection(body: Value) -> Value {
    let Value::Object(mut map) = body else {
        return body;
    };

    for key in ["recipes", "data"] {
        if let Some(wrapped) = map.remove(key) {
            return wrapped;
        }
    }

    Value::Object(map)
}

impl SourceAdapter for RemoteApiAdapter {
    fn provenance(&self, _source: &Source) -> String {
        "api_import".to_string()
    }

    fn accepts(&self, source: &Source) -> bool {
        matches!(source, Source::Api(_))
    }

    fn extract(&self, source: &Source) -> Result<Vec<RawRecipe>, CloneError> {
        let Source::Api(url) = source else {
            return Ok(Vec::new());
        };

        info!("Fetching recipes from API: {url}");
        let body: Value = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(candidates_from_value(unwrap_collection(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_recipes_key() {
        let body = json!({"recipes": [{"title": "a"}, {"title": "b"}]});
        let unwrapped = unwrap_collection(body);
        assert_eq!(unwrapped.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_unwrap_data_key() {
        let body = json!({"data": [{"title": "a"}]});
        let unwrapped = unwrap_collection(body);
        assert_eq!(unwrapped.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_bare_list_passes_through() {
        let body = json!([{"title": "a"}]);
        assert!(unwrap_collection(body).is_array());
    }

    #[test]
    fn test_single_object_stays_an_object() {
        let body = json!({"title": "a"});
        let unwrapped = unwrap_collection(body);
        assert_eq!(unwrapped["title"], "a");
        assert_eq!(candidates_from_value(unwrapped).len(), 1);
    }

    #[test]
    fn test_wrapped_non_list_treated_as_single_element() {
        let body = json!({"data": {"title": "inner"}});
        let unwrapped = unwrap_collection(body);
        assert_eq!(unwrapped["title"], "inner");
        assert_eq!(candidates_from_value(unwrapped).len(), 1);
    }
}
