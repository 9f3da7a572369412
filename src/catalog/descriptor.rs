//! The normalized model record shown to the user.

use serde::Serialize;

use crate::constants::{RELIABLE_FREE_MODELS, RELIABLE_MODEL_DESCRIPTION, RELIABLE_MODEL_TAG};
use crate::provider::wire::RawModel;

/// One selectable language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Globally unique `"<provider>/<name>"` identifier.
    pub id: String,
    pub name: String,
    pub provider: String,
    pub free: bool,
    pub description: String,
    pub strengths: Vec<String>,
    pub capabilities: Vec<String>,
}

/// Splits `"provider/name"` into its parts. Ids without a slash have no provider.
fn split_id(id: &str) -> (&str, &str) {
    id.split_once('/').unwrap_or(("", id))
}

/// Whether the id is on the hardcoded allow-list.
pub fn is_reliable(id: &str) -> bool {
    RELIABLE_FREE_MODELS.contains(&id)
}

/// Price keys inspected when classifying a model as free.
const PRICE_FIELDS: &[&str] = &[
    "prompt",
    "completion",
    "input",
    "output",
    "hourly",
    "request",
    "image",
];

/// Best-effort free classification.
///
/// A model is free when its id or name mentions `free`, when it is on the
/// allow-list, or when it reports at least one price field and every
/// reported price field is zero.
pub fn is_free(raw: &RawModel) -> bool {
    let mentions_free = |s: &str| s.to_lowercase().contains("free");
    if mentions_free(&raw.id) || raw.name.as_deref().is_some_and(mentions_free) {
        return true;
    }
    if is_reliable(&raw.id) {
        return true;
    }
    let Some(pricing) = raw.pricing.as_ref() else {
        return false;
    };
    let prices: Vec<Option<f64>> = PRICE_FIELDS
        .iter()
        .filter_map(|k| pricing.get(*k))
        .map(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect();
    !prices.is_empty() && prices.iter().all(|p| *p == Some(0.0))
}

impl ModelDescriptor {
    /// Synthesizes the descriptor of an allow-listed model.
    pub fn reliable(id: &str) -> Self {
        let (provider, name) = split_id(id);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            free: true,
            description: RELIABLE_MODEL_DESCRIPTION.to_string(),
            strengths: vec![RELIABLE_MODEL_TAG.to_string()],
            capabilities: vec![RELIABLE_MODEL_TAG.to_string()],
        }
    }

    /// Descriptor for an id the catalog does not know about.
    ///
    /// Only the id itself can be classified, so it is free only if it says so
    /// or is allow-listed.
    pub fn unlisted(id: &str) -> Self {
        if is_reliable(id) {
            return Self::reliable(id);
        }
        let (provider, name) = split_id(id);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            free: id.to_lowercase().contains("free"),
            description: String::new(),
            strengths: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Normalizes a provider entry.
    pub fn from_raw(raw: RawModel) -> Self {
        let free = is_free(&raw);
        let (provider, name) = split_id(&raw.id);
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| name.to_string());
        let provider = raw
            .provider
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| provider.to_string());
        let capabilities = raw
            .architecture
            .and_then(|a| a.modality)
            .into_iter()
            .collect();
        Self {
            name,
            provider,
            free,
            description: raw.description.unwrap_or_default(),
            strengths: Vec::new(),
            capabilities,
            id: raw.id,
        }
    }

    pub fn is_reliable(&self) -> bool {
        is_reliable(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawModel {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_reliable_splits_id() {
        let d = ModelDescriptor::reliable("mistralai/mistral-7b-instruct");
        assert_eq!(d.provider, "mistralai");
        assert_eq!(d.name, "mistral-7b-instruct");
        assert!(d.free);
        assert!(d.is_reliable());
    }

    #[test]
    fn test_zero_prices_are_free() {
        assert!(is_free(&raw(json!({
            "id": "meta/llama",
            "pricing": {"prompt": "0", "completion": 0}
        }))));
        assert!(!is_free(&raw(json!({
            "id": "meta/llama",
            "pricing": {"prompt": "0", "completion": "0.000002"}
        }))));
    }

    #[test]
    fn test_unparseable_or_missing_prices_are_not_free() {
        assert!(!is_free(&raw(json!({"id": "x/auto", "pricing": {"prompt": "-1"}}))));
        assert!(!is_free(&raw(json!({"id": "x/auto", "pricing": {"prompt": "n/a"}}))));
        assert!(!is_free(&raw(json!({"id": "x/auto", "pricing": {}}))));
        assert!(!is_free(&raw(json!({"id": "x/auto"}))));
    }

    #[test]
    fn test_free_token_and_allow_list() {
        assert!(is_free(&raw(json!({"id": "google/gemma-7b-it:free"}))));
        assert!(is_free(&raw(json!({"id": "x/y", "name": "Something (Free)"}))));
        assert!(is_free(&raw(json!({
            "id": "google/gemini-pro",
            "pricing": {"prompt": "0.001"}
        }))));
    }

    #[test]
    fn test_from_raw_fills_gaps_from_id() {
        let d = ModelDescriptor::from_raw(raw(json!({
            "id": "anthropic/claude-3-haiku",
            "architecture": {"modality": "text->text"}
        })));
        assert_eq!(d.name, "claude-3-haiku");
        assert_eq!(d.provider, "anthropic");
        assert_eq!(d.capabilities, vec!["text->text"]);
        assert!(!d.free);
    }

    #[test]
    fn test_unlisted_classifies_by_id() {
        assert!(ModelDescriptor::unlisted("meta/llama-3:free").free);
        assert!(!ModelDescriptor::unlisted("x/y").free);
        assert_eq!(
            ModelDescriptor::unlisted("openai/gpt-3.5-turbo"),
            ModelDescriptor::reliable("openai/gpt-3.5-turbo")
        );
    }
}
