//! Model catalog resolution.
//!
//! Fetches the provider's model list, classifies free models, and merges the
//! result with the hardcoded allow-list so the selector always has something
//! known-good to show. [`fetch_catalog`] never fails.

mod descriptor;
mod filter;
mod listing;

use std::collections::HashSet;

pub use descriptor::ModelDescriptor;
pub use filter::visible_models;
pub use listing::print_catalog;

use crate::constants::{DEFAULT_MODEL, RELIABLE_FREE_MODELS};
use crate::provider::Provider;

/// The allow-list as full descriptors, all marked free.
pub fn allow_list() -> Vec<ModelDescriptor> {
    RELIABLE_FREE_MODELS
        .iter()
        .map(|id| ModelDescriptor::reliable(id))
        .collect()
}

/// Descriptor selected when nothing else is.
pub fn default_model() -> ModelDescriptor {
    ModelDescriptor::reliable(DEFAULT_MODEL)
}

/// Provider entries in order, then allow-list entries not already present.
///
/// Duplicate ids are dropped, first occurrence wins.
pub fn merge(provider_models: Vec<ModelDescriptor>) -> Vec<ModelDescriptor> {
    let mut seen = HashSet::new();
    provider_models
        .into_iter()
        .chain(allow_list())
        .filter(|m| !m.id.is_empty() && seen.insert(m.id.clone()))
        .collect()
}

/// Fetches and merges the catalog, falling back to the allow-list on any error.
pub async fn fetch_catalog(provider: &Provider) -> Vec<ModelDescriptor> {
    match provider.list_models().await {
        Ok(raw) => {
            let fetched = raw.len();
            let catalog = merge(raw.into_iter().map(ModelDescriptor::from_raw).collect());
            tracing::info!(fetched, total = catalog.len(), "model catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch models, using allow-list");
            allow_list()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(uri: &str) -> Provider {
        Provider::new(uri, Some("sk-test".into()), "http://localhost/", "Test", Duration::from_secs(2))
            .unwrap()
    }

    async fn serve_models(status: u16, body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_merge_appends_missing_allow_list_entries() {
        let api = vec![
            ModelDescriptor::unlisted("meta/llama:free"),
            ModelDescriptor::reliable("google/gemini-pro"),
        ];
        let ids: Vec<_> = merge(api).into_iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![
                "meta/llama:free",
                "google/gemini-pro",
                "openai/gpt-3.5-turbo",
                "anthropic/claude-instant-1.2",
                "mistralai/mistral-7b-instruct",
            ]
        );
    }

    #[test]
    fn test_merge_drops_duplicate_provider_entries() {
        let api = vec![
            ModelDescriptor::unlisted("a/b"),
            ModelDescriptor::unlisted("a/b"),
            ModelDescriptor::unlisted(""),
        ];
        let merged = merge(api);
        let unique: HashSet<_> = merged.iter().map(|m| &m.id).collect();
        assert_eq!(unique.len(), merged.len());
        assert_eq!(merged.len(), 1 + RELIABLE_FREE_MODELS.len());
    }

    #[tokio::test]
    async fn test_empty_listing_yields_allow_list() {
        let server = serve_models(200, json!({"data": []})).await;
        let catalog = fetch_catalog(&provider(&server.uri())).await;
        assert_eq!(catalog, allow_list());
        assert!(catalog.iter().all(|m| m.free));
    }

    #[tokio::test]
    async fn test_http_error_yields_allow_list() {
        let server = serve_models(500, json!({"error": "boom"})).await;
        let catalog = fetch_catalog(&provider(&server.uri())).await;
        assert_eq!(catalog, allow_list());
    }

    #[tokio::test]
    async fn test_transport_error_yields_allow_list() {
        let catalog = fetch_catalog(&provider("http://127.0.0.1:9")).await;
        assert_eq!(catalog, allow_list());
    }

    #[tokio::test]
    async fn test_provider_order_then_allow_list() {
        let server = serve_models(
            200,
            json!({"data": [
                {"id": "openai/gpt-4o", "name": "GPT-4o", "pricing": {"prompt": "0.000005", "completion": "0.000015"}},
                {"id": "openai/gpt-3.5-turbo", "name": "GPT-3.5 Turbo", "pricing": {"prompt": "0.0000005"}},
                {"id": "meta-llama/llama-3-8b-instruct:free", "name": "Llama 3 8B (free)"}
            ]}),
        )
        .await;
        let catalog = fetch_catalog(&provider(&server.uri())).await;
        let ids: Vec<_> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "openai/gpt-4o",
                "openai/gpt-3.5-turbo",
                "meta-llama/llama-3-8b-instruct:free",
                "anthropic/claude-instant-1.2",
                "google/gemini-pro",
                "mistralai/mistral-7b-instruct",
            ]
        );
        assert!(!catalog[0].free);
        // Allow-listed ids stay free whatever the provider reports.
        assert!(catalog[1].free);
        assert_eq!(catalog[1].name, "GPT-3.5 Turbo");
        assert!(catalog[2].free);
    }
}
