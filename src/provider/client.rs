//! HTTP client for the OpenRouter API.
//!
//! Contains the [`Provider`] struct which owns a [`reqwest::Client`] and the
//! identifying headers OpenRouter expects on every call. It exposes the two
//! endpoints benessere uses and reports failures as [`ProviderError`].

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

use super::error::ProviderError;
use super::wire::{ChatRequest, ChatResponse, ModelsResponse, RawModel};
use crate::config::Config;

/// A configured OpenRouter endpoint ready to list models and complete prompts.
#[derive(Clone)]
pub struct Provider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// A missing API key is not an error: requests go out unauthenticated,
    /// fail, and land in the usual fallbacks.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            tracing::warn!(
                "no OpenRouter API key found; set {} or configure it in config.toml",
                crate::constants::OPENROUTER_API_KEY_ENV
            );
        }
        Self::new(
            config.base_url(),
            api_key,
            config.referer(),
            config.title(),
            config.timeout(),
        )
    }

    /// Builds a provider for an explicit endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if a header value is not valid ASCII or the TLS
    /// backend cannot be initialised.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        referer: &str,
        title: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "HTTP-Referer",
            HeaderValue::from_str(referer).context("Invalid HTTP-Referer header value")?,
        );
        headers.insert(
            "X-Title",
            HeaderValue::from_str(title).context("Invalid X-Title header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}/{}", self.base_url, path));
        match self.api_key {
            Some(ref key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Sends a request and returns the body of a 2xx response.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, ProviderError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// `GET /models`: the provider's raw model list.
    pub async fn list_models(&self) -> Result<Vec<RawModel>, ProviderError> {
        let body = self.send(self.request(reqwest::Method::GET, "models")).await?;
        let parsed: ModelsResponse = serde_json::from_str(&body)?;
        Ok(parsed.data)
    }

    /// `POST /chat/completions`: text of the first choice.
    pub async fn chat(&self, request: &ChatRequest<'_>) -> Result<String, ProviderError> {
        let body = self
            .send(
                self.request(reqwest::Method::POST, "chat/completions")
                    .json(request),
            )
            .await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed.into_first_text().ok_or(ProviderError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::wire::ChatMessage;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, key: Option<&str>) -> Provider {
        Provider::new(
            server.uri(),
            key.map(String::from),
            "https://example.test/",
            "BenessereTest",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_models_sends_identifying_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(bearer_token("sk-test"))
            .and(header("HTTP-Referer", "https://example.test/"))
            .and(header("X-Title", "BenessereTest"))
            .and(header("Content-Type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "a/b"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let models = provider(&server, Some("sk-test")).list_models().await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "a/b");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(401).set_body_string("no key"))
            .mount(&server)
            .await;

        let err = provider(&server, None).list_models().await.unwrap_err();
        match err {
            ProviderError::Http { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "no key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = provider(&server, None).list_models().await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_chat_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let request = ChatRequest {
            model: "a/b",
            messages: vec![ChatMessage::user("hi")],
            temperature: 0.7,
            max_tokens: 10,
        };
        let err = provider(&server, None).chat(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let provider = Provider::new(
            "http://127.0.0.1:9",
            None,
            "https://example.test/",
            "BenessereTest",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = provider.list_models().await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
