//! Prompt completion with a single fallback retry.
//!
//! [`Completer::try_complete`] returns a tagged result so callers can log
//! what went wrong; [`Completer::complete`] maps that result to the text
//! shown to the user and never fails.
//!
//! Per call: `Building → Sending → Success`, or on a retryable failure
//! `Sending → Retrying → Sending → {Success, Failed}`.

use std::borrow::Cow;

use crate::config::Config;
use crate::constants::{
    FAILURE_MESSAGE, NO_RESPONSE_MESSAGE, SYSTEM_PROMPT, TRUNCATION_MARKER,
};
use crate::provider::wire::{ChatMessage, ChatRequest};
use crate::provider::{Provider, ProviderError};

/// Sampling parameters and limits applied to every completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_prompt_chars: usize,
    pub fallback_model: String,
}

impl CompletionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            max_prompt_chars: config.max_prompt_chars(),
            fallback_model: config.fallback_model.clone(),
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Model that produced the text; the fallback when a retry happened.
    pub model: String,
    pub retried: bool,
}

/// Cuts `prompt` to `max_chars` characters, appending `...` when it was longer.
pub fn truncate_prompt(prompt: &str, max_chars: usize) -> Cow<'_, str> {
    match prompt.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &prompt[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(prompt),
    }
}

/// Text shown to the user for a completion outcome.
pub fn user_message(result: Result<Completion, ProviderError>) -> String {
    match result {
        Ok(completion) => completion.text,
        Err(ProviderError::EmptyResponse) => NO_RESPONSE_MESSAGE.to_string(),
        Err(_) => FAILURE_MESSAGE.to_string(),
    }
}

/// Sends prompts to the provider with the configured settings.
#[derive(Debug, Clone)]
pub struct Completer {
    provider: Provider,
    settings: CompletionSettings,
}

impl Completer {
    pub fn new(provider: Provider, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    async fn send(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };
        tracing::info!(model, prompt_chars = prompt.chars().count(), "sending completion");
        self.provider.chat(&request).await
    }

    /// Completes `prompt` with `model`, retrying once with the fallback model.
    ///
    /// The retry happens only for retryable failures and only when `model`
    /// is not already the fallback. The error of the last attempt is returned.
    pub async fn try_complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<Completion, ProviderError> {
        let prompt = truncate_prompt(prompt, self.settings.max_prompt_chars);
        let fallback = self.settings.fallback_model.as_str();

        let first = match self.send(model, &prompt).await {
            Ok(text) => {
                return Ok(Completion {
                    text,
                    model: model.to_string(),
                    retried: false,
                })
            }
            Err(e) => e,
        };

        if !first.is_retryable() || model == fallback {
            tracing::error!(model, error = %first, "completion failed");
            return Err(first);
        }

        tracing::warn!(model, fallback, error = %first, "completion failed, retrying with fallback model");
        match self.send(fallback, &prompt).await {
            Ok(text) => Ok(Completion {
                text,
                model: fallback.to_string(),
                retried: true,
            }),
            Err(e) => {
                tracing::error!(model = fallback, error = %e, "fallback completion failed");
                Err(e)
            }
        }
    }

    /// Completes `prompt`, always yielding text for the user.
    #[allow(dead_code)]
    pub async fn complete(&self, model: &str, prompt: &str) -> String {
        user_message(self.try_complete(model, prompt).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FALLBACK: &str = crate::constants::FALLBACK_MODEL;

    fn completer(uri: &str) -> Completer {
        let provider = Provider::new(
            uri,
            Some("sk-test".into()),
            "http://localhost/",
            "Test",
            Duration::from_secs(2),
        )
        .unwrap();
        Completer::new(provider, CompletionSettings::default())
    }

    fn ok_body(text: &str) -> Value {
        json!({"choices": [{"message": {"role": "assistant", "content": text}}]})
    }

    async fn requested_models(server: &MockServer) -> Vec<String> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| {
                let body: Value = serde_json::from_slice(&r.body).unwrap();
                body["model"].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_truncate_prompt() {
        assert_eq!(truncate_prompt("short", 10), "short");
        assert_eq!(truncate_prompt("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_prompt("abcdefghijkl", 10), "abcdefghij...");
        // Counts characters, not bytes.
        let accented = "è".repeat(12);
        assert_eq!(truncate_prompt(&accented, 10).chars().count(), 13);
    }

    #[test]
    fn test_user_message_mapping() {
        assert_eq!(user_message(Err(ProviderError::EmptyResponse)), NO_RESPONSE_MESSAGE);
        assert_eq!(
            user_message(Err(ProviderError::Http {
                status: 500,
                body: String::new()
            })),
            FAILURE_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_success_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "model": "google/gemini-pro",
                "temperature": 0.7,
                "max_tokens": 1200,
                "messages": [{"role": "system", "content": SYSTEM_PROMPT}, {"role": "user", "content": "ciao"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("# Piano")))
            .expect(1)
            .mount(&server)
            .await;

        let result = completer(&server.uri())
            .try_complete("google/gemini-pro", "ciao")
            .await
            .unwrap();
        assert_eq!(result.text, "# Piano");
        assert!(!result.retried);
    }

    #[tokio::test]
    async fn test_long_prompt_is_truncated_in_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("ok")))
            .mount(&server)
            .await;

        let prompt = "x".repeat(5000);
        completer(&server.uri()).complete(FALLBACK, &prompt).await;

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let sent = body["messages"][1]["content"].as_str().unwrap();
        assert_eq!(sent.chars().count(), 2000 + TRUNCATION_MARKER.len());
        assert!(sent.ends_with("..."));
    }

    #[tokio::test]
    async fn test_http_500_retries_once_with_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "x/y"})))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": FALLBACK})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("dal fallback")))
            .expect(1)
            .mount(&server)
            .await;

        let result = completer(&server.uri()).try_complete("x/y", "ciao").await.unwrap();
        assert_eq!(result.text, "dal fallback");
        assert_eq!(result.model, FALLBACK);
        assert!(result.retried);
        assert_eq!(requested_models(&server).await, vec!["x/y", FALLBACK]);
    }

    #[tokio::test]
    async fn test_timeout_retries_with_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "x/y"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(ok_body("troppo tardi"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": FALLBACK})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("dal fallback")))
            .mount(&server)
            .await;

        let provider = Provider::new(
            server.uri(),
            None,
            "http://localhost/",
            "Test",
            Duration::from_millis(200),
        )
        .unwrap();
        let completer = Completer::new(provider, CompletionSettings::default());

        let result = completer.try_complete("x/y", "ciao").await.unwrap();
        assert_eq!(result.text, "dal fallback");
        assert_eq!(result.model, FALLBACK);
        assert!(result.retried);
        assert_eq!(requested_models(&server).await, vec!["x/y", FALLBACK]);
    }

    #[tokio::test]
    async fn test_both_attempts_fail_returns_failure_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let text = completer(&server.uri()).complete("x/y", "ciao").await;
        assert_eq!(text, FAILURE_MESSAGE);
        assert_eq!(requested_models(&server).await, vec!["x/y", FALLBACK]);
    }

    #[tokio::test]
    async fn test_fallback_model_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let text = completer(&server.uri()).complete(FALLBACK, "ciao").await;
        assert_eq!(text, FAILURE_MESSAGE);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_choices_returns_no_response_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let text = completer(&server.uri()).complete("x/y", "ciao").await;
        assert_eq!(text, NO_RESPONSE_MESSAGE);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_never_escapes() {
        let text = completer("http://127.0.0.1:9").complete("x/y", "ciao").await;
        assert_eq!(text, FAILURE_MESSAGE);
    }
}
