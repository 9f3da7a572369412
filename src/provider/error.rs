//! Failure taxonomy for calls to the OpenRouter API.

use thiserror::Error;

/// Why a provider call did not yield usable data.
///
/// These never reach the user directly: the catalog resolver turns them
/// into the allow-list and the completion layer into canned messages.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, including timeouts.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// 2xx status with a body that is not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// 2xx status without any completion text.
    #[error("provider returned no completion text")]
    EmptyResponse,
}

impl ProviderError {
    /// Whether the completion layer should try the fallback model.
    ///
    /// An empty answer is still an answer, so it is not retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::EmptyResponse)
    }
}
