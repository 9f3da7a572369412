//! Struct definitions and serde defaults for benessere configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for benessere, deserialized from `config.toml`.
///
/// Fields use serde defaults so benessere can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Model selected at startup (e.g. `"openai/gpt-3.5-turbo"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Model used for the single retry after a failed completion.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
    /// Value of the `HTTP-Referer` header.
    #[serde(default)]
    pub referer: Option<String>,
    /// Value of the `X-Title` header.
    #[serde(default)]
    pub title: Option<String>,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Sampling and request limits.
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Returns the default model identifier (`"openai/gpt-3.5-turbo"`).
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

pub(super) fn default_fallback_model() -> String {
    crate::constants::FALLBACK_MODEL.to_string()
}

/// Provider-specific configuration map.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// Configuration for the OpenRouter API provider.
    pub openrouter: Option<ProviderEntry>,
}

/// Connection details for a single provider.
///
/// Allows overriding the API key and endpoint URL.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (useful for proxies).
    pub base_url: Option<String>,
}

/// Sampling parameters and request limits for plan generation.
///
/// Every field is optional; unset values fall back to the constants in
/// [`crate::constants`].
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Maximum output tokens per completion.
    pub max_tokens: Option<u32>,
    /// Prompt length in characters above which the prompt is truncated.
    pub max_prompt_chars: Option<usize>,
    /// Deadline for each HTTP request, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            fallback_model: default_fallback_model(),
            referer: None,
            title: None,
            provider: ProviderConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}
