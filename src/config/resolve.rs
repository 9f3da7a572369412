//! Environment variable substitution and effective-setting accessors.

use std::time::Duration;

use super::types::{Config, ProviderEntry};

use crate::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_REFERER, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, DEFAULT_TITLE,
    MAX_PROMPT_CHARS, OPENROUTER_API_KEY_ENV, OPENROUTER_BASE_URL,
};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        self.model = Self::resolve_str(&self.model);
        self.fallback_model = Self::resolve_str(&self.fallback_model);
        if let Some(ref mut referer) = self.referer {
            *referer = Self::resolve_str(referer);
        }
        if let Some(ref mut title) = self.title {
            *title = Self::resolve_str(title);
        }
        Self::resolve_provider_entry(&mut self.provider.openrouter);
    }

    /// Resolves `{env:VAR}` patterns in a single provider entry's `api_key` and `base_url`.
    fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
        if let Some(ref mut e) = entry {
            if let Some(ref mut key) = e.api_key {
                *key = Self::resolve_str(key);
            }
            if let Some(ref mut url) = e.base_url {
                *url = Self::resolve_str(url);
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }

    /// Resolve the OpenRouter API key: env var first, then config value.
    ///
    /// Empty values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(val) = std::env::var(OPENROUTER_API_KEY_ENV) {
            if !val.is_empty() {
                return Some(val);
            }
        }

        self.provider
            .openrouter
            .as_ref()
            .and_then(|e| e.api_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Provider base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        self.provider
            .openrouter
            .as_ref()
            .and_then(|e| e.base_url.as_deref())
            .filter(|u| !u.is_empty())
            .unwrap_or(OPENROUTER_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn referer(&self) -> &str {
        self.referer.as_deref().unwrap_or(DEFAULT_REFERER)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn temperature(&self) -> f32 {
        self.generation.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32 {
        self.generation.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn max_prompt_chars(&self) -> usize {
        self.generation.max_prompt_chars.unwrap_or(MAX_PROMPT_CHARS)
    }

    /// Deadline applied to every provider request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.generation.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_str_substitutes_env() {
        std::env::set_var("BENESSERE_TEST_SUBST", "abc");
        assert_eq!(
            Config::resolve_str("key-{env:BENESSERE_TEST_SUBST}-end"),
            "key-abc-end"
        );
    }

    #[test]
    fn test_resolve_str_missing_var_is_empty() {
        assert_eq!(Config::resolve_str("{env:BENESSERE_TEST_UNSET_VAR}"), "");
    }

    #[test]
    fn test_resolve_str_unterminated_is_left_alone() {
        assert_eq!(Config::resolve_str("{env:OPEN"), "{env:OPEN");
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = Config::default();
        assert_eq!(config.base_url(), OPENROUTER_BASE_URL);
        assert_eq!(config.title(), DEFAULT_TITLE);
        assert_eq!(config.max_prompt_chars(), 2000);
        assert_eq!(config.max_tokens(), 1200);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.provider.openrouter = Some(ProviderEntry {
            api_key: None,
            base_url: Some("http://127.0.0.1:8080/api/".into()),
        });
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/api");
    }
}
