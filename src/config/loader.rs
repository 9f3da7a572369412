//! File loading and merging for benessere configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{default_fallback_model, default_model, Config, GenerationConfig, ProviderConfig, ProviderEntry};

impl Config {
    /// Loads the global config from `~/.config/benessere/config.toml`.
    ///
    /// If no config file exists, creates one with sensible defaults
    /// (including an `{env:VAR}` placeholder for the API key) and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let default_toml = Self::default_toml();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            let config: Config = toml::from_str(&default_toml)
                .with_context(|| "Failed to parse default config".to_string())?;
            return Ok(config);
        }

        Self::load_file(&path)
    }

    /// Reads and parses a single config file.
    pub(super) fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// Contents written to a freshly created global config.
    fn default_toml() -> String {
        format!(
            r#"model = "{}"
fallback_model = "{}"

[provider.openrouter]
api_key = "{{env:{}}}"
base_url = "{}"

[generation]
temperature = {}
max_tokens = {}
max_prompt_chars = {}
timeout_secs = {}
"#,
            default_model(),
            default_fallback_model(),
            crate::constants::OPENROUTER_API_KEY_ENV,
            crate::constants::OPENROUTER_BASE_URL,
            crate::constants::DEFAULT_TEMPERATURE,
            crate::constants::DEFAULT_MAX_TOKENS,
            crate::constants::MAX_PROMPT_CHARS,
            crate::constants::DEFAULT_TIMEOUT_SECS,
        )
    }

    /// Look for benessere.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Self::load_file(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: if project.model != default_model() {
                project.model
            } else {
                global.model
            },
            fallback_model: if project.fallback_model != default_fallback_model() {
                project.fallback_model
            } else {
                global.fallback_model
            },
            referer: project.referer.or(global.referer),
            title: project.title.or(global.title),
            provider: ProviderConfig {
                openrouter: Self::merge_entry(
                    global.provider.openrouter,
                    project.provider.openrouter,
                ),
            },
            generation: GenerationConfig {
                temperature: project
                    .generation
                    .temperature
                    .or(global.generation.temperature),
                max_tokens: project.generation.max_tokens.or(global.generation.max_tokens),
                max_prompt_chars: project
                    .generation
                    .max_prompt_chars
                    .or(global.generation.max_prompt_chars),
                timeout_secs: project
                    .generation
                    .timeout_secs
                    .or(global.generation.timeout_secs),
            },
        }
    }

    fn merge_entry(
        global: Option<ProviderEntry>,
        project: Option<ProviderEntry>,
    ) -> Option<ProviderEntry> {
        match (global, project) {
            (Some(g), Some(p)) => Some(ProviderEntry {
                api_key: p.api_key.or(g.api_key),
                base_url: p.base_url.or(g.base_url),
            }),
            (g, p) => p.or(g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toml_parses_to_defaults() {
        let config: Config = toml::from_str(&Config::default_toml()).unwrap();
        assert_eq!(config.model, crate::constants::DEFAULT_MODEL);
        assert_eq!(config.fallback_model, crate::constants::FALLBACK_MODEL);
        assert_eq!(config.generation.max_prompt_chars, Some(2000));
        let entry = config.provider.openrouter.unwrap();
        assert_eq!(entry.api_key.as_deref(), Some("{env:OPENROUTER_API_KEY}"));
    }

    #[test]
    fn test_empty_file_uses_serde_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model, crate::constants::DEFAULT_MODEL);
        assert!(config.provider.openrouter.is_none());
        assert!(config.generation.timeout_secs.is_none());
    }

    #[test]
    fn test_load_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = \"google/gemini-pro\"\n[generation]\ntemperature = 0.2\n")
            .unwrap();
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.model, "google/gemini-pro");
        assert_eq!(config.generation.temperature, Some(0.2));
    }

    #[test]
    fn test_load_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = [").unwrap();
        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_merge_project_wins_when_set() {
        let global: Config = toml::from_str(
            r#"
title = "Global"
[provider.openrouter]
api_key = "global-key"
base_url = "https://global.example/api"
[generation]
max_tokens = 800
timeout_secs = 30
"#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
model = "google/gemini-pro"
[provider.openrouter]
base_url = "http://localhost:9999"
[generation]
max_tokens = 400
"#,
        )
        .unwrap();

        let merged = Config::merge(global, project);
        assert_eq!(merged.model, "google/gemini-pro");
        assert_eq!(merged.title.as_deref(), Some("Global"));
        let entry = merged.provider.openrouter.unwrap();
        assert_eq!(entry.api_key.as_deref(), Some("global-key"));
        assert_eq!(entry.base_url.as_deref(), Some("http://localhost:9999"));
        assert_eq!(merged.generation.max_tokens, Some(400));
        assert_eq!(merged.generation.timeout_secs, Some(30));
    }

    #[test]
    fn test_merge_keeps_global_model_when_project_is_default() {
        let global = Config {
            model: "mistralai/mistral-7b-instruct".into(),
            ..Config::default()
        };
        let merged = Config::merge(global, Config::default());
        assert_eq!(merged.model, "mistralai/mistral-7b-instruct");
    }
}
