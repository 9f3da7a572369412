//! Centralized constants for benessere.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "benessere";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "benessere.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "session_history.txt";

// --- Provider ---

/// Default OpenRouter API base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Environment variable holding the OpenRouter API key.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default `HTTP-Referer` header sent to OpenRouter.
pub const DEFAULT_REFERER: &str = "https://github.com/benessere-nutri/benessere";

/// Default `X-Title` header sent to OpenRouter.
pub const DEFAULT_TITLE: &str = "BenessereNutri";

// --- Models ---

/// Models known to work with free credits. Always present in the catalog.
pub const RELIABLE_FREE_MODELS: &[&str] = &[
    "openai/gpt-3.5-turbo",
    "anthropic/claude-instant-1.2",
    "google/gemini-pro",
    "mistralai/mistral-7b-instruct",
];

/// Model selected when nothing else has been chosen.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Model used for the single retry after a failed completion.
pub const FALLBACK_MODEL: &str = "openai/gpt-3.5-turbo";

/// Description given to allow-listed models synthesized locally.
pub const RELIABLE_MODEL_DESCRIPTION: &str = "Modello affidabile per generare testo.";

/// Strength and capability tag given to allow-listed models.
pub const RELIABLE_MODEL_TAG: &str = "Generazione di testo";

// --- Generation ---

/// Maximum prompt length in characters before truncation.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Marker appended to a truncated prompt.
pub const TRUNCATION_MARKER: &str = "...";

/// Sampling temperature for plan generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Maximum tokens for plan completions.
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

/// Request deadline in seconds for every provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Number of days requested in generated plans.
pub const PLAN_DAYS: u32 = 3;

/// System instruction sent with every completion.
pub const SYSTEM_PROMPT: &str = "Sei un esperto assistente di nutrizione e fitness. \
Rispondi in italiano con dettagli utili e pratici.";

// --- User-facing messages ---

/// Returned when the provider answered without any completion text.
pub const NO_RESPONSE_MESSAGE: &str = "Non è stato possibile generare una risposta.";

/// Returned when both the requested and the fallback model failed.
pub const FAILURE_MESSAGE: &str = "Si è verificato un errore durante la generazione della risposta. \
Riprova con un altro modello o più tardi.";

/// Shown when a plan is requested with a model that is not free.
pub const NON_FREE_MODEL_MESSAGE: &str =
    "È possibile generare piani solo con modelli gratuiti. Seleziona un modello gratuito.";

// --- Plans ---

/// Default download filename for nutrition plans.
pub const NUTRITION_PLAN_FILENAME: &str = "piano-nutrizionale.txt";

/// Default download filename for fitness plans.
pub const FITNESS_PLAN_FILENAME: &str = "piano-fitness.txt";

/// Marker used in prompts when the user has no dietary restrictions.
pub const NO_RESTRICTIONS: &str = "Nessuna";

/// Dietary restrictions offered as presets.
pub const COMMON_DIETARY_RESTRICTIONS: &[&str] = &[
    "Vegetariano",
    "Vegano",
    "Senza Glutine",
    "Senza Lattosio",
    "Senza Frutta Secca",
    "Low-Carb",
    "Low-Fat",
];

/// Default age used when none is provided.
pub const DEFAULT_AGE: u32 = 30;

/// Upper bound accepted for the age field.
pub const MAX_AGE: u32 = 120;
