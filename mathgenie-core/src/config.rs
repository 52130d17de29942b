//! Configuration for MathGenie.
//!
//! Two layers live here:
//! - [`ConnectionConfig`] — the LLM endpoint settings a user edits and the
//!   settings store persists (JSON, camelCase keys).
//! - [`AppConfig`] — process-level tuning loaded from `mathgenie.toml`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_QUESTION_COUNT, Difficulty};

/// Base URL used when nothing has been configured yet.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when nothing has been configured yet.
pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";

// ---------------------------------------------------------------------------
// ConnectionConfig
// ---------------------------------------------------------------------------

/// LLM connection settings supplied per call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// HTTP endpoint root, e.g. `https://api.openai.com/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Secret credential.
    #[serde(default)]
    pub api_key: String,
    /// Provider model identifier.
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

impl ConnectionConfig {
    /// Build a connection config from its three parts.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Whether an API key has been set.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The API key with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.api_key)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model_name: default_model_name(),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.masked_api_key())
            .field("model_name", &self.model_name)
            .finish()
    }
}

/// Hide a secret for display, keeping its last four characters when it is
/// long enough for that not to leak most of it.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "(not set)".to_string(),
        n if n <= 8 => "*".repeat(n),
        n => {
            let tail: String = chars[n - 4..].iter().collect();
            format!("{}{tail}", "*".repeat(n - 4))
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Quiz defaults.
    #[serde(default)]
    pub quiz: QuizConfig,
    /// LLM transport settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `GenieError::Config` if the TOML is invalid or a value is out
    /// of range.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| crate::GenieError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> crate::error::Result<()> {
        let count = self.quiz.default_count;
        if !(crate::types::MIN_QUESTION_COUNT..=crate::types::MAX_QUESTION_COUNT).contains(&count) {
            return Err(crate::GenieError::Config(format!(
                "quiz.default_count must be between 1 and 10, got {count}"
            )));
        }
        Ok(())
    }
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
    /// SQLite file holding the persisted connection settings.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            settings_path: default_settings_path(),
        }
    }
}

/// Defaults applied when the user does not pick quiz options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Difficulty used when none is given.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Question count used when none is given.
    #[serde(default = "default_count")]
    pub default_count: u8,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            default_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

/// LLM transport tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whole-request timeout in seconds; `0` leaves the HTTP client default.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_model_name() -> String { DEFAULT_MODEL_NAME.to_string() }
fn default_log_level() -> String { "warn".to_string() }
fn default_settings_path() -> String { "mathgenie.db".to_string() }
fn default_count() -> u8 { DEFAULT_QUESTION_COUNT }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_connection_points_at_gemini() {
        let config = ConnectionConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
        assert!(!config.has_api_key());
    }

    #[test]
    fn connection_uses_camel_case_json() {
        let config = ConnectionConfig::new("https://api.openai.com/v1", "sk-1", "gpt-4o");
        let json = serde_json::to_value(&config).expect("serialize");
        assert_eq!(json["baseUrl"], "https://api.openai.com/v1");
        assert_eq!(json["apiKey"], "sk-1");
        assert_eq!(json["modelName"], "gpt-4o");
    }

    #[test]
    fn partial_connection_json_fills_defaults() {
        let config: ConnectionConfig =
            serde_json::from_str(r#"{"apiKey":"abc"}"#).expect("deserialize");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ConnectionConfig::new("https://x", "sk-super-secret-key", "m");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-super-secret-key"));
        assert!(debug.contains("-key"));
    }

    #[test]
    fn mask_secret_lengths() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("abcd"), "****");
        assert_eq!(mask_secret("sk-1234567890"), "*********7890");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").expect("parse");
        assert_eq!(config.general.log_level, "warn");
        assert!(!config.general.log_json);
        assert_eq!(config.general.settings_path, "mathgenie.db");
        assert_eq!(config.quiz.default_count, 5);
        assert_eq!(config.quiz.default_difficulty, Difficulty::Beginner);
        assert_eq!(config.llm.request_timeout_secs, 0);
    }

    #[test]
    fn toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [general]
            log_level = "debug"
            log_json = true

            [quiz]
            default_difficulty = "olympiad"
            default_count = 8

            [llm]
            request_timeout_secs = 30
            "#,
        )
        .expect("parse");
        assert_eq!(config.general.log_level, "debug");
        assert!(config.general.log_json);
        assert_eq!(config.quiz.default_difficulty, Difficulty::Olympiad);
        assert_eq!(config.quiz.default_count, 8);
        assert_eq!(config.llm.request_timeout_secs, 30);
    }

    #[test]
    fn toml_rejects_out_of_range_count() {
        let err = AppConfig::from_toml("[quiz]\ndefault_count = 42\n");
        assert!(matches!(err, Err(crate::GenieError::Config(_))));
    }

    #[test]
    fn toml_rejects_garbage() {
        assert!(AppConfig::from_toml("[[[").is_err());
    }
}
