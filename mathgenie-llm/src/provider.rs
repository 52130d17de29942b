//! Provider shapes — how a uniform quiz request maps onto a vendor API.
//!
//! Two conventions are understood:
//!
//! | shape | endpoint | auth | text location |
//! |-------|----------|------|---------------|
//! | [`ProviderShape::Gemini`] | `{base}/models/{model}:generateContent?key={key}` | query param | `candidates[0].content.parts[0].text` |
//! | [`ProviderShape::OpenAiCompatible`] | `{base}/chat/completions` | `Authorization: Bearer` | `choices[0].message.content` |
//!
//! The shape is picked from the base URL alone by [`ProviderShape::classify`].
//! Any URL that is not a Google endpoint is assumed to speak the OpenAI chat
//! completions dialect (OpenAI, Groq, DeepSeek, local gateways, ...). That
//! is a heuristic; a misclassified endpoint shows up as a provider error or
//! an empty response.

use std::fmt;

use mathgenie_core::ConnectionConfig;
use serde_json::{Value, json};

use crate::prompt::QUIZ_SYSTEM;

/// Substring of the base URL that selects the Gemini-style shape.
pub const GEMINI_URL_MARKER: &str = "googleapis.com";

/// Sampling temperature sent to OpenAI-compatible providers.
pub const OPENAI_TEMPERATURE: f64 = 0.7;

/// Request/response convention of an LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderShape {
    /// Google Generative Language API (`generateContent`).
    Gemini,
    /// OpenAI-style `chat/completions`.
    OpenAiCompatible,
}

impl ProviderShape {
    /// Pick the shape for a base URL.
    #[must_use]
    pub fn classify(base_url: &str) -> Self {
        if base_url.contains(GEMINI_URL_MARKER) {
            Self::Gemini
        } else {
            Self::OpenAiCompatible
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAiCompatible => "openai_compatible",
        }
    }

    /// Full request URL for this shape.
    #[must_use]
    pub fn endpoint(self, config: &ConnectionConfig) -> String {
        match self {
            Self::Gemini => format!(
                "{}/models/{}:generateContent?key={}",
                config.base_url, config.model_name, config.api_key
            ),
            Self::OpenAiCompatible => {
                let base = config
                    .base_url
                    .strip_suffix('/')
                    .unwrap_or(&config.base_url);
                format!("{base}/chat/completions")
            }
        }
    }

    /// Headers beyond the transport defaults.
    #[must_use]
    pub fn headers(self, config: &ConnectionConfig) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Content-Type", "application/json".to_string())];
        if self == Self::OpenAiCompatible {
            headers.push(("Authorization", format!("Bearer {}", config.api_key)));
        }
        headers
    }

    /// JSON request body carrying `prompt`.
    #[must_use]
    pub fn body(self, config: &ConnectionConfig, prompt: &str) -> Value {
        match self {
            Self::Gemini => json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }]
            }),
            Self::OpenAiCompatible => json!({
                "model": config.model_name,
                "messages": [
                    { "role": "system", "content": QUIZ_SYSTEM },
                    { "role": "user", "content": prompt },
                ],
                "temperature": OPENAI_TEMPERATURE,
            }),
        }
    }

    /// Build the complete outbound request.
    #[must_use]
    pub fn prepare(self, config: &ConnectionConfig, prompt: &str) -> PreparedRequest {
        PreparedRequest {
            shape: self,
            url: self.endpoint(config),
            headers: self.headers(config),
            body: self.body(config, prompt),
        }
    }

    /// Locate the generated text in a successful response body.
    #[must_use]
    pub fn extract_text(self, response: &Value) -> Option<&str> {
        let text = match self {
            Self::Gemini => response
                .get("candidates")?
                .get(0)?
                .get("content")?
                .get("parts")?
                .get(0)?
                .get("text")?,
            Self::OpenAiCompatible => response
                .get("choices")?
                .get(0)?
                .get("message")?
                .get("content")?,
        };
        text.as_str()
    }
}

impl fmt::Display for ProviderShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully built HTTP POST, ready for a [`Transport`](crate::transport::Transport).
#[derive(Clone, PartialEq)]
pub struct PreparedRequest {
    /// Shape the request was built for.
    pub shape: ProviderShape,
    /// Target URL (may contain the API key for Gemini).
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(&'static str, String)>,
    /// JSON body.
    pub body: Value,
}

impl PreparedRequest {
    /// Value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL safe to log: every `key` query parameter is masked, wherever it
    /// appears after a `?` or `&`.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let mut out = String::with_capacity(self.url.len());
        for (index, piece) in self.url.split_inclusive(['?', '&']).enumerate() {
            match piece.strip_prefix("key=") {
                Some(value) if index > 0 => {
                    out.push_str("key=***");
                    if let Some(sep) = value.chars().last().filter(|c| matches!(c, '?' | '&')) {
                        out.push(sep);
                    }
                }
                _ => out.push_str(piece),
            }
        }
        out
    }
}

impl fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| *k).collect();
        f.debug_struct("PreparedRequest")
            .field("shape", &self.shape)
            .field("url", &self.redacted_url())
            .field("headers", &header_names)
            .finish_non_exhaustive()
    }
}

/// Human-readable message for a failed provider call.
///
/// Looks for `error.message`, then a string `error`, then `message` in a
/// JSON body, and otherwise derives one from the status reason.
#[must_use]
pub fn provider_error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidates = [
            json.get("error").and_then(|e| e.get("message")),
            json.get("error"),
            json.get("message"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(message) = candidate.as_str() {
                if !message.trim().is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    format!("API Error: {}", reason.unwrap_or("Unknown"))
}
