//! Quiz client error types.

use thiserror::Error;

/// Errors that can occur while generating a quiz.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured. No request was sent.
    #[error("API key is missing")]
    MissingCredential,

    /// The provider answered with a non-success status.
    #[error("{message}")]
    ProviderError {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied message, or one derived from the status.
        message: String,
    },

    /// Success status, but no text where the provider shape puts it.
    #[error("No content returned from API")]
    EmptyResponse,

    /// The returned text is not a JSON array of quiz items.
    #[error("Failed to parse API response. The AI did not return valid JSON: {0}")]
    MalformedResponse(String),

    /// The HTTP request itself failed (DNS, connect, I/O).
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// The HTTP client gave up waiting.
    #[error("LLM request timed out")]
    Timeout,
}

impl LlmError {
    /// Short machine-friendly name of the error kind, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::ProviderError { .. } => "provider_error",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
            Self::RequestFailed(_) => "request_failed",
            Self::Timeout => "timeout",
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            // Strip the URL: for Gemini-style endpoints it carries the key.
            LlmError::RequestFailed(err.without_url().to_string())
        }
    }
}
