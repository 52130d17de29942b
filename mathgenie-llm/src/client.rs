//! Quiz client — one prompt in, validated quiz items out.

use std::time::{Duration, Instant};

use mathgenie_core::{ConnectionConfig, QuizItem, QuizRequestParams};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::normalize::parse_quiz_items;
use crate::prompt::quiz_prompt;
use crate::provider::{ProviderShape, provider_error_message};
use crate::transport::{ReqwestTransport, Transport};

/// Generates quizzes against whichever provider a [`ConnectionConfig`]
/// points at.
///
/// The client holds no per-call state: the connection config is passed to
/// every call and never stored.
#[derive(Debug, Clone, Default)]
pub struct QuizClient<T = ReqwestTransport> {
    transport: T,
}

impl QuizClient<ReqwestTransport> {
    /// Create a client using the default HTTP transport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: ReqwestTransport::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            transport: ReqwestTransport::with_timeout(timeout)?,
        })
    }
}

impl From<reqwest::Client> for QuizClient<ReqwestTransport> {
    fn from(http: reqwest::Client) -> Self {
        Self {
            transport: ReqwestTransport::from_client(http),
        }
    }
}

impl<T: Transport> QuizClient<T> {
    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Generate a quiz.
    ///
    /// Sends exactly one request (none when the API key is missing) and
    /// returns the parsed items.
    ///
    /// # Errors
    /// - [`LlmError::MissingCredential`] if `config.api_key` is blank.
    /// - [`LlmError::ProviderError`] on a non-2xx status.
    /// - [`LlmError::EmptyResponse`] if no text is found in a 2xx reply.
    /// - [`LlmError::MalformedResponse`] if the text is not a JSON array of
    ///   quiz items.
    /// - [`LlmError::RequestFailed`] / [`LlmError::Timeout`] on transport
    ///   failure.
    pub async fn generate_quiz(
        &self,
        config: &ConnectionConfig,
        params: &QuizRequestParams,
    ) -> Result<Vec<QuizItem>, LlmError> {
        let result = self.request_quiz(config, params).await;
        if let Err(err) = &result {
            warn!(kind = err.kind(), error = %err, "Quiz generation failed");
        }
        result
    }

    async fn request_quiz(
        &self,
        config: &ConnectionConfig,
        params: &QuizRequestParams,
    ) -> Result<Vec<QuizItem>, LlmError> {
        if !config.has_api_key() {
            return Err(LlmError::MissingCredential);
        }

        let prompt = quiz_prompt(params);
        let shape = ProviderShape::classify(&config.base_url);
        let request = shape.prepare(config, &prompt);

        debug!(
            shape = %shape,
            url = %request.redacted_url(),
            model = %config.model_name,
            topics = params.topics().len(),
            count = params.count(),
            difficulty = %params.difficulty(),
            "Sending quiz request"
        );

        let start = Instant::now();
        let reply = self.transport.send(&request).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(status = reply.status, latency_ms, bytes = reply.body.len(), "Provider replied");

        if !reply.is_success() {
            let message = provider_error_message(&reply.body, reply.reason.as_deref());
            return Err(LlmError::ProviderError {
                status: reply.status,
                message,
            });
        }

        let json: Value = serde_json::from_str(&reply.body).map_err(|e| {
            debug!(error = %e, "Success reply is not JSON");
            LlmError::EmptyResponse
        })?;

        let text = shape
            .extract_text(&json)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        let items = parse_quiz_items(text)?;
        debug!(items = items.len(), requested = params.count(), "Quiz parsed");
        Ok(items)
    }
}

/// Generate a quiz with a default client.
///
/// # Errors
/// See [`QuizClient::generate_quiz`].
pub async fn generate_quiz(
    config: &ConnectionConfig,
    params: &QuizRequestParams,
) -> Result<Vec<QuizItem>, LlmError> {
    QuizClient::new().generate_quiz(config, params).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mathgenie_core::Difficulty;

    use crate::provider::PreparedRequest;
    use crate::transport::TransportReply;

    /// Replies 200 with a fixed body and counts calls.
    struct CannedTransport {
        body: String,
        calls: AtomicUsize,
    }

    impl CannedTransport {
        fn new(body: impl Into<String>) -> Self {
            Self {
                body: body.into(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Transport for CannedTransport {
        async fn send(&self, _request: &PreparedRequest) -> Result<TransportReply, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransportReply {
                status: 200,
                reason: Some("OK".into()),
                body: self.body.clone(),
            })
        }
    }

    fn params() -> QuizRequestParams {
        QuizRequestParams::new(["geometry"], Difficulty::Intermediate, 1).expect("params")
    }

    #[tokio::test]
    async fn blank_key_short_circuits() {
        let client = QuizClient::with_transport(CannedTransport::new("{}"));
        let config = ConnectionConfig::new("https://api.openai.com/v1", "   ", "gpt-4o");

        let err = client.generate_quiz(&config, &params()).await.expect_err("no key");
        assert!(matches!(err, LlmError::MissingCredential));
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_json_success_body_is_empty_response() {
        let client = QuizClient::with_transport(CannedTransport::new("<html></html>"));
        let config = ConnectionConfig::new("https://api.openai.com/v1", "sk", "gpt-4o");

        let err = client.generate_quiz(&config, &params()).await.expect_err("html");
        assert!(matches!(err, LlmError::EmptyResponse));
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn whitespace_text_is_empty_response() {
        let body = r#"{"choices":[{"message":{"content":"   "}}]}"#;
        let client = QuizClient::with_transport(CannedTransport::new(body));
        let config = ConnectionConfig::new("https://api.openai.com/v1", "sk", "gpt-4o");

        let err = client.generate_quiz(&config, &params()).await.expect_err("blank");
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
