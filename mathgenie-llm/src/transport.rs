//! HTTP transport seam.
//!
//! [`QuizClient`](crate::client::QuizClient) builds a [`PreparedRequest`]
//! and hands it to a [`Transport`]. Production code uses
//! [`ReqwestTransport`]; tests substitute an in-process fake.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::LlmError;
use crate::provider::PreparedRequest;

/// Raw outcome of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status, if known.
    pub reason: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl TransportReply {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one prepared POST and returns the reply, whatever its status.
///
/// Implementations return `Err` only when no HTTP response was obtained.
pub trait Transport: Send + Sync {
    /// Execute `request` exactly once.
    fn send(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<TransportReply, LlmError>> + Send;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Transport with the HTTP client's default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Transport with a whole-request timeout.
    ///
    /// # Errors
    /// Returns [`LlmError::RequestFailed`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Transport over a preconfigured `reqwest` client (proxies, TLS roots,
    /// default headers).
    #[must_use]
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<TransportReply, LlmError> {
        let mut builder = self.http.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.json(&request.body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(TransportReply {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let reply = |status| TransportReply {
            status,
            reason: None,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(301).is_success());
        assert!(!reply(401).is_success());
    }

    #[test]
    fn timeout_transport_builds() {
        assert!(ReqwestTransport::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
