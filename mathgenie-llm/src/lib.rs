//! # mathgenie-llm — LLM Quiz Client
//!
//! Builds a provider-specific request from a uniform
//! [`QuizRequestParams`](mathgenie_core::QuizRequestParams), sends it once,
//! and normalizes the model's free text into
//! [`QuizItem`](mathgenie_core::QuizItem)s.
//!
//! Supported providers:
//!   - **Gemini-style** (`generativelanguage.googleapis.com`)
//!   - **OpenAI-compatible** chat completions (OpenAI, Groq, DeepSeek, ...)
//!
//! ```text
//! ConnectionConfig + QuizRequestParams
//!        │
//!        ▼
//!   quiz_prompt ──► ProviderShape::classify ──► PreparedRequest
//!                                                   │ Transport (one POST)
//!                                                   ▼
//!   Vec<QuizItem> ◄── parse_quiz_items ◄── strip_code_fence ◄── extract_text
//! ```
//!
//! There are no retries, caches or background tasks; every failure is
//! returned to the caller as an [`LlmError`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod provider;
pub mod transport;

pub use client::{QuizClient, generate_quiz};
pub use error::LlmError;
pub use provider::{PreparedRequest, ProviderShape};
pub use transport::{ReqwestTransport, Transport, TransportReply};
