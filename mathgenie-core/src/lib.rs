//! # MathGenie Core Library
//!
//! Provider-agnostic building blocks for LLM-generated math quizzes:
//!
//! - **Types** — [`Difficulty`], the topic catalogue, validated
//!   [`QuizRequestParams`] and the [`QuizItem`]s a model returns.
//! - **Config** — the user's [`ConnectionConfig`] and the process-level
//!   [`AppConfig`] loaded from TOML.
//! - **Settings** — a [`SettingsStore`] that persists the connection config
//!   between runs. Only front ends touch it; the quiz client takes the
//!   config as an explicit argument.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod settings;
pub mod types;

pub use config::{AppConfig, ConnectionConfig};
pub use error::GenieError;
pub use settings::{SettingsStore, SqliteSettingsStore};
pub use types::*;
