#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generative-AI text provider abstraction and daily call generation.
//!
//! Supports Google Gemini and `OpenAI` via a common [`providers::TextProvider`]
//! trait, selected through the `AI_PROVIDER` / `AI_MODEL` environment
//! variables or auto-detected from available API keys. The
//! [`generator::CallGenerator`] trait is the capability seam the orchestrator
//! depends on, so core pipeline tests can run against deterministic stubs
//! instead of the live service.

pub mod generator;
pub mod progress;
pub mod providers;

use thiserror::Error;

/// Errors that can occur during AI generation.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error (API error body, quota, etc.).
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// The provider returned a response with no usable text.
    #[error("Empty completion from provider")]
    EmptyCompletion,

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
