//! Completion API error types.
//!
//! The response shape is accessed through fallible accessors, so a missing
//! `choices` entry or a choice without content is a typed error the caller
//! handles explicitly rather than a panic.

use thiserror::Error;

/// An error from the completion endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Non-success HTTP status from the API.
    #[error("completion API returned {status} for {url}: {snippet}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
        snippet: String,
    },

    /// The request never produced a response (connection, DNS, timeout).
    #[error("completion API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode completion response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried no choices.
    #[error("completion response contained no choices")]
    EmptyChoices,

    /// The first choice had no message content.
    #[error("completion response choice had no message content")]
    MissingContent,
}
