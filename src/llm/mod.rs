//! Chat-completion client for review generation.
//!
//! Talks to Groq's OpenAI-compatible API. One operation matters: turn a
//! pull request diff into review prose.

mod client;
mod error;

pub use client::GroqClient;
pub use error::LlmError;
