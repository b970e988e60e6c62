//! GitHub REST API client.
//!
//! Two calls back the review pipeline: fetching a pull request's unified
//! diff and posting the finished review as an issue comment. Both go
//! through [`GitHubClient`]. Failures abort the pipeline; nothing retries.

mod client;
mod error;

pub use client::GitHubClient;
pub use error::GitHubApiError;
