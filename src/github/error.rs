//! GitHub API error types.

use thiserror::Error;

/// An error from a GitHub API call.
///
/// The pipeline aborts on the first failure and nothing retries, so there
/// is no transient/permanent categorization.
#[derive(Debug, Error)]
pub enum GitHubApiError {
    /// The API answered with a non-success status.
    #[error("GitHub API returned {status} for {url}: {snippet}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
        snippet: String,
    },

    /// The request never produced a response (connection, DNS, timeout).
    #[error("GitHub API transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
