//! Reqwest-backed GitHub client.
//!
//! The client holds the token and base URL from configuration; the base URL
//! is overridable so tests can stand up a local mock host. Outbound calls
//! rely on the transport's default timeouts.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;
use crate::types::{PrNumber, RepoId};

use super::error::GitHubApiError;

/// Media type for requesting a PR's unified diff.
const ACCEPT_DIFF: &str = "application/vnd.github.v3.diff";
/// Media type for regular REST responses.
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// How much of the diff to show in debug logs.
const DIFF_PREVIEW_LEN: usize = 500;
/// How much of an error response body to carry in the error.
const SNIPPET_LEN: usize = 200;

/// A GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base: String,
    token: String,
}

impl GitHubClient {
    /// Creates a client from configuration.
    pub fn new(config: &Config) -> GitHubClient {
        GitHubClient {
            http: reqwest::Client::new(),
            base: config.github_api_base.trim_end_matches('/').to_string(),
            token: config.github_token.clone(),
        }
    }

    /// Fetches the unified diff for a pull request.
    ///
    /// Issues `GET /repos/{owner}/{repo}/pulls/{number}` with the diff media
    /// type. The response body is returned unchanged; no size limit or
    /// truncation is applied.
    pub async fn fetch_diff(
        &self,
        repo: &RepoId,
        number: PrNumber,
    ) -> Result<String, GitHubApiError> {
        let url = self.pull_url(repo, number);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, ACCEPT_DIFF)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubApiError::Http {
                status,
                url,
                snippet: snippet(&body),
            });
        }

        let diff = response.text().await?;
        debug!(
            repo = %repo,
            pr = %number,
            diff_len = diff.len(),
            preview = %snippet_of(&diff, DIFF_PREVIEW_LEN),
            "fetched pull request diff"
        );
        Ok(diff)
    }

    /// Posts a comment on a pull request.
    ///
    /// PR conversation comments live on the issues endpoint, so this issues
    /// `POST /repos/{owner}/{repo}/issues/{number}/comments`. The response
    /// body is not inspected beyond the status check.
    pub async fn post_comment(
        &self,
        repo: &RepoId,
        number: PrNumber,
        body: &str,
    ) -> Result<(), GitHubApiError> {
        let url = self.comments_url(repo, number);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, ACCEPT_JSON)
            .json(&json!({ "body": body }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GitHubApiError::Http {
                status,
                url,
                snippet: snippet(&text),
            });
        }

        info!(repo = %repo, pr = %number, "posted review comment");
        Ok(())
    }

    fn pull_url(&self, repo: &RepoId, number: PrNumber) -> String {
        format!("{}/repos/{}/pulls/{}", self.base, repo.full_name(), number.0)
    }

    fn comments_url(&self, repo: &RepoId, number: PrNumber) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.base,
            repo.full_name(),
            number.0
        )
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

fn snippet(text: &str) -> String {
    snippet_of(text, SNIPPET_LEN)
}

/// Truncates `text` to at most `len` characters for logging.
fn snippet_of(text: &str, len: usize) -> String {
    if text.chars().count() <= len {
        text.to_string()
    } else {
        let head: String = text.chars().take(len).collect();
        format!("{}...", head)
    }
}
