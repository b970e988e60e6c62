//! Core domain types for the review bot.
//!
//! Newtype wrappers keep a PR number from being confused with any other
//! integer and keep repository naming (`owner/repo`) in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pull request number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrNumber(pub u64);

impl fmt::Display for PrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for PrNumber {
    fn from(n: u64) -> Self {
        PrNumber(n)
    }
}

/// A repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Splits a webhook `full_name` (e.g. "octocat/hello-world") into owner
    /// and repository.
    ///
    /// Returns `None` when either side of the `/` is missing or empty.
    pub fn parse_full_name(full_name: &str) -> Option<RepoId> {
        let (owner, repo) = full_name.split_once('/')?;
        if owner.is_empty() || repo.is_empty() {
            return None;
        }
        Some(RepoId::new(owner, repo))
    }

    /// Returns the `owner/repo` form used in GitHub API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
