//! Typed pull-request webhook events.
//!
//! Only the `pull_request` event matters to the bot; everything else is
//! dropped at parse time. The event carries just the fields the pipeline
//! needs to build API URLs.

use serde::Deserialize;

use crate::types::{PrNumber, RepoId};

/// Action performed on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrAction {
    /// PR was opened.
    Opened,
    /// PR head was updated (new commits pushed).
    Synchronize,
    /// PR was closed (merged or not).
    Closed,
    /// PR was reopened.
    Reopened,
    /// PR title, body, or base branch changed.
    Edited,
    /// Any other action GitHub may deliver (labeled, assigned, ...).
    #[serde(other)]
    Other,
}

impl PrAction {
    /// Whether this action should trigger a review.
    ///
    /// Reviews run when a PR is opened and on every subsequent push
    /// (`synchronize`). Nothing else schedules work.
    pub fn triggers_review(self) -> bool {
        matches!(self, PrAction::Opened | PrAction::Synchronize)
    }
}

/// A parsed `pull_request` webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// The repository the PR belongs to.
    pub repo: RepoId,

    /// The action that triggered this delivery.
    pub action: PrAction,

    /// The PR number.
    pub pr_number: PrNumber,
}
