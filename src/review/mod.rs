//! The review pipeline: fetch diff, generate review, publish comment.
//!
//! The pipeline is strictly linear and terminal-on-failure: the first error
//! aborts the remaining stages with no compensation or retry. The webhook
//! handler fires the pipeline and never looks back, so failures are only
//! visible in the logs; the pull request simply receives no comment.
//!
//! Pipelines for different deliveries (including two rapid `synchronize`
//! events for the same PR) run concurrently with no mutual exclusion or
//! ordering guarantee.

use thiserror::Error;
use tracing::{error, info};

use crate::github::GitHubApiError;
use crate::llm::LlmError;
use crate::server::AppState;
use crate::webhooks::PullRequestEvent;

#[cfg(test)]
mod tests;

/// System instruction sent with every review request.
pub const REVIEW_PROMPT: &str = "\
You are a senior engineer. Review this GitHub pull request diff and provide:
1. Code quality feedback
2. Potential bugs
3. Security issues
4. Performance tips
5. Best practices

Be concise and constructive.";

/// Header line prepended to every published review comment.
const COMMENT_HEADER: &str = "### 🤖 AI Code Review";

/// An error that aborted the review pipeline.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The diff could not be fetched.
    #[error("failed to fetch diff: {0}")]
    FetchDiff(#[source] GitHubApiError),

    /// The completion endpoint failed or returned an unusable response.
    #[error("failed to generate review: {0}")]
    GenerateReview(#[from] LlmError),

    /// The review comment could not be posted.
    #[error("failed to post comment: {0}")]
    PostComment(#[source] GitHubApiError),
}

/// Formats the published comment body.
pub fn format_comment(review: &str) -> String {
    format!("{}\n\n{}", COMMENT_HEADER, review)
}

/// Runs the pipeline for one pull-request event.
///
/// Stages: fetch diff → generate review → post comment. Each value is
/// passed through unchanged to the next stage.
pub async fn run_review(state: &AppState, event: &PullRequestEvent) -> Result<(), ReviewError> {
    let diff = state
        .github()
        .fetch_diff(&event.repo, event.pr_number)
        .await
        .map_err(ReviewError::FetchDiff)?;

    info!(
        repo = %event.repo,
        pr = %event.pr_number,
        diff_len = diff.len(),
        "generating review"
    );

    let review = state.llm().complete(REVIEW_PROMPT, &diff).await?;

    state
        .github()
        .post_comment(&event.repo, event.pr_number, &format_comment(&review))
        .await
        .map_err(ReviewError::PostComment)?;

    info!(
        repo = %event.repo,
        pr = %event.pr_number,
        review_len = review.len(),
        "review published"
    );
    Ok(())
}

/// Schedules a review to run in the background.
///
/// The caller does not await the result. Failures are logged here and are
/// invisible to the webhook sender, whose response has already been sent.
/// There is no cancellation: once spawned, the pipeline runs to completion
/// or to its first error.
pub fn spawn_review(state: AppState, event: PullRequestEvent) {
    tokio::spawn(async move {
        if let Err(e) = run_review(&state, &event).await {
            error!(
                repo = %event.repo,
                pr = %event.pr_number,
                error = %e,
                "review pipeline failed"
            );
        }
    });
}
