//! GitHub webhook payload parser.
//!
//! The event type comes from the `X-GitHub-Event` header; the payload is
//! parsed according to that type. Event types the bot does not handle are
//! ignored rather than rejected, so GitHub can deliver whatever it likes.
//!
//! Required fields for `pull_request` payloads: `action`,
//! `pull_request.number`, `pull_request._links.diff.href`, and
//! `repository.full_name`. A payload missing any of them is malformed.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{PrNumber, RepoId};

use super::events::{PrAction, PullRequestEvent};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field has an invalid value.
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses a webhook payload into a typed event.
///
/// # Arguments
///
/// * `event_type` - The value of the `X-GitHub-Event` header
/// * `payload` - The raw JSON payload bytes
///
/// # Returns
///
/// * `Ok(Some(event))` - A well-formed `pull_request` payload
/// * `Ok(None)` - Any other event type (ignored, not an error)
/// * `Err(e)` - Malformed payload or missing required fields
pub fn parse_webhook(
    event_type: &str,
    payload: &[u8],
) -> Result<Option<PullRequestEvent>, ParseError> {
    match event_type {
        "pull_request" => parse_pull_request(payload).map(Some),
        _ => {
            // The body must still be valid JSON even when the event type is
            // ignored.
            let _: serde_json::Value = serde_json::from_slice(payload)?;
            Ok(None)
        }
    }
}

// Raw payload structures matching GitHub's webhook JSON. Required fields are
// non-optional so a missing field fails deserialization up front.

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: PrAction,
    pull_request: RawPullRequest,
    repository: RawRepository,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    #[serde(rename = "_links")]
    links: RawLinks,
}

#[derive(Debug, Deserialize)]
struct RawLinks {
    diff: RawHref,
}

#[derive(Debug, Deserialize)]
struct RawHref {
    href: String,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    full_name: String,
}

fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    let repo = RepoId::parse_full_name(&raw.repository.full_name).ok_or_else(|| {
        ParseError::InvalidField {
            field: "repository.full_name",
            value: raw.repository.full_name.clone(),
        }
    })?;

    // The payload advertises a diff URL, but the fetcher always recomputes
    // it from the repository and PR number.
    debug!(
        advertised_diff_url = %raw.pull_request.links.diff.href,
        "ignoring advertised diff URL"
    );

    Ok(PullRequestEvent {
        repo,
        action: raw.action,
        pr_number: PrNumber(raw.pull_request.number),
    })
}
