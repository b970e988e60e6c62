//! Webhook endpoint handler.
//!
//! Verifies the delivery signature against the raw body, parses the
//! payload, and fires the review pipeline for qualifying pull-request
//! events. The response never waits for the pipeline.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::review::spawn_review;
use crate::webhooks::{parse_webhook, verify_signature, ParseError};

/// Header carrying the GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header carrying the HMAC-SHA256 delivery signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Acknowledgment body returned for accepted deliveries.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    status: &'static str,
}

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature did not match the shared secret.
    #[error("invalid signature")]
    InvalidSignature,

    /// Payload was malformed or missing required fields.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST, body: JSON webhook payload
/// - Headers (an absent value is treated as empty, not rejected):
///   - `X-GitHub-Event`: event type (e.g. "pull_request")
///   - `X-Hub-Signature-256`: HMAC-SHA256 signature of the body
///
/// # Response
///
/// - 200 `{"status":"ok"}` once the delivery verifies and parses,
///   regardless of whether a review was scheduled
/// - 401 invalid signature (with a configured secret)
/// - 400 malformed payload
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookError> {
    let event_type = header_str(&headers, HEADER_EVENT);
    let signature = header_str(&headers, HEADER_SIGNATURE);

    // Verify against the raw bytes before anything parses them.
    if !verify_signature(&body, signature, state.webhook_secret()) {
        warn!(event_type, "rejected webhook delivery: invalid signature");
        return Err(WebhookError::InvalidSignature);
    }

    match parse_webhook(event_type, &body)? {
        Some(event) if event.action.triggers_review() => {
            info!(
                repo = %event.repo,
                pr = %event.pr_number,
                action = ?event.action,
                "scheduling review"
            );
            spawn_review(state, event);
        }
        Some(event) => {
            debug!(
                repo = %event.repo,
                pr = %event.pr_number,
                action = ?event.action,
                "ignoring pull request action"
            );
        }
        None => {
            debug!(event_type, "ignoring event type");
        }
    }

    Ok(Json(WebhookAck { status: "ok" }))
}

/// Returns a header value as a string; empty when absent or non-UTF-8.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("")
}
