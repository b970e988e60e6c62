//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Payload parsing into typed pull-request events

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{PrAction, PullRequestEvent};
pub use parser::{parse_webhook, ParseError};
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
