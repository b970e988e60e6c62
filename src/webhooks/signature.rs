//! Webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs each delivery with a shared secret and sends the result in
//! the `X-Hub-Signature-256` header as `sha256=<hex>`. Verification runs
//! against the raw request body, before anything parses it.
//!
//! An empty secret disables verification entirely: deployments that have
//! not configured `GITHUB_WEBHOOK_SECRET` accept every delivery.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Parses an `X-Hub-Signature-256` value (e.g. "sha256=abc123...") into raw
/// signature bytes.
///
/// Returns `None` for anything malformed: missing prefix, wrong algorithm,
/// invalid hex. Never panics.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA256 signature of a payload under the given secret.
///
/// Used by tests to produce valid deliveries.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Renders a signature the way GitHub sends it: `sha256=<hex>`.
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Verifies a webhook delivery against the shared secret.
///
/// Returns `true` when `secret` is empty (verification disabled).
/// Otherwise returns `true` only if `signature_header` carries the
/// HMAC-SHA256 of `payload` under `secret`. The comparison is constant-time
/// via the HMAC library. Total over its inputs; never panics.
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &str) -> bool {
    if secret.is_empty() {
        return true;
    }

    let Some(claimed) = parse_signature_header(signature_header) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&claimed).is_ok()
}
