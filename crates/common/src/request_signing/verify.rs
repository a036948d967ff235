//! Receiving-side verification of InkyBay request signatures.
//!
//! Mirrors what the upstream does on its end. No freshness window is applied
//! here; replay bounds are the verifier's policy, not the signer's.

use base64::{engine::general_purpose, Engine};
use hmac::Mac;

use crate::constants::{HEADER_AUTH_TIME, HEADER_SIGNATURE};
use crate::request_signing::signing::{body_digest, canonical_string, new_mac};

/// Check `signature_b64` against the canonical string rebuilt from the parts.
///
/// Malformed base64 verifies as `false`. The MAC comparison is constant-time.
#[must_use]
pub fn verify_signature(
    secret: &[u8],
    path_and_query: &str,
    auth_time: u64,
    body: &[u8],
    signature_b64: &str,
) -> bool {
    let Ok(signature) = general_purpose::STANDARD.decode(signature_b64) else {
        return false;
    };
    let Ok(mut mac) = new_mac(secret) else {
        return false;
    };

    let canonical = canonical_string(path_and_query, auth_time, &body_digest(body));
    mac.update(canonical.as_bytes());
    mac.verify_slice(&signature).is_ok()
}

/// Verify a complete signed request as it would arrive upstream.
///
/// Missing or unparsable `authTime` / `signature` headers fail verification.
#[must_use]
pub fn verify_http_request(secret: &[u8], request: &http::Request<Vec<u8>>) -> bool {
    let Some(auth_time) = request
        .headers()
        .get(HEADER_AUTH_TIME)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
    else {
        return false;
    };
    let Some(signature) = request
        .headers()
        .get(HEADER_SIGNATURE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());

    verify_signature(secret, path_and_query, auth_time, request.body(), signature)
}
