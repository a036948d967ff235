//! Relaying upstream replies back to the caller.
//!
//! The status passes through unchanged. The body is parsed as JSON when it
//! can be and wrapped as `{"raw": <text>}` when it cannot. Bodies that are not
//! valid UTF-8 are decoded lossily rather than rejected.

use std::io::Read;

use error_stack::{Report, ResultExt};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::InkyBayError;

/// Largest upstream body that will be buffered for relaying.
pub const MAX_RESPONSE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayedResponse {
    pub status: u16,
    pub body: Value,
}

impl RelayedResponse {
    #[must_use]
    pub fn from_parts(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|e| {
            log::debug!("upstream body is not JSON ({}), relaying raw text", e);
            json!({ "raw": text })
        });
        Self { status, body }
    }

    /// Buffer at most `limit` bytes of `reader` and relay them under `status`.
    ///
    /// # Errors
    ///
    /// Returns [`InkyBayError::Upstream`] if reading fails or the body is
    /// larger than `limit`.
    pub fn read_from(
        status: u16,
        reader: impl Read,
        limit: u64,
    ) -> Result<Self, Report<InkyBayError>> {
        let mut bytes = Vec::new();
        reader
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .change_context(InkyBayError::Upstream {
                message: format!("failed to read response body (HTTP {status})"),
            })?;

        if bytes.len() as u64 > limit {
            return Err(Report::new(InkyBayError::Upstream {
                message: format!("response body exceeds {limit} bytes (HTTP {status})"),
            }));
        }

        Ok(Self::from_parts(status, &String::from_utf8_lossy(&bytes)))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
