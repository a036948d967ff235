//! HMAC-SHA256 signing of outbound InkyBay requests.
//!
//! The signed message is the canonical string
//!
//! ```text
//! POST
//! <path>[?<query>]
//! <authTime>
//! <sha256-hex(body)>
//! ```
//!
//! joined with `\n` and without a trailing newline. The upstream verifier
//! rebuilds the same string, so any change here breaks every call.

use std::fmt;

use base64::{engine::general_purpose, Engine};
use error_stack::{Report, ResultExt};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::{Digest, Sha256};
use url::Url;

use crate::constants::{SHOP_API_PATH, SIGNED_METHOD};
use crate::error::InkyBayError;
use crate::request_signing::clock::{Clock, SystemClock};
use crate::shop::Operation;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Everything a caller needs to attach to one outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedRequestEnvelope {
    pub url: String,
    pub auth_time: u64,
    pub signature: String,
}

/// Lowercase hex SHA-256 of the request body.
#[must_use]
pub fn body_digest(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Path of `url`, followed by `?query` when the URL carries a non-empty query.
#[must_use]
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    }
}

#[must_use]
pub fn canonical_string(path_and_query: &str, auth_time: u64, body_digest: &str) -> String {
    // The method is always POST, whatever verb the caller ends up using.
    [
        SIGNED_METHOD,
        path_and_query,
        &auth_time.to_string(),
        body_digest,
    ]
    .join("\n")
}

pub(crate) fn new_mac(secret: &[u8]) -> Result<HmacSha256, Report<InkyBayError>> {
    HmacSha256::new_from_slice(secret).map_err(|e| {
        Report::new(InkyBayError::Configuration {
            message: format!("Failed to initialize HMAC key: {}", e),
        })
    })
}

fn compute_signature(secret: &[u8], canonical: &str) -> Result<String, Report<InkyBayError>> {
    let mut mac = new_mac(secret)?;
    mac.update(canonical.as_bytes());
    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn parse_base_url(base_url: &str) -> Result<Url, Report<InkyBayError>> {
    let url = Url::parse(base_url).change_context(InkyBayError::Configuration {
        message: format!("Invalid InkyBay base URL: {}", base_url),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Report::new(InkyBayError::Configuration {
            message: format!("InkyBay base URL must use http or https, got {}", url.scheme()),
        }));
    }
    if url.host_str().is_none() {
        return Err(Report::new(InkyBayError::Configuration {
            message: format!("InkyBay base URL has no host: {}", base_url),
        }));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Report::new(InkyBayError::Configuration {
            message: format!(
                "InkyBay base URL must not carry a query or fragment: {}",
                base_url
            ),
        }));
    }

    Ok(url)
}

/// Signs requests for the InkyBay shop API with a shared HMAC secret.
///
/// The signer holds no mutable state and can be shared across threads.
pub struct RequestSigner<C = SystemClock> {
    base_url: Url,
    secret: Vec<u8>,
    clock: C,
}

impl RequestSigner<SystemClock> {
    /// Create a signer for the given origin, reading `authTime` from the wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL with a
    /// host and without query or fragment.
    pub fn new(base_url: &str, secret: impl Into<Vec<u8>>) -> Result<Self, Report<InkyBayError>> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            secret: secret.into(),
            clock: SystemClock,
        })
    }
}

impl<C: Clock> RequestSigner<C> {
    /// Replace the time source.
    pub fn with_clock<D: Clock>(self, clock: D) -> RequestSigner<D> {
        RequestSigner {
            base_url: self.base_url,
            secret: self.secret,
            clock,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Target URL for `operation`: `<base-url>/api/shop/<operation>.php`.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn endpoint_url(&self, operation: Operation) -> Result<Url, Report<InkyBayError>> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let raw = format!("{}/{}/{}.php", base, SHOP_API_PATH, operation);
        Url::parse(&raw).change_context(InkyBayError::Configuration {
            message: format!("Failed to build endpoint URL for {}", operation),
        })
    }

    /// Sign `body` for `operation` at the current time.
    ///
    /// The operation is validated before the clock is read.
    ///
    /// # Errors
    ///
    /// Returns [`InkyBayError::InvalidOperation`] if `operation` is not one of
    /// `search`, `history` or `info`.
    pub fn sign(
        &self,
        operation: &str,
        body: &[u8],
    ) -> Result<SignedRequestEnvelope, Report<InkyBayError>> {
        let operation: Operation = operation.parse()?;
        let auth_time = self.clock.now_unix_secs();
        self.sign_operation(operation, body, auth_time)
    }

    /// Sign `body` for `operation` at a caller-chosen `auth_time`.
    ///
    /// # Errors
    ///
    /// Returns [`InkyBayError::InvalidOperation`] if `operation` is not on the
    /// allow-list.
    pub fn sign_at(
        &self,
        operation: &str,
        body: &[u8],
        auth_time: u64,
    ) -> Result<SignedRequestEnvelope, Report<InkyBayError>> {
        let operation: Operation = operation.parse()?;
        self.sign_operation(operation, body, auth_time)
    }

    /// Sign an already-validated operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be built.
    pub fn sign_operation(
        &self,
        operation: Operation,
        body: &[u8],
        auth_time: u64,
    ) -> Result<SignedRequestEnvelope, Report<InkyBayError>> {
        let url = self.endpoint_url(operation)?;
        let canonical = canonical_string(&path_and_query(&url), auth_time, &body_digest(body));
        let signature = compute_signature(&self.secret, &canonical)?;

        Ok(SignedRequestEnvelope {
            url: url.to_string(),
            auth_time,
            signature,
        })
    }
}

impl<C> fmt::Debug for RequestSigner<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("base_url", &self.base_url.as_str())
            .field("secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// One-shot signing with the wall clock.
///
/// # Errors
///
/// Returns [`InkyBayError::InvalidOperation`] for operations outside the
/// allow-list, or a configuration error for a bad `base_url`.
pub fn sign(
    operation: &str,
    body: &[u8],
    secret: &[u8],
    base_url: &str,
) -> Result<SignedRequestEnvelope, Report<InkyBayError>> {
    RequestSigner::new(base_url, secret)?.sign(operation, body)
}
