//! Error types for InkyBay request signing and relay.
//!
//! Fallible functions in this crate return `Result<T, Report<InkyBayError>>`
//! so callers get the full context chain when something fails.

use derive_more::{Display, Error};
use http::StatusCode;

#[derive(Debug, Display, Error)]
pub enum InkyBayError {
    /// The requested upstream operation is not on the allow-list.
    #[display("Invalid operation: {operation}")]
    InvalidOperation { operation: String },

    /// Settings are missing, malformed, or fail validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// An outbound request could not be assembled.
    #[display("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The upstream reply could not be relayed.
    #[display("Upstream error: {message}")]
    Upstream { message: String },
}

/// Maps an error onto what a calling route handler sends back.
pub trait IntoHttpResponse {
    fn status_code(&self) -> StatusCode;

    fn user_message(&self) -> String;
}

impl IntoHttpResponse for InkyBayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidOperation { .. } | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn user_message(&self) -> String {
        match self {
            // Configuration details can name secrets or file paths.
            Self::Configuration { .. } => "Server configuration error".to_string(),
            other => other.to_string(),
        }
    }
}
