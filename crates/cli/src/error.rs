//! CLI error types.

use std::fmt;

use error_stack::Report;
use inkybay_common::error::InkyBayError;

#[derive(Debug)]
pub enum CliError {
    /// Settings could not be loaded or validated
    Config(String),
    /// The request could not be signed or assembled
    Signing(String),
    /// Malformed JSON input or output
    Json(String),
    /// Transport failure talking to InkyBay
    Http(String),
    /// InkyBay answered with a non-2xx status
    Upstream(u16),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Signing(msg) => write!(f, "Signing error: {}", msg),
            CliError::Json(msg) => write!(f, "JSON error: {}", msg),
            CliError::Http(msg) => write!(f, "HTTP error: {}", msg),
            CliError::Upstream(status) => write!(f, "InkyBay returned HTTP {}", status),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

impl From<ureq::Error> for CliError {
    fn from(err: ureq::Error) -> Self {
        CliError::Http(err.to_string())
    }
}

impl From<Report<InkyBayError>> for CliError {
    fn from(report: Report<InkyBayError>) -> Self {
        match report.current_context() {
            InkyBayError::Configuration { .. } => CliError::Config(format!("{:?}", report)),
            InkyBayError::Upstream { .. } => {
                CliError::Http(report.current_context().to_string())
            }
            InkyBayError::InvalidOperation { .. } | InkyBayError::InvalidRequest { .. } => {
                CliError::Signing(report.current_context().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        assert_eq!(
            format!("{}", CliError::Config("test".into())),
            "Configuration error: test"
        );
        assert_eq!(
            format!("{}", CliError::Signing("test".into())),
            "Signing error: test"
        );
        assert_eq!(
            format!("{}", CliError::Json("test".into())),
            "JSON error: test"
        );
        assert_eq!(
            format!("{}", CliError::Http("test".into())),
            "HTTP error: test"
        );
        assert_eq!(
            format!("{}", CliError::Upstream(403)),
            "InkyBay returned HTTP 403"
        );
    }

    #[test]
    fn test_upstream_maps_to_http() {
        let report = Report::new(InkyBayError::Upstream {
            message: "response body exceeds 4 bytes (HTTP 200)".into(),
        });
        match CliError::from(report) {
            CliError::Http(msg) => assert_eq!(
                msg,
                "Upstream error: response body exceeds 4 bytes (HTTP 200)"
            ),
            other => panic!("Expected Http variant, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_operation_maps_to_signing() {
        let report = Report::new(InkyBayError::InvalidOperation {
            operation: "delete".into(),
        });
        match CliError::from(report) {
            CliError::Signing(msg) => assert_eq!(msg, "Invalid operation: delete"),
            other => panic!("Expected Signing variant, got {other:?}"),
        }
    }

    #[test]
    fn test_configuration_maps_to_config() {
        let report = Report::new(InkyBayError::Configuration {
            message: "bad base url".into(),
        });
        assert!(matches!(CliError::from(report), CliError::Config(_)));
    }
}
