//! Failure model for a smoke run.

use std::time::Duration;

use thiserror::Error;

/// Result type used across the harness crates.
pub type SmokeResult<T> = Result<T, SmokeError>;

/// Everything that can make a check (or the harness itself) fail.
///
/// Transport failures (`Connection`, `Timeout`, `Request`) are kept apart from
/// `UnexpectedStatus` so a dead service is never reported as a wrong answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmokeError {
    /// The service could not be reached (refused, reset, DNS).
    #[error("connection error: {0}")]
    Connection(String),

    /// No response arrived within the configured deadline.
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Any other transport failure (e.g. the body stream broke mid-read).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered, but not with an accepted status code.
    #[error("unexpected status code {actual} (expected {expected})")]
    UnexpectedStatus { expected: String, actual: u16 },

    /// The response (or a payload we built) did not have the expected shape.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SmokeError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedBody(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SmokeError::Connection(_) => "connection_error",
            SmokeError::Timeout(_) => "timeout",
            SmokeError::Request(_) => "request_error",
            SmokeError::UnexpectedStatus { .. } => "unexpected_status",
            SmokeError::MalformedBody(_) => "malformed_body",
            SmokeError::InvalidConfig(_) => "invalid_config",
        }
    }

    /// True when no HTTP response was observed at all.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SmokeError::Connection(_) | SmokeError::Timeout(_) | SmokeError::Request(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_distinct_from_status_mismatch() {
        assert!(SmokeError::connection("refused").is_transport());
        assert!(SmokeError::Timeout(Duration::from_secs(10)).is_transport());
        assert!(SmokeError::request("eof").is_transport());

        let status = SmokeError::UnexpectedStatus {
            expected: "200".to_string(),
            actual: 500,
        };
        assert!(!status.is_transport());
        assert_ne!(status.kind(), SmokeError::connection("refused").kind());
    }

    #[test]
    fn display_names_the_failure_kind() {
        assert_eq!(
            SmokeError::connection("tcp connect refused").to_string(),
            "connection error: tcp connect refused"
        );
        assert_eq!(
            SmokeError::Timeout(Duration::from_millis(1500)).to_string(),
            "request timed out after 1.5s"
        );
        assert_eq!(
            SmokeError::UnexpectedStatus {
                expected: "200 or 404".to_string(),
                actual: 500,
            }
            .to_string(),
            "unexpected status code 500 (expected 200 or 404)"
        );
    }
}
