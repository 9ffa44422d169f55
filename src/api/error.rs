//! Submission error types

use std::fmt;

/// Errors that can occur when submitting the onboarding snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Non-2xx response. `message` is the body's `error` field when present,
    /// otherwise `Server error (<status>): <statusText>`.
    Server { status: u16, message: String },
    /// Request did not complete within the configured timeout
    Timeout { secs: u64 },
    /// Connection or transport failure
    Network { message: String },
    /// Snapshot could not be encoded as JSON
    Encode { message: String },
}

impl SubmissionError {
    /// Build a server error from a status code and raw response body
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let message = error_field(body)
            .unwrap_or_else(|| format!("Server error ({status}): {status_text}"));
        SubmissionError::Server { status, message }
    }

    pub fn timeout(secs: u64) -> Self {
        SubmissionError::Timeout { secs }
    }

    pub fn network(message: impl Into<String>) -> Self {
        SubmissionError::Network {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        SubmissionError::Encode {
            message: message.into(),
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the submitted data (4xx)
    pub fn is_client_rejection(&self) -> bool {
        matches!(self, SubmissionError::Server { status, .. } if (400..500).contains(status))
    }
}

/// `error` string from a JSON body like `{"error": "..."}`
fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Server { message, .. } => write!(f, "{message}"),
            SubmissionError::Timeout { secs } => {
                write!(f, "Submission timed out after {secs}s, please try again")
            }
            SubmissionError::Network { message } => write!(f, "Network error: {message}"),
            SubmissionError::Encode { message } => {
                write!(f, "Could not encode onboarding data: {message}")
            }
        }
    }
}

impl std::error::Error for SubmissionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_error_field() {
        let err = SubmissionError::from_response(
            422,
            "Unprocessable Entity",
            r#"{"error":"Company already registered"}"#,
        );
        assert_eq!(err.to_string(), "Company already registered");
        assert_eq!(err.status(), Some(422));
        assert!(err.is_client_rejection());
    }

    #[test]
    fn test_generic_message_for_non_json_body() {
        let err = SubmissionError::from_response(502, "Bad Gateway", "<html>upstream</html>");
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
        assert!(!err.is_client_rejection());
    }

    #[test]
    fn test_generic_message_when_error_not_a_string() {
        let err = SubmissionError::from_response(500, "Internal Server Error", r#"{"error":42}"#);
        assert_eq!(err.to_string(), "Server error (500): Internal Server Error");

        let err = SubmissionError::from_response(500, "Internal Server Error", r#"{"message":"x"}"#);
        assert_eq!(err.to_string(), "Server error (500): Internal Server Error");
    }

    #[test]
    fn test_display_other_variants() {
        assert_eq!(
            SubmissionError::timeout(30).to_string(),
            "Submission timed out after 30s, please try again"
        );
        assert_eq!(
            SubmissionError::network("connection refused").to_string(),
            "Network error: connection refused"
        );
        assert_eq!(SubmissionError::network("x").status(), None);
    }
}
