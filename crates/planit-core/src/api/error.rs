use std::fmt;

use serde_json::Value;

/// Categories of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP 401: the session is missing, invalid, or expired
    Unauthorized,
    /// Any other non-2xx status
    HttpStatus,
    /// Request timed out
    Timeout,
    /// Could not reach the server
    Connect,
    /// Response body was not what we expected
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Connect => write!(f, "connect"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the API with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    /// One-line summary suitable for display
    pub message: String,
    /// The `error` string from a `{"error": ...}` body, if any
    pub server_error: Option<String>,
    /// Raw response body, if any
    pub body: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            server_error: None,
            body: None,
        }
    }

    /// Creates an error from a non-2xx response.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::HttpStatus
        };

        let server_error = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string));

        let message = match &server_error {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };

        Self {
            kind,
            status: Some(status),
            message,
            server_error,
            body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Connect, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// Classifies a transport-level reqwest failure.
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("Request timed out: {err}"))
        } else if err.is_decode() {
            Self::parse(format!("Failed to decode response: {err}"))
        } else {
            Self::connect(format!("Network error: {err}"))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_server_error() {
        let err = ApiError::http_status(409, r#"{"error": "User already exists"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.status, Some(409));
        assert_eq!(err.server_error.as_deref(), Some("User already exists"));
        assert_eq!(err.to_string(), "HTTP 409: User already exists");
    }

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::http_status(401, r#"{"error": "Invalid or expired token"}"#);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_non_json_body_kept_raw() {
        let err = ApiError::http_status(500, "<html>Traceback</html>");
        assert!(err.server_error.is_none());
        assert_eq!(err.body.as_deref(), Some("<html>Traceback</html>"));
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_empty_body_has_no_details() {
        let err = ApiError::http_status(404, "");
        assert!(err.body.is_none());
        assert_eq!(ApiErrorKind::Timeout.to_string(), "timeout");
    }
}
