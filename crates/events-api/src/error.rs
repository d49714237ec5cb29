//! Error types for the SP Events backend client.

use std::fmt;

/// Errors reported by the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// Authentication failure (bad credentials, expired or missing session).
    Auth { message: String },
    /// Rate limit exceeded.
    RateLimit { retry_after: Option<u64> },
    /// Resource not found.
    NotFound { resource: String, id: String },
    /// Request rejected by the backend's validation.
    Validation {
        field: Option<String>,
        message: String,
    },
    /// The row already exists (unique constraint violation).
    Conflict { message: String },
    /// Network/connection error.
    Network { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::Auth { message } => write!(f, "Auth error: {}", message),
            ApiError::RateLimit { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            ApiError::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            ApiError::Validation { field, message } => match field {
                Some(f_name) => write!(f, "Validation error on {}: {}", f_name, message),
                None => write!(f, "Validation error: {}", message),
            },
            ApiError::Conflict { message } => write!(f, "Conflict: {}", message),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns true if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimit { .. } | ApiError::Network { .. })
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Network { .. } => 3,
            ApiError::RateLimit { .. } => 4,
            _ => 2,
        }
    }
}

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend answered with an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request could not be sent or the response could not be read.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The query string could not be encoded.
    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// The client was configured with unusable values.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns the backend error if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the request failed because the session is not valid.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Api(ApiError::Auth { .. }))
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(e) => e.exit_code(),
            Error::Http(e) if e.is_connect() || e.is_timeout() => 3,
            Error::InvalidConfig(_) => 5,
            _ => 2,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_http() {
        let error = ApiError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP error 503: Service Unavailable");
    }

    #[test]
    fn test_api_error_display_rate_limit() {
        let error = ApiError::RateLimit {
            retry_after: Some(60),
        };
        assert_eq!(error.to_string(), "Rate limited, retry after 60 seconds");
        assert_eq!(
            ApiError::RateLimit { retry_after: None }.to_string(),
            "Rate limited"
        );
    }

    #[test]
    fn test_api_error_display_not_found() {
        let error = ApiError::NotFound {
            resource: "event".to_string(),
            id: "evt-1".to_string(),
        };
        assert_eq!(error.to_string(), "event not found: evt-1");
    }

    #[test]
    fn test_api_error_display_validation() {
        let error = ApiError::Validation {
            field: Some("event_id".to_string()),
            message: "invalid input syntax for type uuid".to_string(),
        };
        assert!(error.to_string().contains("event_id"));

        let error = ApiError::Validation {
            field: None,
            message: "Bad request".to_string(),
        };
        assert_eq!(error.to_string(), "Validation error: Bad request");
    }

    #[test]
    fn test_api_error_display_conflict() {
        let error = ApiError::Conflict {
            message: "duplicate key value".to_string(),
        };
        assert_eq!(error.to_string(), "Conflict: duplicate key value");
    }

    #[test]
    fn test_api_error_is_retryable() {
        assert!(ApiError::RateLimit { retry_after: Some(5) }.is_retryable());
        assert!(ApiError::Network {
            message: "Connection reset".to_string()
        }
        .is_retryable());
        assert!(!ApiError::Auth {
            message: "Invalid login credentials".to_string()
        }
        .is_retryable());
        assert!(!ApiError::Conflict {
            message: "duplicate".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_api_error_exit_codes() {
        assert_eq!(
            ApiError::Auth {
                message: "x".to_string()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            ApiError::Network {
                message: "Timeout".to_string()
            }
            .exit_code(),
            3
        );
        assert_eq!(ApiError::RateLimit { retry_after: None }.exit_code(), 4);
    }

    #[test]
    fn test_error_wraps_api_error() {
        let error: Error = ApiError::Auth {
            message: "JWT expired".to_string(),
        }
        .into();
        assert!(error.is_auth());
        assert!(error.as_api_error().is_some());
        assert_eq!(error.to_string(), "Auth error: JWT expired");
    }

    #[test]
    fn test_error_invalid_config_exit_code() {
        let error = Error::InvalidConfig("empty project URL".to_string());
        assert_eq!(error.exit_code(), 5);
        assert!(!error.is_auth());
    }
}
