//! Retry logic for HTTP requests with exponential backoff.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;

use crate::error::{ApiError, Error, Result};

/// Default initial backoff duration for retries (1 second).
pub(crate) const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

/// Default maximum backoff duration for retries (30 seconds).
pub(crate) const DEFAULT_MAX_BACKOFF_SECS: u64 = 30;

/// Default maximum number of retry attempts.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for retry behavior.
#[derive(Clone, Debug)]
pub(crate) struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial backoff duration for retries.
    pub initial_backoff: Duration,
    /// Maximum backoff duration for retries.
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}

impl RetryConfig {
    /// Calculates the backoff duration for a retry attempt.
    ///
    /// A `retry_after` value from a 429 response wins over the exponential
    /// schedule (initial * 2^attempt). Both are capped at `max_backoff`.
    pub fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let max_backoff_secs = self.max_backoff.as_secs();
        if let Some(secs) = retry_after {
            Duration::from_secs(secs.min(max_backoff_secs))
        } else {
            let initial_secs = self.initial_backoff.as_secs();
            let backoff_secs = initial_secs.saturating_mul(1u64 << attempt.min(63));
            Duration::from_secs(backoff_secs.min(max_backoff_secs))
        }
    }
}

/// Decision type for retry logic.
pub(crate) enum RetryDecision<T> {
    /// Request succeeded with this value.
    Success(T),
    /// Request should be retried.
    Retry { retry_after: Option<u64> },
}

/// Error payloads returned by the backend.
///
/// PostgREST answers `{code, message, details, hint}`; the identity provider
/// answers either `{error, error_description}` or `{error_code, msg}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl ErrorBody {
    fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// The most descriptive message the body carries.
    fn message(&self) -> Option<String> {
        let primary = self
            .message
            .as_ref()
            .or(self.msg.as_ref())
            .or(self.error_description.as_ref())
            .or(self.error.as_ref())?;

        Some(match &self.details {
            Some(details) if !details.is_empty() => format!("{} ({})", primary, details),
            _ => primary.clone(),
        })
    }

    /// True for identity-provider errors that mean "wrong credentials".
    fn is_credentials_error(&self) -> bool {
        matches!(
            self.error_code.as_deref().or(self.error.as_deref()),
            Some("invalid_grant" | "invalid_credentials" | "bad_jwt" | "session_not_found")
        )
    }
}

fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// Handles the HTTP response, returning a retry decision or error.
pub(crate) async fn handle_response_with_retry<T: DeserializeOwned>(
    response: reqwest::Response,
    attempt: u32,
    max_retries: u32,
) -> Result<RetryDecision<T>> {
    let status = response.status();

    if status.is_success() {
        let body = response.json::<T>().await?;
        return Ok(RetryDecision::Success(body));
    }

    if status.as_u16() == 429 && attempt < max_retries {
        let retry_after = retry_after_secs(&response);
        return Ok(RetryDecision::Retry { retry_after });
    }

    Err(parse_error_response(response).await)
}

/// Handles responses without a meaningful body (DELETE, `return=minimal` inserts).
pub(crate) async fn handle_empty_response_with_retry(
    response: reqwest::Response,
    attempt: u32,
    max_retries: u32,
) -> Result<RetryDecision<()>> {
    let status = response.status();

    if status.is_success() {
        return Ok(RetryDecision::Success(()));
    }

    if status.as_u16() == 429 && attempt < max_retries {
        let retry_after = retry_after_secs(&response);
        return Ok(RetryDecision::Retry { retry_after });
    }

    Err(parse_error_response(response).await)
}

/// Parses an error response into our error types.
pub(crate) async fn parse_error_response(response: reqwest::Response) -> Error {
    let status = response.status();
    let status_code = status.as_u16();
    let retry_after = retry_after_secs(&response);
    let path = response.url().path().to_string();

    let text = response.text().await.unwrap_or_default();
    let body = ErrorBody::parse(&text);
    let message = body.message().unwrap_or(text);

    let or_default = |message: String, default: &str| {
        if message.is_empty() {
            default.to_string()
        } else {
            message
        }
    };

    let api_error = match status_code {
        401 | 403 => ApiError::Auth {
            message: or_default(message, "Authentication failed"),
        },
        400 if body.is_credentials_error() => ApiError::Auth {
            message: or_default(message, "Invalid login credentials"),
        },
        404 => ApiError::NotFound {
            resource: "resource".to_string(),
            id: path,
        },
        409 => ApiError::Conflict {
            message: or_default(message, "Row already exists"),
        },
        429 => ApiError::RateLimit { retry_after },
        400 | 422 => ApiError::Validation {
            field: None,
            message: or_default(message, "Bad request"),
        },
        _ => ApiError::Http {
            status: status_code,
            message: or_default(
                message,
                status.canonical_reason().unwrap_or("Unknown error"),
            ),
        },
    };

    Error::Api(api_error)
}

/// Executes a request with retry logic.
pub(crate) async fn execute_with_retry<T, F, Fut>(
    config: &RetryConfig,
    mut make_request: F,
) -> Result<T>
where
    T: DeserializeOwned,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response>>,
{
    for attempt in 0..=config.max_retries {
        let response = make_request().await?;

        match handle_response_with_retry(response, attempt, config.max_retries).await? {
            RetryDecision::Success(value) => return Ok(value),
            RetryDecision::Retry { retry_after } => {
                let backoff = config.calculate_backoff(attempt, retry_after);
                tracing::debug!(attempt, ?backoff, "rate limited, retrying");
                sleep(backoff).await;
            }
        }
    }

    Err(Error::Api(ApiError::RateLimit { retry_after: None }))
}

/// Executes a request that returns an empty response with retry logic.
pub(crate) async fn execute_empty_with_retry<F, Fut>(
    config: &RetryConfig,
    mut make_request: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response>>,
{
    for attempt in 0..=config.max_retries {
        let response = make_request().await?;

        match handle_empty_response_with_retry(response, attempt, config.max_retries).await? {
            RetryDecision::Success(()) => return Ok(()),
            RetryDecision::Retry { retry_after } => {
                let backoff = config.calculate_backoff(attempt, retry_after);
                tracing::debug!(attempt, ?backoff, "rate limited, retrying");
                sleep(backoff).await;
            }
        }
    }

    Err(Error::Api(ApiError::RateLimit { retry_after: None }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_postgrest_message_with_details() {
        let body = ErrorBody::parse(
            r#"{"code":"23505","details":"Key (user_id, event_id) already exists.","hint":null,"message":"duplicate key value violates unique constraint"}"#,
        );
        assert_eq!(
            body.message().as_deref(),
            Some("duplicate key value violates unique constraint (Key (user_id, event_id) already exists.)")
        );
        assert!(!body.is_credentials_error());
    }

    #[test]
    fn test_error_body_gotrue_legacy_shape() {
        let body = ErrorBody::parse(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(body.message().as_deref(), Some("Invalid login credentials"));
        assert!(body.is_credentials_error());
    }

    #[test]
    fn test_error_body_gotrue_current_shape() {
        let body = ErrorBody::parse(
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        assert_eq!(body.message().as_deref(), Some("Invalid login credentials"));
        assert!(body.is_credentials_error());
    }

    #[test]
    fn test_error_body_not_json() {
        let body = ErrorBody::parse("upstream connect error");
        assert!(body.message().is_none());
    }
}
