//! Authentication session models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before the real expiry at which a session is treated as expired.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier (the `user_id` column of `favorites`).
    pub id: String,

    /// Email address, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for data requests.
    pub access_token: String,

    /// Token type, normally "bearer".
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: i64,

    /// Unix timestamp at which the access token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    /// Token used to obtain a new session.
    pub refresh_token: String,

    /// The user the session belongs to.
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fills in `expires_at` from `expires_in` when the provider omitted it.
    pub fn with_expiry_from(mut self, issued_at: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some((issued_at + Duration::seconds(self.expires_in)).timestamp());
        }
        self
    }

    /// Returns true if the access token is expired (or about to be) at `now`.
    ///
    /// Sessions without a known expiry are never considered expired; the
    /// backend will reject them if they are.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|at| now.timestamp() + EXPIRY_LEEWAY_SECS >= at)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}
