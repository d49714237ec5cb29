//! Session operations against the hosted identity provider.
//!
//! Only the provider's documented password and refresh-token grants are used;
//! token issuance and validation are entirely the provider's business.

use chrono::Utc;
use serde::Serialize;

use crate::client::{EventsClient, AUTH_PATH};
use crate::error::{ApiError, Result};
use crate::models::{AuthUser, Session};

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

impl EventsClient {
    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] for wrong credentials.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let issued_at = Utc::now();
        let session: Session = self
            .post(
                &format!("{}/token", AUTH_PATH),
                &[("grant_type", "password")],
                &PasswordGrant { email, password },
            )
            .await?;
        tracing::debug!(user_id = %session.user.id, "signed in");
        Ok(session.with_expiry_from(issued_at))
    }

    /// Exchanges a refresh token for a new session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let issued_at = Utc::now();
        let session: Session = self
            .post(
                &format!("{}/token", AUTH_PATH),
                &[("grant_type", "refresh_token")],
                &RefreshGrant { refresh_token },
            )
            .await?;
        tracing::debug!(user_id = %session.user.id, "session refreshed");
        Ok(session.with_expiry_from(issued_at))
    }

    /// Returns the user the client's access token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the client has no access token or the
    /// provider rejects it.
    pub async fn get_user(&self) -> Result<AuthUser> {
        if self.access_token().is_none() {
            return Err(ApiError::Auth {
                message: "not signed in".to_string(),
            }
            .into());
        }
        let no_query: [(&str, &str); 0] = [];
        self.get(&format!("{}/user", AUTH_PATH), &no_query).await
    }

    /// Revokes the client's session at the provider.
    ///
    /// A client without an access token has nothing to revoke and succeeds.
    pub async fn sign_out(&self) -> Result<()> {
        if self.access_token().is_none() {
            return Ok(());
        }
        let no_query: [(&str, &str); 0] = [];
        let no_body = serde_json::json!({});
        self.post_no_content(&format!("{}/logout", AUTH_PATH), &no_query, &no_body)
            .await
    }
}
