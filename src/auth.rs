// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session token lifecycle against the controller's no-auth login endpoint.
//!
//! A [`TokenManager`] holds at most one [`SessionToken`]. The token is
//! replaced, never mutated, when it comes within the refresh buffer of its
//! expiry. The check-and-refresh sequence runs under an async mutex, so
//! concurrent callers wait for a single in-flight login and then share its
//! result.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::BridgeConfig;
use crate::error::{Error, Result};

/// Path of the login endpoint that issues tokens without credentials.
pub const LOGIN_PATH: &str = "/api/auth/noauth";

/// An opaque bearer token and its absolute expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Creates a token valid for `lifetime` from `issued_at`.
    #[must_use]
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let lifetime = i64::try_from(lifetime.as_secs())
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            token: token.into(),
            expires_at: issued_at
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Returns the bearer string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the absolute expiry.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns whether the token may still be used at `now`.
    ///
    /// A token is unusable once `now >= expires_at - buffer`.
    #[must_use]
    pub fn is_usable_at(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        let buffer = TimeDelta::from_std(buffer).unwrap_or(TimeDelta::MAX);
        match self.expires_at.checked_sub_signed(buffer) {
            Some(deadline) => now < deadline,
            None => false,
        }
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "token")]
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Owner of the process-wide session token.
///
/// Share one instance (behind an `Arc`) between every component that talks
/// to the controller.
#[derive(Debug)]
pub struct TokenManager {
    http: Client,
    login_url: String,
    refresh_buffer: Duration,
    default_lifetime: Duration,
    current: Mutex<Option<SessionToken>>,
}

impl TokenManager {
    /// Creates a token manager that logs in through `http`.
    #[must_use]
    pub fn new(http: Client, config: &BridgeConfig) -> Self {
        Self {
            http,
            login_url: format!("{}{LOGIN_PATH}", config.base_url()),
            refresh_buffer: config.refresh_buffer(),
            default_lifetime: config.default_token_lifetime(),
            current: Mutex::new(None),
        }
    }

    /// Returns a usable bearer token, logging in first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the login request fails, the
    /// controller answers with a non-2xx status, or the reply carries no token.
    pub async fn token(&self) -> Result<String> {
        let mut current = self.current.lock().await;

        if let Some(token) = current.as_ref()
            && token.is_usable_at(Utc::now(), self.refresh_buffer)
        {
            return Ok(token.as_str().to_string());
        }

        let fresh = self.login().await?;
        let bearer = fresh.as_str().to_string();
        *current = Some(fresh);
        Ok(bearer)
    }

    /// Discards the held token so the next call logs in again.
    pub async fn invalidate(&self) {
        *self.current.lock().await = None;
    }

    /// Returns a copy of the held token, if any.
    pub async fn current(&self) -> Option<SessionToken> {
        self.current.lock().await.clone()
    }

    async fn login(&self) -> Result<SessionToken> {
        tracing::debug!(url = %self.login_url, "Requesting session token");

        let response = self
            .http
            .post(&self.login_url)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Login request failed");
                Error::Authentication {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Login rejected");
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {}): {body}", status.as_u16()),
            });
        }

        let reply: LoginResponse = response.json().await.map_err(|e| Error::Authentication {
            message: format!("malformed login response: {e}"),
        })?;

        let token = reply
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "login response carried no token".to_string(),
            })?;
        let lifetime = reply
            .expires_in
            .map_or(self.default_lifetime, Duration::from_secs);

        tracing::info!(lifetime_secs = lifetime.as_secs(), "Obtained session token");

        Ok(SessionToken::new(token, Utc::now(), lifetime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUFFER: Duration = Duration::from_secs(300);

    fn issued() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn token_usable_well_before_expiry() {
        let token = SessionToken::new("t", issued(), Duration::from_secs(3600));
        assert!(token.is_usable_at(issued(), BUFFER));
        assert!(token.is_usable_at(issued() + TimeDelta::seconds(3299), BUFFER));
    }

    #[test]
    fn token_unusable_inside_refresh_buffer() {
        let token = SessionToken::new("t", issued(), Duration::from_secs(3600));
        assert!(!token.is_usable_at(issued() + TimeDelta::seconds(3300), BUFFER));
        assert!(!token.is_usable_at(issued() + TimeDelta::seconds(3600), BUFFER));
    }

    #[test]
    fn short_lived_token_is_never_usable() {
        let token = SessionToken::new("t", issued(), Duration::from_secs(120));
        assert!(!token.is_usable_at(issued(), BUFFER));
    }

    #[test]
    fn token_expiry_is_absolute() {
        let token = SessionToken::new("t", issued(), Duration::from_secs(60));
        assert_eq!(token.expires_at(), issued() + TimeDelta::seconds(60));
    }

    #[test]
    fn huge_lifetime_saturates() {
        let token = SessionToken::new("t", issued(), Duration::from_secs(u64::MAX));
        assert_eq!(token.expires_at(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn debug_redacts_bearer() {
        let token = SessionToken::new("secret-value", issued(), Duration::from_secs(60));
        assert!(!format!("{token:?}").contains("secret-value"));
    }

    #[test]
    fn login_response_accepts_token_alias() {
        let reply: LoginResponse =
            serde_json::from_str(r#"{"token": "abc", "expires_in": 60}"#).unwrap();
        assert_eq!(reply.access_token.as_deref(), Some("abc"));
        assert_eq!(reply.expires_in, Some(60));
    }
}
