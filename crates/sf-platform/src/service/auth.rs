//! Session Lifecycle
//!
//! Login issues a short-lived access JWT plus an opaque refresh token; each
//! user holds at most one live refresh token, and every refresh rotates it.

use chrono::{DateTime, Utc};

use crate::domain::{LoginRequest, User};
use crate::error::{Result, ServiceError};
use crate::repository::{RefreshTokenRepository, UserRepository};
use crate::service::password::verify_password;
use crate::service::token::{generate_opaque_token, TokenService};

/// Token pair handed to the transport layer, which sets the cookie.
#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    refresh_tokens: RefreshTokenRepository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        refresh_tokens: RefreshTokenRepository,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            tokens,
        }
    }

    /// Unknown email and wrong password produce the same error, so the
    /// endpoint cannot be used to probe registered addresses.
    pub async fn login(&self, request: &LoginRequest) -> Result<(User, SessionTokens)> {
        let user = self
            .users
            .get_by_email(&request.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;
        if !verify_password(&request.password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }
        if !user.is_verified {
            return Err(ServiceError::EmailNotConfirmed);
        }
        let session = self.issue_session(user.id).await?;
        Ok((user, session))
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        self.refresh_tokens.delete(refresh_token).await
    }

    pub async fn me(&self, user_id: i64) -> Result<User> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotRegistered)
    }

    /// Rotates the refresh token and issues a fresh access token. An expired
    /// stored token is deleted on sight.
    pub async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens> {
        let stored = self
            .refresh_tokens
            .find(refresh_token)
            .await?
            .ok_or(ServiceError::RefreshTokenInvalid)?;
        if stored.is_expired(Utc::now()) {
            self.refresh_tokens.delete(refresh_token).await?;
            return Err(ServiceError::RefreshTokenExpired);
        }
        self.issue_session(stored.user_id).await
    }

    async fn issue_session(&self, user_id: i64) -> Result<SessionTokens> {
        let access_token = self.tokens.issue_access(user_id)?;
        let refresh_token = generate_opaque_token();
        let refresh_expires_at = self.tokens.refresh_expiry();
        self.refresh_tokens
            .replace(user_id, &refresh_token, refresh_expires_at)
            .await?;
        Ok(SessionTokens {
            access_token,
            refresh_token,
            refresh_expires_at,
        })
    }
}
