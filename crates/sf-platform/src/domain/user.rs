//! User and Refresh Token Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered account. Never hard-deleted in normal flow.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2id hash, never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Set once the mailed confirmation link is followed.
    pub is_verified: bool,
    /// True while the user holds an enterprise membership.
    pub is_member: bool,
    pub created_at: DateTime<Utc>,
}

/// Opaque refresh token bound to one user.
///
/// At most one live token per user; issuing a new one replaces the old.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Captcha response token from the frontend widget.
    pub captcha: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_refresh_token_expiry_boundary() {
        let now = Utc::now();
        let token = RefreshToken {
            id: 1,
            user_id: 1,
            token: "x".to_string(),
            expires_at: now,
        };
        // Valid strictly before the expiry instant, invalid at and after it.
        assert!(!token.is_expired(now - Duration::seconds(1)));
        assert!(token.is_expired(now));
        assert!(token.is_expired(now + Duration::seconds(1)));
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            email: "a@x.com".to_string(),
            password_hash: "secret-hash".to_string(),
            is_verified: true,
            is_member: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("isVerified"));
    }

    #[test]
    fn test_register_request_rejects_unknown_fields() {
        let json = r#"{"email":"a@x.com","password":"pw","captcha":"c","isAdmin":true}"#;
        assert!(serde_json::from_str::<RegisterRequest>(json).is_err());
    }
}
