//! Token Issuance and Validation
//!
//! Two token families:
//!
//! - Signed HS256 JWTs: short-lived access tokens (also used as email
//!   confirmation links) and join-by-email invitations. Each carries a
//!   `type` claim so one family can never stand in for the other.
//! - Opaque random strings: refresh tokens and invite tokens, meaningful
//!   only through server-side storage.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{Result, ServiceError};

const TYPE_ACCESS: &str = "access";
const TYPE_JOIN: &str = "join";

/// Entropy of opaque refresh / invite tokens, in bytes.
const OPAQUE_TOKEN_BYTES: usize = 48;

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    iat: i64,
    exp: i64,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinClaims {
    pub enterprise_id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
            config,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_secs;
        validation
    }

    pub fn issue_access(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.config.access_token_expiry_mins)).timestamp(),
            kind: TYPE_ACCESS.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ServiceError::internal(format!("token encoding failed: {e}")))
    }

    /// Returns the user id the token was issued for.
    pub fn verify_access(&self, token: &str) -> Result<i64> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::AccessTokenExpired,
                ErrorKind::InvalidSignature => ServiceError::AccessTokenInvalid,
                _ => ServiceError::AccessTokenMalformed,
            },
        )?;
        if data.claims.kind != TYPE_ACCESS {
            return Err(ServiceError::AccessTokenInvalid);
        }
        data.claims
            .sub
            .parse()
            .map_err(|_| ServiceError::AccessTokenMalformed)
    }

    pub fn issue_join(&self, enterprise_id: i64, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = JoinClaims {
            enterprise_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.join_token_expiry_hours)).timestamp(),
            kind: TYPE_JOIN.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ServiceError::internal(format!("token encoding failed: {e}")))
    }

    pub fn verify_join(&self, token: &str) -> Result<JoinClaims> {
        let data =
            decode::<JoinClaims>(token, &self.decoding, &self.validation()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => ServiceError::JoinTokenExpired,
                    _ => ServiceError::JoinTokenInvalid,
                }
            })?;
        if data.claims.kind != TYPE_JOIN {
            return Err(ServiceError::JoinTokenInvalid);
        }
        Ok(data.claims)
    }

    pub fn access_expiry_secs(&self) -> i64 {
        self.config.access_token_expiry_mins * 60
    }

    pub fn refresh_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::days(self.config.refresh_token_expiry_days)
    }
}

/// URL-safe random token for refresh tokens and invite tokens.
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_access_token_roundtrip() {
        let svc = service();
        let token = svc.issue_access(42).unwrap();
        assert_eq!(svc.verify_access(&token).unwrap(), 42);
    }

    #[test]
    fn test_expired_access_token() {
        let svc = TokenService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            access_token_expiry_mins: -5,
            leeway_secs: 0,
            ..AuthConfig::default()
        });
        let token = svc.issue_access(42).unwrap();
        assert!(matches!(
            svc.verify_access(&token),
            Err(ServiceError::AccessTokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid_not_malformed() {
        let token = service().issue_access(42).unwrap();
        let other = TokenService::new(AuthConfig {
            secret_key: "other-secret".to_string(),
            ..AuthConfig::default()
        });
        assert!(matches!(
            other.verify_access(&token),
            Err(ServiceError::AccessTokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert!(matches!(
            service().verify_access("not.a.jwt"),
            Err(ServiceError::AccessTokenMalformed)
        ));
    }

    #[test]
    fn test_join_token_roundtrip() {
        let svc = service();
        let token = svc.issue_join(7, "worker@example.com").unwrap();
        let claims = svc.verify_join(&token).unwrap();
        assert_eq!(claims.enterprise_id, 7);
        assert_eq!(claims.email, "worker@example.com");
    }

    #[test]
    fn test_token_families_do_not_cross() {
        let svc = service();
        let join = svc.issue_join(7, "worker@example.com").unwrap();
        assert!(matches!(
            svc.verify_access(&join),
            Err(ServiceError::AccessTokenMalformed)
        ));
        let access = svc.issue_access(42).unwrap();
        assert!(matches!(
            svc.verify_join(&access),
            Err(ServiceError::JoinTokenInvalid)
        ));
    }

    #[test]
    fn test_opaque_tokens_are_unique_and_urlsafe() {
        let a = generate_opaque_token();
        let b = generate_opaque_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
