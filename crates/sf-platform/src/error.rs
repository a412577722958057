//! Platform Error Taxonomy
//!
//! One variant per domain condition, each with a stable machine code and a
//! fixed HTTP status. Storage errors are translated at the repository
//! boundary so transport never sees a raw sqlx/redis error.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    // Access tokens
    #[error("Access token is missing")]
    AccessTokenMissing,
    #[error("Access token is malformed")]
    AccessTokenMalformed,
    #[error("Access token is invalid")]
    AccessTokenInvalid,
    #[error("Access token has expired")]
    AccessTokenExpired,

    // Refresh tokens
    #[error("Refresh token is missing")]
    RefreshTokenMissing,
    #[error("Refresh token is invalid")]
    RefreshTokenInvalid,
    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    // Credentials / account state
    #[error("Invalid login or password")]
    InvalidCredentials,
    #[error("Email is not confirmed")]
    EmailNotConfirmed,
    #[error("Captcha verification failed")]
    CaptchaNotVerified,
    #[error("Email is already registered")]
    NotUniqueEmail,

    // Enterprise / membership
    #[error("Enterprise not found")]
    EnterpriseNotFound,
    #[error("Enterprise context required")]
    EnterpriseRequired,
    #[error("User is not registered")]
    UserNotRegistered,
    #[error("User email is not verified")]
    UserNotVerified,
    #[error("User already belongs to an enterprise")]
    UserAlreadyInEnterprise,
    #[error("Only sole proprietors and legal entities may invite by tax number")]
    InviteByInnNotAllowed,
    #[error("Join token is invalid")]
    JoinTokenInvalid,
    #[error("Join token has expired")]
    JoinTokenExpired,

    // Generic domain
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("{entity} with the same {field} already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
    },
    #[error("Validation failed: {message}")]
    Validation { message: String },
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    // Collaborators / infrastructure
    #[error("Upstream service error: {message}")]
    Upstream { message: String },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the API contract.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccessTokenMissing => "ACCESS_TOKEN_MISSING",
            Self::AccessTokenMalformed => "ACCESS_TOKEN_MALFORMED",
            Self::AccessTokenInvalid => "ACCESS_TOKEN_INVALID",
            Self::AccessTokenExpired => "ACCESS_TOKEN_EXPIRED",
            Self::RefreshTokenMissing => "REFRESH_TOKEN_MISSING",
            Self::RefreshTokenInvalid => "REFRESH_TOKEN_INVALID",
            Self::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailNotConfirmed => "EMAIL_NOT_CONFIRMED",
            Self::CaptchaNotVerified => "CAPTCHA_NOT_VERIFIED",
            Self::NotUniqueEmail => "NOT_UNIQUE_EMAIL",
            Self::EnterpriseNotFound => "ENTERPRISE_NOT_FOUND",
            Self::EnterpriseRequired => "ENTERPRISE_REQUIRED",
            Self::UserNotRegistered => "USER_NOT_REGISTERED",
            Self::UserNotVerified => "USER_NOT_VERIFIED",
            Self::UserAlreadyInEnterprise => "USER_ALREADY_IN_ENTERPRISE",
            Self::InviteByInnNotAllowed => "INVITE_BY_INN_NOT_ALLOWED",
            Self::JoinTokenInvalid => "JOIN_TOKEN_INVALID",
            Self::JoinTokenExpired => "JOIN_TOKEN_EXPIRED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Database(_) | Self::Cache(_) | Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AccessTokenMissing
            | Self::AccessTokenMalformed
            | Self::AccessTokenInvalid
            | Self::AccessTokenExpired
            | Self::RefreshTokenMissing
            | Self::RefreshTokenInvalid
            | Self::RefreshTokenExpired
            | Self::InvalidCredentials
            | Self::JoinTokenInvalid
            | Self::JoinTokenExpired => StatusCode::UNAUTHORIZED,

            Self::EmailNotConfirmed
            | Self::UserNotVerified
            | Self::EnterpriseRequired
            | Self::InviteByInnNotAllowed
            | Self::Forbidden { .. } => StatusCode::FORBIDDEN,

            Self::EnterpriseNotFound | Self::UserNotRegistered | Self::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }

            Self::NotUniqueEmail | Self::UserAlreadyInEnterprise | Self::Conflict { .. } => {
                StatusCode::CONFLICT
            }

            Self::CaptchaNotVerified | Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,

            Self::Database(_) | Self::Cache(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Translates a storage error from an insert into the domain taxonomy:
    /// a unique-constraint violation on the backstop index becomes `Conflict`.
    pub fn conflict_on_unique(
        err: sqlx::Error,
        entity: &'static str,
        field: &'static str,
    ) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict { entity, field }
            }
            _ => Self::Database(err),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let request_id = uuid::Uuid::new_v4().to_string();

        // Internals are logged with full context but never leak to the caller.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(request_id = %request_id, error = %self, "internal error");
            "Internal server error".to_string()
        } else {
            tracing::debug!(request_id = %request_id, code = code, error = %self, "request failed");
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "details": {},
            },
            "request_id": request_id,
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServiceError::AccessTokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::UserNotVerified.status(), StatusCode::FORBIDDEN);
        assert_eq!(ServiceError::EnterpriseNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Conflict { entity: "material", field: "brand" }.status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::validation("bad payload").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ServiceError::JoinTokenInvalid.code(), "JOIN_TOKEN_INVALID");
        assert_eq!(ServiceError::AccessTokenExpired.code(), "ACCESS_TOKEN_EXPIRED");
        assert_eq!(ServiceError::NotUniqueEmail.code(), "NOT_UNIQUE_EMAIL");
        assert_eq!(
            ServiceError::NotFound { entity: "machine" }.code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_internal_errors_share_one_code() {
        assert_eq!(ServiceError::internal("boom").code(), "INTERNAL_ERROR");
        assert_eq!(ServiceError::Database(sqlx::Error::PoolClosed).code(), "INTERNAL_ERROR");
    }
}
