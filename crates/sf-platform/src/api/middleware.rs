//! API Middleware
//!
//! Shared application state and the authentication extractors. Handlers
//! declare their access level through the extractor they take:
//!
//! - [`CurrentUser`]: any authenticated account
//! - [`MemberEnterprise`]: authenticated and holding an active membership;
//!   yields the tenant the request is scoped to
//! - [`OwnerEnterprise`]: authenticated and owning an enterprise

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use sqlx::PgPool;

use crate::domain::{Enterprise, MemberStatus, User};
use crate::error::ServiceError;
use crate::repository::{EnterpriseRepository, UserRepository};
use crate::service::{AuthService, EnterpriseService, TokenService, UserService};

/// Application state containing shared services.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub users: UserService,
    pub auth: AuthService,
    pub enterprises: EnterpriseService,
    pub user_repo: UserRepository,
    pub enterprise_repo: EnterpriseRepository,
}

fn state_from(parts: &Parts) -> Result<AppState, Response> {
    parts
        .extensions
        .get::<AppState>()
        .cloned()
        .ok_or_else(|| ServiceError::internal("AppState not found").into_response())
}

/// A header without the `Bearer ` scheme counts as absent, same as no
/// header at all; only the token itself can be malformed.
fn bearer_token(header: Option<&str>) -> Result<&str, ServiceError> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(ServiceError::AccessTokenMissing)
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<User, ServiceError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;
    let user_id = state.tokens.verify_access(token)?;
    state
        .user_repo
        .get_by_id(user_id)
        .await?
        .ok_or(ServiceError::AccessTokenInvalid)
}

/// Extractor for any authenticated request.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = state_from(parts)?;
        let user = authenticate(parts, &state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self(user))
    }
}

/// Extractor yielding the enterprise owned by the caller.
pub struct OwnerEnterprise {
    pub user: User,
    pub enterprise: Enterprise,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for OwnerEnterprise
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = state_from(parts)?;
        let result = async {
            let user = authenticate(parts, &state).await?;
            let enterprise = state
                .enterprise_repo
                .get_by_owner(user.id)
                .await?
                .ok_or(ServiceError::EnterpriseNotFound)?;
            Ok::<_, ServiceError>(Self { user, enterprise })
        }
        .await;
        result.map_err(IntoResponse::into_response)
    }
}

/// Extractor yielding the enterprise the caller is a member of. This is the
/// tenant every catalog operation is scoped to.
pub struct MemberEnterprise {
    pub user: User,
    pub enterprise: Enterprise,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for MemberEnterprise
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = state_from(parts)?;
        let result = async {
            let user = authenticate(parts, &state).await?;
            let membership = state
                .enterprise_repo
                .get_membership(user.id)
                .await?
                .filter(|m| m.status == MemberStatus::Active)
                .ok_or(ServiceError::EnterpriseRequired)?;
            let enterprise = state
                .enterprise_repo
                .get_by_id(membership.enterprise_id)
                .await?
                .ok_or(ServiceError::EnterpriseRequired)?;
            Ok::<_, ServiceError>(Self { user, enterprise })
        }
        .await;
        result.map_err(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts_credential() {
        assert!(matches!(bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi")));
    }

    #[test]
    fn test_absent_header_is_missing() {
        assert!(matches!(
            bearer_token(None),
            Err(ServiceError::AccessTokenMissing)
        ));
    }

    #[test]
    fn test_wrong_scheme_is_missing_not_malformed() {
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(ServiceError::AccessTokenMissing)
        ));
        assert!(matches!(
            bearer_token(Some("abc.def.ghi")),
            Err(ServiceError::AccessTokenMissing)
        ));
    }
}
