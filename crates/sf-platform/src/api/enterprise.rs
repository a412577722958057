//! Enterprise Endpoints
//!
//! - POST /enterprise/create - Onboard an enterprise (owner flow)
//! - GET  /enterprise/personal - The caller's own enterprise, full aggregate
//! - GET  /enterprise/generate-tokens/{count} - Mint invite tokens
//! - GET  /enterprise/tokens - Outstanding invite tokens
//! - POST /enterprise/join-to-enterprise - Join with an INN + invite token
//! - GET  /enterprise/join-by-email/{token} - Redeem a mailed join link
//! - GET  /enterprise/invite-by-email - Mail a join link to an address
//! - GET  /enterprise/revoke/{member_id} - Remove a member
//! - GET  /enterprise/suggest - Company registry autocomplete

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::common::MessageResponse;
use crate::api::middleware::{AppState, CurrentUser, OwnerEnterprise};
use crate::domain::{CreateEnterpriseRequest, EnterpriseMember, EnterpriseOut};
use crate::error::Result;
use crate::service::CompanySuggestion;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JoinByTokenRequest {
    /// Tax identifier of the enterprise to join.
    pub inn: String,
    /// Invite token minted by the enterprise owner.
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    pub tokens: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InviteByEmailParams {
    /// Address to mail the join link to.
    pub email: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestParams {
    /// Partial company name or tax identifier.
    pub inn: String,
}

pub fn enterprise_router() -> Router {
    Router::new()
        .route("/create", post(create))
        .route("/personal", get(personal))
        .route("/generate-tokens/:count", get(generate_tokens))
        .route("/tokens", get(list_tokens))
        .route("/join-to-enterprise", post(join_by_token))
        .route("/join-by-email/:token", get(join_by_email))
        .route("/invite-by-email", get(invite_by_email))
        .route("/revoke/:member_id", get(revoke_member))
        .route("/suggest", get(suggest))
}

/// Onboard an enterprise
#[utoipa::path(
    post,
    path = "/enterprise/create",
    request_body = CreateEnterpriseRequest,
    responses(
        (status = 201, description = "Enterprise created", body = EnterpriseOut),
        (status = 403, description = "Email not verified"),
        (status = 409, description = "Caller already belongs to an enterprise"),
        (status = 422, description = "Profile sections disagree with the declared type"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn create(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateEnterpriseRequest>,
) -> Result<(StatusCode, Json<EnterpriseOut>)> {
    let out = state.enterprises.create(user.id, &request).await?;
    Ok((StatusCode::CREATED, Json(out)))
}

/// The caller's enterprise
#[utoipa::path(
    get,
    path = "/enterprise/personal",
    responses(
        (status = 200, description = "Full enterprise aggregate", body = EnterpriseOut),
        (status = 404, description = "Caller owns no enterprise"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn personal(
    Extension(state): Extension<AppState>,
    owner: OwnerEnterprise,
) -> Result<Json<EnterpriseOut>> {
    Ok(Json(state.enterprises.personal(owner.enterprise).await?))
}

/// Mint invite tokens
#[utoipa::path(
    get,
    path = "/enterprise/generate-tokens/{count}",
    params(("count" = usize, Path, description = "Number of tokens to mint, 1-100")),
    responses(
        (status = 200, description = "Freshly minted tokens", body = TokensResponse),
        (status = 403, description = "Enterprise type cannot invite by INN"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn generate_tokens(
    Extension(state): Extension<AppState>,
    owner: OwnerEnterprise,
    Path(count): Path<usize>,
) -> Result<Json<TokensResponse>> {
    let tokens = state
        .enterprises
        .generate_tokens(&owner.enterprise, count)
        .await?;
    Ok(Json(TokensResponse { tokens }))
}

/// Outstanding invite tokens
#[utoipa::path(
    get,
    path = "/enterprise/tokens",
    responses(
        (status = 200, description = "Unconsumed invite tokens", body = TokensResponse),
        (status = 403, description = "Enterprise type cannot invite by INN"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn list_tokens(
    Extension(state): Extension<AppState>,
    owner: OwnerEnterprise,
) -> Result<Json<TokensResponse>> {
    let tokens = state.enterprises.list_tokens(&owner.enterprise).await?;
    Ok(Json(TokensResponse { tokens }))
}

/// Join with an invite token
#[utoipa::path(
    post,
    path = "/enterprise/join-to-enterprise",
    request_body = JoinByTokenRequest,
    responses(
        (status = 200, description = "Membership created", body = EnterpriseMember),
        (status = 401, description = "Invite token invalid or already consumed"),
        (status = 404, description = "No enterprise with that INN"),
        (status = 409, description = "Caller already belongs to an enterprise"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn join_by_token(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<JoinByTokenRequest>,
) -> Result<Json<EnterpriseMember>> {
    let member = state
        .enterprises
        .join_by_token(user.id, &request.inn, &request.token)
        .await?;
    Ok(Json(member))
}

/// Redeem a mailed join link
#[utoipa::path(
    get,
    path = "/enterprise/join-by-email/{token}",
    params(("token" = String, Path, description = "Join token from the mailed link")),
    responses(
        (status = 200, description = "Membership created", body = EnterpriseMember),
        (status = 401, description = "Join token invalid or expired"),
        (status = 404, description = "Account or enterprise no longer exists"),
    ),
    tag = "enterprise"
)]
pub async fn join_by_email(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
) -> Result<Json<EnterpriseMember>> {
    Ok(Json(state.enterprises.join_by_email(&token).await?))
}

/// Mail a join link
#[utoipa::path(
    get,
    path = "/enterprise/invite-by-email",
    params(InviteByEmailParams),
    responses(
        (status = 200, description = "Invitation mailed", body = MessageResponse),
        (status = 404, description = "Caller owns no enterprise"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn invite_by_email(
    Extension(state): Extension<AppState>,
    owner: OwnerEnterprise,
    Query(params): Query<InviteByEmailParams>,
) -> Result<Json<MessageResponse>> {
    state
        .enterprises
        .invite_by_email(&owner.enterprise, &params.email)
        .await?;
    Ok(Json(MessageResponse::new("invitation sent")))
}

/// Remove a member
#[utoipa::path(
    get,
    path = "/enterprise/revoke/{member_id}",
    params(("member_id" = i64, Path, description = "Membership row to remove")),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 403, description = "Owner membership cannot be revoked"),
        (status = 404, description = "No such member in this enterprise"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn revoke_member(
    Extension(state): Extension<AppState>,
    owner: OwnerEnterprise,
    Path(member_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state
        .enterprises
        .revoke_member(&owner.enterprise, member_id)
        .await?;
    Ok(Json(MessageResponse::new("member revoked")))
}

/// Company registry autocomplete
#[utoipa::path(
    get,
    path = "/enterprise/suggest",
    params(SuggestParams),
    responses(
        (status = 200, description = "Registry matches", body = [CompanySuggestion]),
        (status = 502, description = "Registry unavailable or not configured"),
    ),
    security(("bearer" = [])),
    tag = "enterprise"
)]
pub async fn suggest(
    Extension(state): Extension<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(params): Query<SuggestParams>,
) -> Result<Json<Vec<CompanySuggestion>>> {
    Ok(Json(state.enterprises.suggest(&params.inn).await?))
}
