//! User and Session Endpoints
//!
//! - POST /user/register - Create an account and mail the confirmation link
//! - GET  /user/confirm/{token} - Confirm the email behind a mailed link
//! - POST /user/login - Password login; sets the refresh cookie
//! - GET  /user/logout - Revoke the refresh token and clear the cookie
//! - GET  /auth/me - Current account info
//! - GET  /auth/refresh - Rotate the refresh token, issue a new access token

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::common::MessageResponse;
use crate::api::middleware::{AppState, CurrentUser};
use crate::domain::{LoginRequest, RegisterRequest, User};
use crate::error::{Result, ServiceError};
use crate::service::SessionTokens;

pub const REFRESH_COOKIE: &str = "refresh_token";

/// Access token issued on login / refresh. The refresh token itself travels
/// only in the httpOnly cookie.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

fn refresh_cookie(session: &SessionTokens) -> Cookie<'static> {
    let remaining = session.refresh_expires_at - Utc::now();
    Cookie::build((REFRESH_COOKIE, session.refresh_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(remaining.num_seconds()))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, "")).path("/").build()
}

pub fn user_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/confirm/:token", get(confirm_email))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

pub fn auth_router() -> Router {
    Router::new()
        .route("/me", get(me))
        .route("/refresh", get(refresh))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Captcha failed or payload invalid"),
    ),
    tag = "user"
)]
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.users.register(&request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Confirm an email address
#[utoipa::path(
    get,
    path = "/user/confirm/{token}",
    params(("token" = String, Path, description = "Confirmation token from the mailed link")),
    responses(
        (status = 200, description = "Email confirmed", body = User),
        (status = 401, description = "Token invalid or expired"),
    ),
    tag = "user"
)]
pub async fn confirm_email(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
) -> Result<Json<User>> {
    Ok(Json(state.users.confirm_email(&token).await?))
}

/// Password login
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not confirmed"),
    ),
    tag = "user"
)]
pub async fn login(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let (_, session) = state.auth.login(&request).await?;
    let response = LoginResponse {
        access_token: session.access_token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.access_expiry_secs(),
    };
    Ok((jar.add(refresh_cookie(&session)), Json(response)))
}

/// Logout
#[utoipa::path(
    get,
    path = "/user/logout",
    responses((status = 200, description = "Refresh token revoked", body = MessageResponse)),
    tag = "user"
)]
pub async fn logout(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>)> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        state.auth.logout(cookie.value()).await?;
    }
    Ok((
        jar.remove(removal_cookie()),
        Json(MessageResponse::new("logged out")),
    ))
}

/// Current account
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current account", body = User),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Rotate the session
#[utoipa::path(
    get,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New access token", body = LoginResponse),
        (status = 401, description = "Refresh token missing, invalid, or expired"),
    ),
    tag = "auth"
)]
pub async fn refresh(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let cookie = jar
        .get(REFRESH_COOKIE)
        .ok_or(ServiceError::RefreshTokenMissing)?;
    let session = state.auth.refresh(cookie.value()).await?;
    let response = LoginResponse {
        access_token: session.access_token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.access_expiry_secs(),
    };
    Ok((jar.add(refresh_cookie(&session)), Json(response)))
}
