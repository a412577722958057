//! HTTP API
//!
//! Axum routers and handlers. State is injected as an [`Extension`] layer by
//! the server binary; handlers pick their access level via the extractors in
//! [`middleware`].

pub mod auth;
pub mod catalog;
pub mod common;
pub mod enterprise;
pub mod middleware;
pub mod openapi;

use axum::{routing::get, Json, Router};
use serde_json::json;

pub use middleware::AppState;
pub use openapi::ApiDoc;

/// Full application router, without state or tracing layers.
pub fn router() -> Router {
    Router::new()
        .nest("/user", auth::user_router())
        .nest("/auth", auth::auth_router())
        .nest("/enterprise", enterprise::enterprise_router())
        .nest("/catalog", catalog::catalog_router())
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
