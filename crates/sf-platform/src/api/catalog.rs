//! Catalog Endpoints
//!
//! One uniform CRUD surface per catalog entity, nested under `/catalog`.
//! Every route requires a membership; the caller's enterprise is the tenant
//! the operation is scoped to. Handlers are generic over the entity, so the
//! visibility rules live in one place (the repositories) for all eleven
//! resources.
//!
//! Shape per resource:
//! - GET    /catalog/{resource}        - list, with query-string filters
//! - POST   /catalog/{resource}        - create a private row
//! - GET    /catalog/{resource}/{id}   - fetch one visible row
//! - PUT    /catalog/{resource}/{id}   - update an owned row
//! - DELETE /catalog/{resource}/{id}   - delete an owned row

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::middleware::{AppState, MemberEnterprise};
use crate::domain::{
    AssortmentType, Gost, GostAssortment, Machine, MachineType, Material, MaterialCategory,
    Method, OperationType, Tool, Tooling,
};
use crate::error::Result;
use crate::repository::{SharedEntity, SharedRepo, TenantEntity, TenantRepo};

pub fn catalog_router() -> Router {
    Router::new()
        .nest("/material-categories", shared_routes::<MaterialCategory>())
        .nest("/gosts", shared_routes::<Gost>())
        .nest("/assortment-types", shared_routes::<AssortmentType>())
        .nest("/gost-assortments", shared_routes::<GostAssortment>())
        .nest("/materials", shared_routes::<Material>())
        .nest("/operation-types", shared_routes::<OperationType>())
        .nest("/methods", shared_routes::<Method>())
        .nest("/machine-types", shared_routes::<MachineType>())
        .nest("/machines", tenant_routes::<Machine>())
        .nest("/toolings", tenant_routes::<Tooling>())
        .nest("/tools", tenant_routes::<Tool>())
}

fn shared_routes<E>() -> Router
where
    E: SharedEntity + Serialize + Sync + 'static,
    E::Create: DeserializeOwned + 'static,
    E::Update: DeserializeOwned + 'static,
    E::Filter: DeserializeOwned + 'static,
{
    Router::new()
        .route("/", get(list_shared::<E>).post(create_shared::<E>))
        .route(
            "/:id",
            get(get_shared::<E>)
                .put(update_shared::<E>)
                .delete(delete_shared::<E>),
        )
}

fn tenant_routes<E>() -> Router
where
    E: TenantEntity + Serialize + Sync + 'static,
    E::Create: DeserializeOwned + 'static,
    E::Update: DeserializeOwned + 'static,
    E::Filter: DeserializeOwned + 'static,
{
    Router::new()
        .route("/", get(list_tenant::<E>).post(create_tenant::<E>))
        .route(
            "/:id",
            get(get_tenant::<E>)
                .put(update_tenant::<E>)
                .delete(delete_tenant::<E>),
        )
}

// --- shared-regime handlers ---

async fn list_shared<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Query(filter): Query<E::Filter>,
) -> Result<Json<Vec<E>>>
where
    E: SharedEntity + Serialize + Sync + 'static,
    E::Filter: DeserializeOwned,
{
    let repo = SharedRepo::<E>::new(state.pool.clone());
    Ok(Json(repo.list(member.enterprise.id, &filter).await?))
}

async fn get_shared<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Path(id): Path<i64>,
) -> Result<Json<E>>
where
    E: SharedEntity + Serialize + Sync + 'static,
{
    let repo = SharedRepo::<E>::new(state.pool.clone());
    Ok(Json(repo.get(id, member.enterprise.id).await?))
}

async fn create_shared<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Json(create): Json<E::Create>,
) -> Result<(StatusCode, Json<E>)>
where
    E: SharedEntity + Serialize + Sync + 'static,
    E::Create: DeserializeOwned,
{
    let repo = SharedRepo::<E>::new(state.pool.clone());
    let row = repo.create(member.enterprise.id, &create).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn update_shared<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Path(id): Path<i64>,
    Json(update): Json<E::Update>,
) -> Result<Json<E>>
where
    E: SharedEntity + Serialize + Sync + 'static,
    E::Update: DeserializeOwned,
{
    let repo = SharedRepo::<E>::new(state.pool.clone());
    Ok(Json(repo.update(id, member.enterprise.id, &update).await?))
}

async fn delete_shared<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Path(id): Path<i64>,
) -> Result<StatusCode>
where
    E: SharedEntity + Serialize + Sync + 'static,
{
    let repo = SharedRepo::<E>::new(state.pool.clone());
    repo.delete(id, member.enterprise.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- tenant-only handlers ---

async fn list_tenant<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Query(filter): Query<E::Filter>,
) -> Result<Json<Vec<E>>>
where
    E: TenantEntity + Serialize + Sync + 'static,
    E::Filter: DeserializeOwned,
{
    let repo = TenantRepo::<E>::new(state.pool.clone());
    Ok(Json(repo.list(member.enterprise.id, &filter).await?))
}

async fn get_tenant<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Path(id): Path<i64>,
) -> Result<Json<E>>
where
    E: TenantEntity + Serialize + Sync + 'static,
{
    let repo = TenantRepo::<E>::new(state.pool.clone());
    Ok(Json(repo.get(id, member.enterprise.id).await?))
}

async fn create_tenant<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Json(create): Json<E::Create>,
) -> Result<(StatusCode, Json<E>)>
where
    E: TenantEntity + Serialize + Sync + 'static,
    E::Create: DeserializeOwned,
{
    let repo = TenantRepo::<E>::new(state.pool.clone());
    let row = repo.create(member.enterprise.id, &create).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn update_tenant<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Path(id): Path<i64>,
    Json(update): Json<E::Update>,
) -> Result<Json<E>>
where
    E: TenantEntity + Serialize + Sync + 'static,
    E::Update: DeserializeOwned,
{
    let repo = TenantRepo::<E>::new(state.pool.clone());
    Ok(Json(repo.update(id, member.enterprise.id, &update).await?))
}

async fn delete_tenant<E>(
    Extension(state): Extension<AppState>,
    member: MemberEnterprise,
    Path(id): Path<i64>,
) -> Result<StatusCode>
where
    E: TenantEntity + Serialize + Sync + 'static,
{
    let repo = TenantRepo::<E>::new(state.pool.clone());
    repo.delete(id, member.enterprise.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
