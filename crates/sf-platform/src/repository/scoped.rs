//! Tenant-Scoped Repository
//!
//! Generic CRUD over the two visibility regimes:
//!
//! - [`SharedRepo`]: classification/reference data where a row is either a
//!   system-wide general default (`is_general = TRUE`, no owner) or private
//!   to one enterprise. A tenant reads the union of both classes, writes only
//!   its own private rows, and may never collide with a general row on the
//!   uniqueness key.
//! - [`TenantRepo`]: operational data that always belongs to exactly one
//!   enterprise; no general branch.
//!
//! Both repos share identical call shapes so calling services never
//! special-case visibility. Each catalog type supplies typed payload structs
//! and pushes its own columns through [`ScopedEntity`]; the repos own the
//! query shapes and the ownership predicates.

use std::marker::PhantomData;

use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::{Result, ServiceError};

/// Column contract between a catalog type and the generic repositories.
///
/// Payload structs intentionally cannot carry `enterprise_id` or
/// `is_general`; the system sets both.
pub trait ScopedEntity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Human name used in `NotFound` / `Conflict` errors.
    const ENTITY: &'static str;
    /// Human name of the uniqueness key used in `Conflict` errors.
    const KEY_FIELD: &'static str;
    /// Comma-separated insert column list, matching `push_insert_values`.
    const INSERT_COLUMNS: &'static str;

    type Create: Send + Sync;
    type Update: Send + Sync;
    type Filter: Send + Sync;

    /// Pushes the uniqueness-key predicate for `create` (no leading AND).
    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create);

    /// Pushes the bind values matching `INSERT_COLUMNS`, comma-separated.
    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create);

    /// Pushes `SET` assignments for the fields present in `update`.
    /// Returns `false` when the update carries nothing.
    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool;

    /// Pushes the uniqueness-key predicate for the key value `update`
    /// carries, if any (no leading AND). Returns `false` when the update
    /// leaves the key alone, in which case no collision check runs.
    fn push_update_unique_check(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update)
        -> bool;

    /// Pushes filter predicates, each with a leading ` AND `.
    /// Absent fields are no-ops; strings are case-insensitive substring
    /// matches; scalars are equality.
    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter);
}

/// Marker for types in the general-or-tenant regime.
pub trait SharedEntity: ScopedEntity {}

/// Marker for types that always belong to exactly one tenant.
pub trait TenantEntity: ScopedEntity {}

/// Pushes an ILIKE substring predicate for an optional string filter.
pub(crate) fn push_ilike(qb: &mut QueryBuilder<'_, Postgres>, column: &str, value: &Option<String>) {
    if let Some(v) = value {
        qb.push(" AND ");
        qb.push(column);
        qb.push(" ILIKE ");
        qb.push_bind(format!("%{v}%"));
    }
}

/// Pushes an equality predicate for an optional scalar filter.
pub(crate) fn push_eq<T>(qb: &mut QueryBuilder<'_, Postgres>, column: &str, value: &Option<T>)
where
    T: Clone + Send + Sync + sqlx::Type<Postgres> + for<'q> sqlx::Encode<'q, Postgres> + 'static,
{
    if let Some(v) = value {
        qb.push(" AND ");
        qb.push(column);
        qb.push(" = ");
        qb.push_bind(v.clone());
    }
}

/// Pushes an `= ANY(..)` predicate for an optional id-list filter.
pub(crate) fn push_any(qb: &mut QueryBuilder<'_, Postgres>, column: &str, values: &Option<Vec<i64>>) {
    if let Some(v) = values {
        qb.push(" AND ");
        qb.push(column);
        qb.push(" = ANY(");
        qb.push_bind(v.clone());
        qb.push(")");
    }
}

/// Pushes an equality predicate on the uniqueness key when an update
/// payload carries it; returns whether anything was pushed.
pub(crate) fn push_key<T>(qb: &mut QueryBuilder<'_, Postgres>, column: &str, value: &Option<T>) -> bool
where
    T: Clone + Send + Sync + sqlx::Type<Postgres> + for<'q> sqlx::Encode<'q, Postgres> + 'static,
{
    match value {
        Some(v) => {
            qb.push(column);
            qb.push(" = ");
            qb.push_bind(v.clone());
            true
        }
        None => false,
    }
}

/// Pushes a `SET` assignment for a field present in an update payload,
/// comma-separating after the first.
pub(crate) fn push_set<T>(
    qb: &mut QueryBuilder<'_, Postgres>,
    any: &mut bool,
    column: &str,
    value: &Option<T>,
) where
    T: Clone + Send + Sync + sqlx::Type<Postgres> + for<'q> sqlx::Encode<'q, Postgres> + 'static,
{
    if let Some(v) = value {
        if *any {
            qb.push(", ");
        }
        qb.push(column);
        qb.push(" = ");
        qb.push_bind(v.clone());
        *any = true;
    }
}

/// CRUD over the general-or-tenant regime.
pub struct SharedRepo<E: SharedEntity> {
    pool: PgPool,
    _entity: PhantomData<E>,
}

impl<E: SharedEntity> Clone for SharedRepo<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: SharedEntity> SharedRepo<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Visible set: general rows plus the tenant's own private rows.
    fn push_visible(qb: &mut QueryBuilder<'static, Postgres>, tenant: i64) {
        qb.push("(is_general = TRUE OR (is_general = FALSE AND enterprise_id = ");
        qb.push_bind(tenant);
        qb.push("))");
    }

    /// Writable set: only the tenant's own private rows.
    fn push_owned(qb: &mut QueryBuilder<'static, Postgres>, id: i64, tenant: i64) {
        qb.push("id = ");
        qb.push_bind(id);
        qb.push(" AND enterprise_id = ");
        qb.push_bind(tenant);
        qb.push(" AND is_general = FALSE");
    }

    fn get_query(id: i64, tenant: i64) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE id = ", E::TABLE));
        qb.push_bind(id);
        qb.push(" AND ");
        Self::push_visible(&mut qb, tenant);
        qb
    }

    fn list_query(tenant: i64, filter: &E::Filter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE ", E::TABLE));
        Self::push_visible(&mut qb, tenant);
        E::push_filters(&mut qb, filter);
        qb.push(" ORDER BY id");
        qb
    }

    /// One existence query across both visibility classes, so a private
    /// create cannot race past a general default with the same key.
    fn exists_query(tenant: i64, create: &E::Create) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE ",
            E::TABLE
        ));
        Self::push_visible(&mut qb, tenant);
        qb.push(" AND (");
        E::push_unique_check(&mut qb, create);
        qb.push("))");
        qb
    }

    /// Collision check for an update that renames the uniqueness key: the
    /// new value must not be taken by any other visible row, general rows
    /// included. The `(enterprise_id, key)` index cannot see that
    /// cross-class case. `None` when the update leaves the key alone.
    fn update_exists_query(
        id: i64,
        tenant: i64,
        update: &E::Update,
    ) -> Option<QueryBuilder<'static, Postgres>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE ",
            E::TABLE
        ));
        Self::push_visible(&mut qb, tenant);
        qb.push(" AND id <> ");
        qb.push_bind(id);
        qb.push(" AND (");
        if !E::push_update_unique_check(&mut qb, update) {
            return None;
        }
        qb.push("))");
        Some(qb)
    }

    fn insert_query(tenant: i64, create: &E::Create) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "INSERT INTO {} (enterprise_id, is_general, {}) VALUES (",
            E::TABLE,
            E::INSERT_COLUMNS
        ));
        qb.push_bind(tenant);
        qb.push(", FALSE, ");
        E::push_insert_values(&mut qb, create);
        qb.push(") RETURNING *");
        qb
    }

    pub async fn get(&self, id: i64, tenant: i64) -> Result<E> {
        Self::get_query(id, tenant)
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServiceError::NotFound { entity: E::ENTITY })
    }

    pub async fn list(&self, tenant: i64, filter: &E::Filter) -> Result<Vec<E>> {
        Ok(Self::list_query(tenant, filter)
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn create(&self, tenant: i64, create: &E::Create) -> Result<E> {
        let (taken,): (bool,) = Self::exists_query(tenant, create)
            .build_query_as()
            .fetch_one(&self.pool)
            .await?;
        if taken {
            return Err(ServiceError::Conflict {
                entity: E::ENTITY,
                field: E::KEY_FIELD,
            });
        }
        // The unique index on (enterprise_id, key) is the race-closing
        // backstop; the check above exists for the friendly error.
        Self::insert_query(tenant, create)
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ServiceError::conflict_on_unique(e, E::ENTITY, E::KEY_FIELD))
    }

    /// Permitted only on the tenant's own private rows; general and foreign
    /// rows are reported as absent.
    pub async fn update(&self, id: i64, tenant: i64, update: &E::Update) -> Result<E> {
        if let Some(mut check) = Self::update_exists_query(id, tenant, update) {
            let (taken,): (bool,) = check.build_query_as().fetch_one(&self.pool).await?;
            if taken {
                return Err(ServiceError::Conflict {
                    entity: E::ENTITY,
                    field: E::KEY_FIELD,
                });
            }
        }
        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        if !E::push_updates(&mut qb, update) {
            // Nothing to set; still enforce the ownership predicate.
            return self.get_owned(id, tenant).await;
        }
        qb.push(" WHERE ");
        Self::push_owned(&mut qb, id, tenant);
        qb.push(" RETURNING *");
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ServiceError::conflict_on_unique(e, E::ENTITY, E::KEY_FIELD))?
            .ok_or(ServiceError::NotFound { entity: E::ENTITY })
    }

    pub async fn delete(&self, id: i64, tenant: i64) -> Result<()> {
        let mut qb = QueryBuilder::new(format!("DELETE FROM {} WHERE ", E::TABLE));
        Self::push_owned(&mut qb, id, tenant);
        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound { entity: E::ENTITY });
        }
        Ok(())
    }

    async fn get_owned(&self, id: i64, tenant: i64) -> Result<E> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE ", E::TABLE));
        Self::push_owned(&mut qb, id, tenant);
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServiceError::NotFound { entity: E::ENTITY })
    }
}

/// CRUD over the tenant-only regime; identical call shape, no general branch.
pub struct TenantRepo<E: TenantEntity> {
    pool: PgPool,
    _entity: PhantomData<E>,
}

impl<E: TenantEntity> Clone for TenantRepo<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: TenantEntity> TenantRepo<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn push_owned(qb: &mut QueryBuilder<'static, Postgres>, id: i64, tenant: i64) {
        qb.push("id = ");
        qb.push_bind(id);
        qb.push(" AND enterprise_id = ");
        qb.push_bind(tenant);
    }

    fn exists_query(tenant: i64, create: &E::Create) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE enterprise_id = ",
            E::TABLE
        ));
        qb.push_bind(tenant);
        qb.push(" AND (");
        E::push_unique_check(&mut qb, create);
        qb.push("))");
        qb
    }

    pub async fn get(&self, id: i64, tenant: i64) -> Result<E> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE ", E::TABLE));
        Self::push_owned(&mut qb, id, tenant);
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServiceError::NotFound { entity: E::ENTITY })
    }

    pub async fn list(&self, tenant: i64, filter: &E::Filter) -> Result<Vec<E>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE enterprise_id = ",
            E::TABLE
        ));
        qb.push_bind(tenant);
        E::push_filters(&mut qb, filter);
        qb.push(" ORDER BY id");
        Ok(qb.build_query_as::<E>().fetch_all(&self.pool).await?)
    }

    pub async fn create(&self, tenant: i64, create: &E::Create) -> Result<E> {
        let (taken,): (bool,) = Self::exists_query(tenant, create)
            .build_query_as()
            .fetch_one(&self.pool)
            .await?;
        if taken {
            return Err(ServiceError::Conflict {
                entity: E::ENTITY,
                field: E::KEY_FIELD,
            });
        }
        let mut qb = QueryBuilder::new(format!(
            "INSERT INTO {} (enterprise_id, {}) VALUES (",
            E::TABLE,
            E::INSERT_COLUMNS
        ));
        qb.push_bind(tenant);
        qb.push(", ");
        E::push_insert_values(&mut qb, create);
        qb.push(") RETURNING *");
        qb.build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ServiceError::conflict_on_unique(e, E::ENTITY, E::KEY_FIELD))
    }

    pub async fn update(&self, id: i64, tenant: i64, update: &E::Update) -> Result<E> {
        let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        if !E::push_updates(&mut qb, update) {
            return self.get(id, tenant).await;
        }
        qb.push(" WHERE ");
        Self::push_owned(&mut qb, id, tenant);
        qb.push(" RETURNING *");
        qb.build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ServiceError::conflict_on_unique(e, E::ENTITY, E::KEY_FIELD))?
            .ok_or(ServiceError::NotFound { entity: E::ENTITY })
    }

    pub async fn delete(&self, id: i64, tenant: i64) -> Result<()> {
        let mut qb = QueryBuilder::new(format!("DELETE FROM {} WHERE ", E::TABLE));
        Self::push_owned(&mut qb, id, tenant);
        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound { entity: E::ENTITY });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Gost, GostCreate, GostFilter, GostUpdate, Machine, MachineCreate, MachineFilter,
    };

    #[test]
    fn test_shared_get_unions_both_visibility_classes() {
        let qb = SharedRepo::<Gost>::get_query(7, 3);
        let sql = qb.sql();
        assert!(sql.starts_with("SELECT * FROM gosts WHERE id = $1"));
        assert!(sql.contains("is_general = TRUE OR (is_general = FALSE AND enterprise_id = $2)"));
    }

    #[test]
    fn test_shared_uniqueness_check_spans_general_and_private() {
        let create = GostCreate {
            number: "19903-74".to_string(),
        };
        let qb = SharedRepo::<Gost>::exists_query(3, &create);
        let sql = qb.sql();
        assert!(sql.starts_with("SELECT EXISTS"));
        // One query covers both classes; no separate general lookup.
        assert!(sql.contains("is_general = TRUE OR (is_general = FALSE AND enterprise_id = $1)"));
        assert!(sql.contains("number = $2"));
    }

    #[test]
    fn test_shared_update_key_rename_checked_across_classes() {
        let update = GostUpdate {
            number: Some("8732-78".to_string()),
        };
        let qb = SharedRepo::<Gost>::update_exists_query(7, 3, &update).unwrap();
        let sql = qb.sql();
        assert!(sql.starts_with("SELECT EXISTS"));
        assert!(sql.contains("is_general = TRUE OR (is_general = FALSE AND enterprise_id = $1)"));
        // The row being renamed must not collide with itself.
        assert!(sql.contains("id <> $2"));
        assert!(sql.contains("number = $3"));
    }

    #[test]
    fn test_shared_update_without_key_skips_collision_check() {
        assert!(SharedRepo::<Gost>::update_exists_query(7, 3, &GostUpdate::default()).is_none());
    }

    #[test]
    fn test_shared_insert_sets_visibility_system_side() {
        let create = GostCreate {
            number: "19903-74".to_string(),
        };
        let qb = SharedRepo::<Gost>::insert_query(3, &create);
        let sql = qb.sql();
        assert!(sql.starts_with("INSERT INTO gosts (enterprise_id, is_general, number)"));
        assert!(sql.contains("($1, FALSE, $2)"));
    }

    #[test]
    fn test_shared_list_applies_substring_filter() {
        let filter = GostFilter {
            number: Some("199".to_string()),
            ..Default::default()
        };
        let qb = SharedRepo::<Gost>::list_query(3, &filter);
        let sql = qb.sql();
        assert!(sql.contains("number ILIKE $2"));
        assert!(sql.ends_with(" ORDER BY id"));
    }

    #[test]
    fn test_shared_list_absent_filter_is_noop() {
        let qb = SharedRepo::<Gost>::list_query(3, &GostFilter::default());
        assert!(!qb.sql().contains("ILIKE"));
    }

    #[test]
    fn test_tenant_create_checks_only_own_rows() {
        let create = MachineCreate {
            name: "16K20".to_string(),
            machine_type_id: 1,
            count: 1,
            x: 1.0,
            y: 1.0,
            z: 1.0,
            h: 1.0,
            d: 1.0,
        };
        let qb = TenantRepo::<Machine>::exists_query(3, &create);
        let sql = qb.sql();
        assert!(sql.contains("enterprise_id = $1"));
        assert!(!sql.contains("is_general"));
    }

    #[test]
    fn test_tenant_list_scopes_to_enterprise() {
        let filter = MachineFilter {
            name: Some("16K".to_string()),
            machine_type_id: Some(5),
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT * FROM machines WHERE enterprise_id = ");
        qb.push_bind(3i64);
        Machine::push_filters(&mut qb, &filter);
        let sql = qb.sql();
        assert!(sql.contains("name ILIKE $2"));
        assert!(sql.contains("machine_type_id = $3"));
    }
}
