//! Schema Bootstrap
//!
//! Creates enum types, tables, and the uniqueness backstop indexes on
//! startup. Every statement is idempotent so restarts are safe.

use sqlx::PgPool;

use crate::error::Result;

const ENUM_TYPES: &[(&str, &str)] = &[
    (
        "enterprise_type",
        "'individual', 'sole_proprietor', 'legal_entity'",
    ),
    (
        "member_role",
        "'owner', 'admin', 'manager', 'employee', 'intern', 'other'",
    ),
    (
        "member_status",
        "'invited', 'active', 'suspended', 'left', 'removed'",
    ),
    ("material_type", "'ferrous', 'nonferrous', 'nonmetallic'"),
];

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        is_verified BOOLEAN NOT NULL DEFAULT FALSE,
        is_member BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS refresh_tokens (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        token TEXT NOT NULL UNIQUE,
        expires_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS enterprises (
        id BIGSERIAL PRIMARY KEY,
        owner_id BIGINT NOT NULL REFERENCES users(id),
        name TEXT NOT NULL,
        enterprise_type enterprise_type NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS enterprise_members (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        user_id BIGINT NOT NULL UNIQUE REFERENCES users(id),
        role member_role NOT NULL,
        status member_status NOT NULL,
        joined_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS contacts (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        phone TEXT NOT NULL,
        city TEXT NOT NULL,
        address TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS individual_profiles (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        patronymic TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS legal_entities (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        inn TEXT NOT NULL UNIQUE,
        ogrn TEXT NOT NULL,
        management_name TEXT
    )",
    "CREATE TABLE IF NOT EXISTS legal_entity_profiles (
        id BIGSERIAL PRIMARY KEY,
        legal_entity_id BIGINT NOT NULL REFERENCES legal_entities(id) ON DELETE CASCADE,
        org_name TEXT NOT NULL,
        kpp TEXT NOT NULL,
        opf_full TEXT NOT NULL,
        opf_short TEXT NOT NULL
    )",
    // Shared-regime catalog: enterprise_id is NULL exactly on general rows.
    "CREATE TABLE IF NOT EXISTS material_categories (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        name TEXT NOT NULL,
        material_type material_type NOT NULL,
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS gosts (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        number TEXT NOT NULL,
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS assortment_types (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        name TEXT NOT NULL,
        gost_id BIGINT NOT NULL REFERENCES gosts(id),
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS gost_assortments (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        gost_id BIGINT NOT NULL REFERENCES gosts(id),
        assortment_type_id BIGINT NOT NULL REFERENCES assortment_types(id),
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS materials (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        brand TEXT NOT NULL,
        width DOUBLE PRECISION NOT NULL,
        height DOUBLE PRECISION NOT NULL,
        strength DOUBLE PRECISION NOT NULL,
        length DOUBLE PRECISION NOT NULL,
        density DOUBLE PRECISION NOT NULL,
        hardness DOUBLE PRECISION NOT NULL,
        tear_resistance DOUBLE PRECISION NOT NULL,
        elongation DOUBLE PRECISION NOT NULL,
        comment TEXT,
        comment_en TEXT,
        material_category_id BIGINT NOT NULL REFERENCES material_categories(id),
        assortment_type_id BIGINT NOT NULL REFERENCES assortment_types(id),
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS operation_types (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        name TEXT NOT NULL,
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS methods (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        name TEXT NOT NULL,
        operation_type_id BIGINT NOT NULL REFERENCES operation_types(id),
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    "CREATE TABLE IF NOT EXISTS machine_types (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT REFERENCES enterprises(id) ON DELETE CASCADE,
        is_general BOOLEAN NOT NULL DEFAULT FALSE,
        name TEXT NOT NULL,
        method_id BIGINT NOT NULL REFERENCES methods(id),
        CHECK (is_general = (enterprise_id IS NULL))
    )",
    // Tenant-only operational data.
    "CREATE TABLE IF NOT EXISTS machines (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        machine_type_id BIGINT NOT NULL REFERENCES machine_types(id),
        count INTEGER NOT NULL DEFAULT 1,
        x DOUBLE PRECISION NOT NULL,
        y DOUBLE PRECISION NOT NULL,
        z DOUBLE PRECISION NOT NULL,
        h DOUBLE PRECISION NOT NULL,
        d DOUBLE PRECISION NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS toolings (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        mark TEXT NOT NULL,
        gost TEXT NOT NULL,
        machine_id BIGINT NOT NULL REFERENCES machines(id) ON DELETE CASCADE,
        shank_height DOUBLE PRECISION NOT NULL,
        width DOUBLE PRECISION NOT NULL,
        length DOUBLE PRECISION NOT NULL,
        overhang DOUBLE PRECISION NOT NULL,
        working_height DOUBLE PRECISION NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tools (
        id BIGSERIAL PRIMARY KEY,
        enterprise_id BIGINT NOT NULL REFERENCES enterprises(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        mark TEXT NOT NULL,
        gost TEXT NOT NULL,
        machine_id BIGINT NOT NULL REFERENCES machines(id) ON DELETE CASCADE,
        cone DOUBLE PRECISION NOT NULL,
        clearance DOUBLE PRECISION NOT NULL,
        length DOUBLE PRECISION NOT NULL,
        max_cut DOUBLE PRECISION NOT NULL,
        feed DOUBLE PRECISION NOT NULL
    )",
];

// Per-tenant uniqueness backstops. NULLS NOT DISTINCT makes the index also
// guard the general rows (enterprise_id IS NULL) against duplicates.
const INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_material_categories_scope_name \
     ON material_categories (enterprise_id, name) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_gosts_scope_number \
     ON gosts (enterprise_id, number) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_assortment_types_scope_name \
     ON assortment_types (enterprise_id, name) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_gost_assortments_scope_pair \
     ON gost_assortments (enterprise_id, gost_id, assortment_type_id) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_materials_scope_brand \
     ON materials (enterprise_id, brand) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_operation_types_scope_name \
     ON operation_types (enterprise_id, name) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_methods_scope_name \
     ON methods (enterprise_id, name) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_machine_types_scope_name \
     ON machine_types (enterprise_id, name) NULLS NOT DISTINCT",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_machines_scope_name \
     ON machines (enterprise_id, name)",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_toolings_scope_name \
     ON toolings (enterprise_id, name)",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_tools_scope_name \
     ON tools (enterprise_id, name)",
    "CREATE INDEX IF NOT EXISTS ix_refresh_tokens_user ON refresh_tokens (user_id)",
    "CREATE INDEX IF NOT EXISTS ix_enterprise_members_enterprise \
     ON enterprise_members (enterprise_id)",
];

pub async fn init_schema(pool: &PgPool) -> Result<()> {
    for (name, variants) in ENUM_TYPES {
        // CREATE TYPE has no IF NOT EXISTS; swallow the duplicate instead.
        let stmt = format!(
            "DO $$ BEGIN \
                CREATE TYPE {name} AS ENUM ({variants}); \
             EXCEPTION WHEN duplicate_object THEN NULL; \
             END $$"
        );
        sqlx::query(&stmt).execute(pool).await?;
    }
    for stmt in TABLES {
        sqlx::query(stmt).execute(pool).await?;
    }
    for stmt in INDEXES {
        sqlx::query(stmt).execute(pool).await?;
    }
    tracing::info!("database schema initialized");
    Ok(())
}
