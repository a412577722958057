//! Column contracts for the catalog entities.
//!
//! One [`ScopedEntity`] impl per catalog type: the uniqueness-key predicate,
//! the insert column list and values, the updatable fields, and the list
//! filters. The generic repos in [`super::scoped`] own the query shapes.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::{
    AssortmentType, AssortmentTypeCreate, AssortmentTypeFilter, AssortmentTypeUpdate, Gost,
    GostAssortment, GostAssortmentCreate, GostAssortmentFilter, GostAssortmentUpdate, GostCreate,
    GostFilter, GostUpdate, Machine, MachineCreate, MachineFilter, MachineType, MachineTypeCreate,
    MachineTypeFilter, MachineTypeUpdate, MachineUpdate, Material, MaterialCategory,
    MaterialCategoryCreate, MaterialCategoryFilter, MaterialCategoryUpdate, MaterialCreate,
    MaterialFilter, MaterialUpdate, Method, MethodCreate, MethodFilter, MethodUpdate,
    OperationType, OperationTypeCreate, OperationTypeFilter, OperationTypeUpdate, Tool,
    ToolCreate, ToolFilter, ToolUpdate, Tooling, ToolingCreate, ToolingFilter, ToolingUpdate,
};
use crate::repository::scoped::{
    push_any, push_eq, push_ilike, push_key, push_set, ScopedEntity, SharedEntity, TenantEntity,
};

// --- shared regime ---

impl ScopedEntity for MaterialCategory {
    const TABLE: &'static str = "material_categories";
    const ENTITY: &'static str = "material category";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str = "name, material_type";

    type Create = MaterialCategoryCreate;
    type Update = MaterialCategoryUpdate;
    type Filter = MaterialCategoryFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.material_type);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "material_type", &update.material_type);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_eq(qb, "material_type", &filter.material_type);
    }
}

impl SharedEntity for MaterialCategory {}

impl ScopedEntity for Gost {
    const TABLE: &'static str = "gosts";
    const ENTITY: &'static str = "gost";
    const KEY_FIELD: &'static str = "number";
    const INSERT_COLUMNS: &'static str = "number";

    type Create = GostCreate;
    type Update = GostUpdate;
    type Filter = GostFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("number = ");
        qb.push_bind(create.number.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "number", &update.number)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.number.clone());
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "number", &update.number);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "number", &filter.number);
    }
}

impl SharedEntity for Gost {}

impl ScopedEntity for AssortmentType {
    const TABLE: &'static str = "assortment_types";
    const ENTITY: &'static str = "assortment type";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str = "name, gost_id";

    type Create = AssortmentTypeCreate;
    type Update = AssortmentTypeUpdate;
    type Filter = AssortmentTypeFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.gost_id);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "gost_id", &update.gost_id);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_eq(qb, "gost_id", &filter.gost_id);
    }
}

impl SharedEntity for AssortmentType {}

impl ScopedEntity for GostAssortment {
    const TABLE: &'static str = "gost_assortments";
    const ENTITY: &'static str = "gost assortment";
    const KEY_FIELD: &'static str = "gost and assortment type pair";
    const INSERT_COLUMNS: &'static str = "gost_id, assortment_type_id";

    type Create = GostAssortmentCreate;
    type Update = GostAssortmentUpdate;
    type Filter = GostAssortmentFilter;

    // Composite key: the pair, not a single column.
    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("gost_id = ");
        qb.push_bind(create.gost_id);
        qb.push(" AND assortment_type_id = ");
        qb.push_bind(create.assortment_type_id);
    }

    // A pair is only checkable when the update replaces both halves; a
    // half-pair rename falls through to the unique index.
    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        match (update.gost_id, update.assortment_type_id) {
            (Some(gost_id), Some(assortment_type_id)) => {
                qb.push("gost_id = ");
                qb.push_bind(gost_id);
                qb.push(" AND assortment_type_id = ");
                qb.push_bind(assortment_type_id);
                true
            }
            _ => false,
        }
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.gost_id);
        qb.push(", ");
        qb.push_bind(create.assortment_type_id);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "gost_id", &update.gost_id);
        push_set(qb, &mut any, "assortment_type_id", &update.assortment_type_id);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_eq(qb, "gost_id", &filter.gost_id);
        push_eq(qb, "assortment_type_id", &filter.assortment_type_id);
    }
}

impl SharedEntity for GostAssortment {}

impl ScopedEntity for Material {
    const TABLE: &'static str = "materials";
    const ENTITY: &'static str = "material";
    const KEY_FIELD: &'static str = "brand";
    const INSERT_COLUMNS: &'static str = "brand, width, height, strength, length, density, \
         hardness, tear_resistance, elongation, comment, comment_en, material_category_id, \
         assortment_type_id";

    type Create = MaterialCreate;
    type Update = MaterialUpdate;
    type Filter = MaterialFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("brand = ");
        qb.push_bind(create.brand.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "brand", &update.brand)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.brand.clone());
        qb.push(", ");
        qb.push_bind(create.width);
        qb.push(", ");
        qb.push_bind(create.height);
        qb.push(", ");
        qb.push_bind(create.strength);
        qb.push(", ");
        qb.push_bind(create.length);
        qb.push(", ");
        qb.push_bind(create.density);
        qb.push(", ");
        qb.push_bind(create.hardness);
        qb.push(", ");
        qb.push_bind(create.tear_resistance);
        qb.push(", ");
        qb.push_bind(create.elongation);
        qb.push(", ");
        qb.push_bind(create.comment.clone());
        qb.push(", ");
        qb.push_bind(create.comment_en.clone());
        qb.push(", ");
        qb.push_bind(create.material_category_id);
        qb.push(", ");
        qb.push_bind(create.assortment_type_id);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "brand", &update.brand);
        push_set(qb, &mut any, "width", &update.width);
        push_set(qb, &mut any, "height", &update.height);
        push_set(qb, &mut any, "strength", &update.strength);
        push_set(qb, &mut any, "length", &update.length);
        push_set(qb, &mut any, "density", &update.density);
        push_set(qb, &mut any, "hardness", &update.hardness);
        push_set(qb, &mut any, "tear_resistance", &update.tear_resistance);
        push_set(qb, &mut any, "elongation", &update.elongation);
        push_set(qb, &mut any, "comment", &update.comment);
        push_set(qb, &mut any, "comment_en", &update.comment_en);
        push_set(qb, &mut any, "material_category_id", &update.material_category_id);
        push_set(qb, &mut any, "assortment_type_id", &update.assortment_type_id);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "brand", &filter.brand);
        push_eq(qb, "material_category_id", &filter.material_category_id);
        push_eq(qb, "assortment_type_id", &filter.assortment_type_id);
    }
}

impl SharedEntity for Material {}

impl ScopedEntity for OperationType {
    const TABLE: &'static str = "operation_types";
    const ENTITY: &'static str = "operation type";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str = "name";

    type Create = OperationTypeCreate;
    type Update = OperationTypeUpdate;
    type Filter = OperationTypeFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
    }
}

impl SharedEntity for OperationType {}

impl ScopedEntity for Method {
    const TABLE: &'static str = "methods";
    const ENTITY: &'static str = "method";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str = "name, operation_type_id";

    type Create = MethodCreate;
    type Update = MethodUpdate;
    type Filter = MethodFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.operation_type_id);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "operation_type_id", &update.operation_type_id);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_eq(qb, "operation_type_id", &filter.operation_type_id);
    }
}

impl SharedEntity for Method {}

impl ScopedEntity for MachineType {
    const TABLE: &'static str = "machine_types";
    const ENTITY: &'static str = "machine type";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str = "name, method_id";

    type Create = MachineTypeCreate;
    type Update = MachineTypeUpdate;
    type Filter = MachineTypeFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.method_id);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "method_id", &update.method_id);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_eq(qb, "method_id", &filter.method_id);
    }
}

impl SharedEntity for MachineType {}

// --- tenant-only regime ---

impl ScopedEntity for Machine {
    const TABLE: &'static str = "machines";
    const ENTITY: &'static str = "machine";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str = "name, machine_type_id, count, x, y, z, h, d";

    type Create = MachineCreate;
    type Update = MachineUpdate;
    type Filter = MachineFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.machine_type_id);
        qb.push(", ");
        qb.push_bind(create.count);
        qb.push(", ");
        qb.push_bind(create.x);
        qb.push(", ");
        qb.push_bind(create.y);
        qb.push(", ");
        qb.push_bind(create.z);
        qb.push(", ");
        qb.push_bind(create.h);
        qb.push(", ");
        qb.push_bind(create.d);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "machine_type_id", &update.machine_type_id);
        push_set(qb, &mut any, "count", &update.count);
        push_set(qb, &mut any, "x", &update.x);
        push_set(qb, &mut any, "y", &update.y);
        push_set(qb, &mut any, "z", &update.z);
        push_set(qb, &mut any, "h", &update.h);
        push_set(qb, &mut any, "d", &update.d);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_eq(qb, "machine_type_id", &filter.machine_type_id);
    }
}

impl TenantEntity for Machine {}

impl ScopedEntity for Tooling {
    const TABLE: &'static str = "toolings";
    const ENTITY: &'static str = "tooling";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str =
        "name, mark, gost, machine_id, shank_height, width, length, overhang, working_height";

    type Create = ToolingCreate;
    type Update = ToolingUpdate;
    type Filter = ToolingFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.mark.clone());
        qb.push(", ");
        qb.push_bind(create.gost.clone());
        qb.push(", ");
        qb.push_bind(create.machine_id);
        qb.push(", ");
        qb.push_bind(create.shank_height);
        qb.push(", ");
        qb.push_bind(create.width);
        qb.push(", ");
        qb.push_bind(create.length);
        qb.push(", ");
        qb.push_bind(create.overhang);
        qb.push(", ");
        qb.push_bind(create.working_height);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "mark", &update.mark);
        push_set(qb, &mut any, "gost", &update.gost);
        push_set(qb, &mut any, "machine_id", &update.machine_id);
        push_set(qb, &mut any, "shank_height", &update.shank_height);
        push_set(qb, &mut any, "width", &update.width);
        push_set(qb, &mut any, "length", &update.length);
        push_set(qb, &mut any, "overhang", &update.overhang);
        push_set(qb, &mut any, "working_height", &update.working_height);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_ilike(qb, "mark", &filter.mark);
        push_eq(qb, "machine_id", &filter.machine_id);
    }
}

impl TenantEntity for Tooling {}

impl ScopedEntity for Tool {
    const TABLE: &'static str = "tools";
    const ENTITY: &'static str = "tool";
    const KEY_FIELD: &'static str = "name";
    const INSERT_COLUMNS: &'static str =
        "name, mark, gost, machine_id, cone, clearance, length, max_cut, feed";

    type Create = ToolCreate;
    type Update = ToolUpdate;
    type Filter = ToolFilter;

    fn push_unique_check(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push("name = ");
        qb.push_bind(create.name.clone());
    }

    fn push_update_unique_check(
        qb: &mut QueryBuilder<'_, Postgres>,
        update: &Self::Update,
    ) -> bool {
        push_key(qb, "name", &update.name)
    }

    fn push_insert_values(qb: &mut QueryBuilder<'_, Postgres>, create: &Self::Create) {
        qb.push_bind(create.name.clone());
        qb.push(", ");
        qb.push_bind(create.mark.clone());
        qb.push(", ");
        qb.push_bind(create.gost.clone());
        qb.push(", ");
        qb.push_bind(create.machine_id);
        qb.push(", ");
        qb.push_bind(create.cone);
        qb.push(", ");
        qb.push_bind(create.clearance);
        qb.push(", ");
        qb.push_bind(create.length);
        qb.push(", ");
        qb.push_bind(create.max_cut);
        qb.push(", ");
        qb.push_bind(create.feed);
    }

    fn push_updates(qb: &mut QueryBuilder<'_, Postgres>, update: &Self::Update) -> bool {
        let mut any = false;
        push_set(qb, &mut any, "name", &update.name);
        push_set(qb, &mut any, "mark", &update.mark);
        push_set(qb, &mut any, "gost", &update.gost);
        push_set(qb, &mut any, "machine_id", &update.machine_id);
        push_set(qb, &mut any, "cone", &update.cone);
        push_set(qb, &mut any, "clearance", &update.clearance);
        push_set(qb, &mut any, "length", &update.length);
        push_set(qb, &mut any, "max_cut", &update.max_cut);
        push_set(qb, &mut any, "feed", &update.feed);
        any
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter) {
        push_any(qb, "id", &filter.ids);
        push_ilike(qb, "name", &filter.name);
        push_ilike(qb, "mark", &filter.mark);
        push_eq(qb, "machine_id", &filter.machine_id);
    }
}

impl TenantEntity for Tool {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gost_assortment_unique_check_uses_pair() {
        let create = GostAssortmentCreate {
            gost_id: 4,
            assortment_type_id: 9,
        };
        let mut qb = QueryBuilder::new("");
        GostAssortment::push_unique_check(&mut qb, &create);
        assert_eq!(qb.sql(), "gost_id = $1 AND assortment_type_id = $2");
    }

    #[test]
    fn test_material_updates_skip_absent_fields() {
        let update = MaterialUpdate {
            brand: Some("St3".to_string()),
            hardness: Some(120.0),
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("UPDATE materials SET ");
        assert!(Material::push_updates(&mut qb, &update));
        assert_eq!(qb.sql(), "UPDATE materials SET brand = $1, hardness = $2");
    }

    #[test]
    fn test_gost_assortment_pair_rename_needs_both_halves() {
        let half = GostAssortmentUpdate {
            gost_id: Some(4),
            assortment_type_id: None,
        };
        let mut qb = QueryBuilder::new("");
        assert!(!GostAssortment::push_update_unique_check(&mut qb, &half));

        let both = GostAssortmentUpdate {
            gost_id: Some(4),
            assortment_type_id: Some(9),
        };
        let mut qb = QueryBuilder::new("");
        assert!(GostAssortment::push_update_unique_check(&mut qb, &both));
        assert_eq!(qb.sql(), "gost_id = $1 AND assortment_type_id = $2");
    }

    #[test]
    fn test_id_list_filter_uses_any() {
        let filter = GostFilter {
            ids: Some(vec![1, 2, 3]),
            ..Default::default()
        };
        let mut qb = QueryBuilder::new("SELECT * FROM gosts WHERE TRUE");
        Gost::push_filters(&mut qb, &filter);
        assert_eq!(qb.sql(), "SELECT * FROM gosts WHERE TRUE AND id = ANY($1)");
    }

    #[test]
    fn test_empty_update_pushes_nothing() {
        let mut qb = QueryBuilder::new("UPDATE gosts SET ");
        assert!(!Gost::push_updates(&mut qb, &GostUpdate::default()));
        assert_eq!(qb.sql(), "UPDATE gosts SET ");
    }
}
