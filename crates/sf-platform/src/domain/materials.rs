//! Material Catalog Entities
//!
//! Classification and reference data in the shared visibility regime: each
//! row is either a system-wide general default or private to one enterprise.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "material_type", rename_all = "snake_case")]
pub enum MaterialType {
    Ferrous,
    Nonferrous,
    Nonmetallic,
}

// --- MaterialCategory ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCategory {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub name: String,
    pub material_type: MaterialType,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaterialCategoryCreate {
    pub name: String,
    pub material_type: MaterialType,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaterialCategoryUpdate {
    pub name: Option<String>,
    pub material_type: Option<MaterialType>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCategoryFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub material_type: Option<MaterialType>,
}

// --- Gost ---

/// A GOST standard, keyed by its number.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Gost {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub number: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GostCreate {
    pub number: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GostUpdate {
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GostFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub number: Option<String>,
}

// --- AssortmentType ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssortmentType {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub name: String,
    pub gost_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssortmentTypeCreate {
    pub name: String,
    pub gost_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssortmentTypeUpdate {
    pub name: Option<String>,
    pub gost_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssortmentTypeFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub gost_id: Option<i64>,
}

// --- GostAssortment ---

/// Link row between a GOST standard and an assortment type.
///
/// Its uniqueness key is the `(gost_id, assortment_type_id)` pair rather
/// than a name column.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GostAssortment {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub gost_id: i64,
    pub assortment_type_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GostAssortmentCreate {
    pub gost_id: i64,
    pub assortment_type_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GostAssortmentUpdate {
    pub gost_id: Option<i64>,
    pub assortment_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GostAssortmentFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub gost_id: Option<i64>,
    pub assortment_type_id: Option<i64>,
}

// --- Material ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub brand: String,
    pub width: f64,
    pub height: f64,
    pub strength: f64,
    pub length: f64,
    pub density: f64,
    pub hardness: f64,
    pub tear_resistance: f64,
    pub elongation: f64,
    pub comment: Option<String>,
    pub comment_en: Option<String>,
    pub material_category_id: i64,
    pub assortment_type_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaterialCreate {
    pub brand: String,
    pub width: f64,
    pub height: f64,
    pub strength: f64,
    pub length: f64,
    pub density: f64,
    pub hardness: f64,
    pub tear_resistance: f64,
    pub elongation: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub comment_en: Option<String>,
    pub material_category_id: i64,
    pub assortment_type_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaterialUpdate {
    pub brand: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub strength: Option<f64>,
    pub length: Option<f64>,
    pub density: Option<f64>,
    pub hardness: Option<f64>,
    pub tear_resistance: Option<f64>,
    pub elongation: Option<f64>,
    pub comment: Option<String>,
    pub comment_en: Option<String>,
    pub material_category_id: Option<i64>,
    pub assortment_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub brand: Option<String>,
    pub material_category_id: Option<i64>,
    pub assortment_type_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_create_rejects_visibility_fields() {
        // Visibility is set by the system; a smuggled flag is a validation error.
        let json = r#"{"brand":"St3","width":1.0,"height":1.0,"strength":1.0,
            "length":1.0,"density":1.0,"hardness":1.0,"tearResistance":1.0,
            "elongation":1.0,"materialCategoryId":1,"assortmentTypeId":1,
            "isGeneral":true}"#;
        assert!(serde_json::from_str::<MaterialCreate>(json).is_err());

        let json = r#"{"brand":"St3","enterpriseId":9}"#;
        assert!(serde_json::from_str::<MaterialUpdate>(json).is_err());
    }

    #[test]
    fn test_material_type_serialization() {
        assert_eq!(
            serde_json::to_string(&MaterialType::Nonferrous).unwrap(),
            "\"NONFERROUS\""
        );
    }
}
