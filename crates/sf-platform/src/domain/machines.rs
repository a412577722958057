//! Machining Catalog Entities
//!
//! Operation types, methods, and machine types use the shared visibility
//! regime. Machines, toolings, and tools are operational data and always
//! belong to exactly one enterprise (tenant-only regime).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- OperationType (shared) ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationType {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperationTypeCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperationTypeUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationTypeFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
}

// --- Method (shared) ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub name: String,
    pub operation_type_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodCreate {
    pub name: String,
    pub operation_type_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodUpdate {
    pub name: Option<String>,
    pub operation_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub operation_type_id: Option<i64>,
}

// --- MachineType (shared) ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineType {
    pub id: i64,
    pub enterprise_id: Option<i64>,
    pub is_general: bool,
    pub name: String,
    pub method_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineTypeCreate {
    pub name: String,
    pub method_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineTypeUpdate {
    pub name: Option<String>,
    pub method_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineTypeFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub method_id: Option<i64>,
}

// --- Machine (tenant-only) ---

/// A machine on the floor; axis travels in mm.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: i64,
    pub enterprise_id: i64,
    pub name: String,
    pub machine_type_id: i64,
    pub count: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub h: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineCreate {
    pub name: String,
    pub machine_type_id: i64,
    #[serde(default = "default_count")]
    pub count: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub h: f64,
    pub d: f64,
}

fn default_count() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineUpdate {
    pub name: Option<String>,
    pub machine_type_id: Option<i64>,
    pub count: Option<i32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub h: Option<f64>,
    pub d: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub machine_type_id: Option<i64>,
}

// --- Tooling (tenant-only) ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tooling {
    pub id: i64,
    pub enterprise_id: i64,
    pub name: String,
    pub mark: String,
    pub gost: String,
    pub machine_id: i64,
    pub shank_height: f64,
    pub width: f64,
    pub length: f64,
    pub overhang: f64,
    pub working_height: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolingCreate {
    pub name: String,
    pub mark: String,
    pub gost: String,
    pub machine_id: i64,
    pub shank_height: f64,
    pub width: f64,
    pub length: f64,
    pub overhang: f64,
    pub working_height: f64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolingUpdate {
    pub name: Option<String>,
    pub mark: Option<String>,
    pub gost: Option<String>,
    pub machine_id: Option<i64>,
    pub shank_height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub overhang: Option<f64>,
    pub working_height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolingFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub mark: Option<String>,
    pub machine_id: Option<i64>,
}

// --- Tool (tenant-only) ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: i64,
    pub enterprise_id: i64,
    pub name: String,
    pub mark: String,
    pub gost: String,
    pub machine_id: i64,
    pub cone: f64,
    pub clearance: f64,
    pub length: f64,
    pub max_cut: f64,
    pub feed: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolCreate {
    pub name: String,
    pub mark: String,
    pub gost: String,
    pub machine_id: i64,
    pub cone: f64,
    pub clearance: f64,
    pub length: f64,
    pub max_cut: f64,
    pub feed: f64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolUpdate {
    pub name: Option<String>,
    pub mark: Option<String>,
    pub gost: Option<String>,
    pub machine_id: Option<i64>,
    pub cone: Option<f64>,
    pub clearance: Option<f64>,
    pub length: Option<f64>,
    pub max_cut: Option<f64>,
    pub feed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolFilter {
    /// Comma-separated id list.
    #[serde(default, deserialize_with = "super::id_list")]
    #[schema(value_type = Option<String>)]
    pub ids: Option<Vec<i64>>,
    pub name: Option<String>,
    pub mark: Option<String>,
    pub machine_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_create_default_count() {
        let json = r#"{"name":"16K20","machineTypeId":1,
            "x":1000.0,"y":500.0,"z":400.0,"h":300.0,"d":250.0}"#;
        let req: MachineCreate = serde_json::from_str(json).unwrap();
        assert_eq!(req.count, 1);
    }

    #[test]
    fn test_machine_update_rejects_tenant_move() {
        let json = r#"{"name":"16K20","enterpriseId":2}"#;
        assert!(serde_json::from_str::<MachineUpdate>(json).is_err());
    }
}
