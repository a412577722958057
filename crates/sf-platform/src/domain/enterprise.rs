//! Enterprise Entities
//!
//! An enterprise is the tenant: the unit of data isolation for the catalog.
//! It is created only through the onboarding workflow, atomically with its
//! contact record, type-specific profile, and owner membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declared legal form of an enterprise.
///
/// The three variants are authoritative: `SoleProprietor` carries a legal
/// entity row only, `LegalEntity` additionally carries an extended profile
/// row. They are never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "enterprise_type", rename_all = "snake_case")]
pub enum EnterpriseType {
    Individual,
    SoleProprietor,
    LegalEntity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "member_role", rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Admin,
    Manager,
    Employee,
    Intern,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "member_status", rename_all = "snake_case")]
pub enum MemberStatus {
    Invited,
    Active,
    Suspended,
    Left,
    Removed,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub enterprise_type: EnterpriseType,
}

/// Join record binding a user to an enterprise.
///
/// A user holds at most one membership row; `UNIQUE(user_id)` in the schema
/// is the race-closing backstop.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseMember {
    pub id: i64,
    pub enterprise_id: i64,
    pub user_id: i64,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub enterprise_id: i64,
    pub phone: String,
    pub city: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndividualProfile {
    pub id: i64,
    pub enterprise_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalEntity {
    pub id: i64,
    pub enterprise_id: i64,
    /// Tax identifier; invite-by-identifier keys on it.
    pub inn: String,
    pub ogrn: String,
    pub management_name: Option<String>,
}

/// Extended profile carried only by the `LegalEntity` enterprise type.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalEntityProfile {
    pub id: i64,
    pub legal_entity_id: i64,
    pub org_name: String,
    pub kpp: String,
    pub opf_full: String,
    pub opf_short: String,
}

// --- onboarding payloads ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactForm {
    pub phone: String,
    pub city: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndividualForm {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LegalEntityProfileForm {
    pub org_name: String,
    pub kpp: String,
    pub opf_full: String,
    pub opf_short: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LegalEntityForm {
    pub inn: String,
    pub ogrn: String,
    #[serde(default)]
    pub management_name: Option<String>,
    /// Required for the `LegalEntity` enterprise type, absent otherwise.
    #[serde(default)]
    pub profile: Option<LegalEntityProfileForm>,
}

/// Full onboarding payload for the create-enterprise workflow.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEnterpriseRequest {
    pub name: String,
    pub enterprise_type: EnterpriseType,
    pub contact: ContactForm,
    #[serde(default)]
    pub individual: Option<IndividualForm>,
    #[serde(default)]
    pub legal_entity: Option<LegalEntityForm>,
}

/// Aggregate returned by enterprise reads.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseOut {
    #[serde(flatten)]
    pub enterprise: Enterprise,
    pub members: Vec<EnterpriseMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_profile: Option<IndividualProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<LegalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity_profile: Option<LegalEntityProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EnterpriseType::SoleProprietor).unwrap(),
            "\"SOLE_PROPRIETOR\""
        );
        assert_eq!(
            serde_json::to_string(&EnterpriseType::Individual).unwrap(),
            "\"INDIVIDUAL\""
        );
    }

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "name": "Acme",
            "enterpriseType": "INDIVIDUAL",
            "contact": {"phone": "1", "city": "Kaliningrad", "address": "Main st 1"},
            "individual": {"firstName": "Ivan", "lastName": "Petrov", "patronymic": "Ivanovich"}
        }"#;
        let req: CreateEnterpriseRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.enterprise_type, EnterpriseType::Individual);
        assert!(req.legal_entity.is_none());
        assert_eq!(req.contact.city, "Kaliningrad");
    }

    #[test]
    fn test_create_request_rejects_unknown_fields() {
        let json = r#"{"name": "Acme", "enterpriseType": "INDIVIDUAL",
            "contact": {"phone": "1", "city": "K", "address": "M"},
            "ownerId": 7}"#;
        assert!(serde_json::from_str::<CreateEnterpriseRequest>(json).is_err());
    }
}
