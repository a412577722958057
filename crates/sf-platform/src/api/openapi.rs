//! OpenAPI Documentation
//!
//! Central OpenAPI specification for the platform APIs. The catalog routes
//! share one generic handler set, so they are described by the schema
//! components plus the uniform CRUD shape documented on the tag.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shopfloor Platform API",
        version = "1.0.0",
        description = "Accounts, enterprise onboarding, membership, and the \
                       tenant-scoped manufacturing catalog"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "user", description = "Registration and login"),
        (name = "auth", description = "Session introspection and refresh"),
        (name = "enterprise", description = "Onboarding, invitations, membership"),
        (name = "catalog", description = "Tenant-scoped catalog. Every resource exposes \
            GET /catalog/{resource}, POST /catalog/{resource}, and \
            GET/PUT/DELETE /catalog/{resource}/{id}")
    ),
    paths(
        // User API
        super::auth::register,
        super::auth::confirm_email,
        super::auth::login,
        super::auth::logout,
        // Auth API
        super::auth::me,
        super::auth::refresh,
        // Enterprise API
        super::enterprise::create,
        super::enterprise::personal,
        super::enterprise::generate_tokens,
        super::enterprise::list_tokens,
        super::enterprise::join_by_token,
        super::enterprise::join_by_email,
        super::enterprise::invite_by_email,
        super::enterprise::revoke_member,
        super::enterprise::suggest,
    ),
    components(schemas(
        crate::api::common::MessageResponse,
        crate::api::common::ErrorResponse,
        crate::api::common::ErrorDetail,
        crate::api::auth::LoginResponse,
        crate::api::enterprise::JoinByTokenRequest,
        crate::api::enterprise::TokensResponse,
        crate::domain::User,
        crate::domain::RegisterRequest,
        crate::domain::LoginRequest,
        crate::domain::Enterprise,
        crate::domain::EnterpriseType,
        crate::domain::EnterpriseMember,
        crate::domain::MemberRole,
        crate::domain::MemberStatus,
        crate::domain::Contact,
        crate::domain::IndividualProfile,
        crate::domain::LegalEntity,
        crate::domain::LegalEntityProfile,
        crate::domain::ContactForm,
        crate::domain::IndividualForm,
        crate::domain::LegalEntityForm,
        crate::domain::LegalEntityProfileForm,
        crate::domain::CreateEnterpriseRequest,
        crate::domain::EnterpriseOut,
        crate::domain::MaterialType,
        crate::domain::MaterialCategory,
        crate::domain::MaterialCategoryCreate,
        crate::domain::MaterialCategoryUpdate,
        crate::domain::Gost,
        crate::domain::GostCreate,
        crate::domain::GostUpdate,
        crate::domain::AssortmentType,
        crate::domain::AssortmentTypeCreate,
        crate::domain::AssortmentTypeUpdate,
        crate::domain::GostAssortment,
        crate::domain::GostAssortmentCreate,
        crate::domain::GostAssortmentUpdate,
        crate::domain::Material,
        crate::domain::MaterialCreate,
        crate::domain::MaterialUpdate,
        crate::domain::OperationType,
        crate::domain::OperationTypeCreate,
        crate::domain::OperationTypeUpdate,
        crate::domain::Method,
        crate::domain::MethodCreate,
        crate::domain::MethodUpdate,
        crate::domain::MachineType,
        crate::domain::MachineTypeCreate,
        crate::domain::MachineTypeUpdate,
        crate::domain::Machine,
        crate::domain::MachineCreate,
        crate::domain::MachineUpdate,
        crate::domain::Tooling,
        crate::domain::ToolingCreate,
        crate::domain::ToolingUpdate,
        crate::domain::Tool,
        crate::domain::ToolCreate,
        crate::domain::ToolUpdate,
        crate::service::CompanySuggestion,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_builds() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("/enterprise/create"));
        assert!(json.contains("/user/register"));
        assert!(json.contains("/auth/refresh"));
    }
}
