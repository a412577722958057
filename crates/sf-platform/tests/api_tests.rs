//! Platform API Integration Tests
//!
//! Tests for the router surface, the error envelope contract, and the JSON
//! shapes of the aggregates the API returns. Anything that needs a live
//! Postgres or Redis is covered by the repository unit tests instead.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::IntoResponse,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sf_platform::api;
use sf_platform::domain::{
    Contact, Enterprise, EnterpriseMember, EnterpriseOut, EnterpriseType, IndividualProfile,
    MemberRole, MemberStatus,
};
use sf_platform::error::ServiceError;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

mod router_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = api::router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = api::router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no-such-route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod error_contract_tests {
    use super::*;

    #[tokio::test]
    async fn test_unauthorized_envelope_and_challenge_header() {
        let response = ServiceError::AccessTokenExpired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "ACCESS_TOKEN_EXPIRED");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_conflict_envelope() {
        let response = ServiceError::Conflict {
            entity: "material",
            field: "brand",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(
            body["error"]["message"],
            "material with the same brand already exists"
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_masked() {
        let response = ServiceError::internal("pool exhausted at 10.0.0.3").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Internal server error");
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_forbidden_has_no_challenge_header() {
        let response = ServiceError::EnterpriseRequired.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "ENTERPRISE_REQUIRED");
    }
}

mod serialization_tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_enterprise_out_flattens_the_enterprise() {
        let out = EnterpriseOut {
            enterprise: Enterprise {
                id: 1,
                owner_id: 2,
                name: "Acme".to_string(),
                enterprise_type: EnterpriseType::Individual,
            },
            members: vec![EnterpriseMember {
                id: 10,
                enterprise_id: 1,
                user_id: 2,
                role: MemberRole::Owner,
                status: MemberStatus::Active,
                joined_at: Utc::now(),
            }],
            contact: Some(Contact {
                id: 5,
                enterprise_id: 1,
                phone: "+7 900 000-00-00".to_string(),
                city: "Kaliningrad".to_string(),
                address: "Main st 1".to_string(),
            }),
            individual_profile: Some(IndividualProfile {
                id: 7,
                enterprise_id: 1,
                first_name: "Ivan".to_string(),
                last_name: "Petrov".to_string(),
                patronymic: "Ivanovich".to_string(),
            }),
            legal_entity: None,
            legal_entity_profile: None,
        };
        let json = serde_json::to_value(&out).unwrap();

        // Enterprise fields sit at the top level, camelCased.
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["enterpriseType"], "INDIVIDUAL");
        assert_eq!(json["ownerId"], 2);
        assert_eq!(json["members"][0]["role"], "OWNER");
        assert_eq!(json["contact"]["city"], "Kaliningrad");
        // Absent profiles are omitted entirely, not nulled.
        assert!(json.get("legalEntity").is_none());
        assert!(json.get("legalEntityProfile").is_none());
    }
}
