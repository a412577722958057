//! Company Registry Client
//!
//! Autocomplete lookups against the external company registry, used by the
//! onboarding form to prefill legal-entity details from a partial name or
//! tax identifier.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::RegistryConfig;
use crate::error::{Result, ServiceError};

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    suggestions: Vec<RawSuggestion>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    value: String,
    data: RawCompany,
}

#[derive(Debug, Deserialize)]
struct RawCompany {
    inn: Option<String>,
    ogrn: Option<String>,
    kpp: Option<String>,
    management: Option<RawManagement>,
    opf: Option<RawOpf>,
}

#[derive(Debug, Deserialize)]
struct RawManagement {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOpf {
    full: Option<String>,
    short: Option<String>,
}

/// One registry match, flattened to the fields the onboarding form needs.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySuggestion {
    pub name: String,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub kpp: Option<String>,
    pub opf_full: Option<String>,
    pub opf_short: Option<String>,
    pub management_name: Option<String>,
}

#[derive(Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    pub fn new(http: reqwest::Client, config: RegistryConfig) -> Self {
        Self { http, config }
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<CompanySuggestion>> {
        if self.config.api_url.is_empty() {
            return Err(ServiceError::Upstream {
                message: "company registry lookup is not configured".to_string(),
            });
        }
        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", format!("Token {}", self.config.token))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .map_err(|e| ServiceError::Upstream {
                message: format!("company registry unreachable: {e}"),
            })?;
        if !response.status().is_success() {
            return Err(ServiceError::Upstream {
                message: format!("company registry returned {}", response.status()),
            });
        }
        let parsed: SuggestResponse =
            response.json().await.map_err(|e| ServiceError::Upstream {
                message: format!("company registry returned malformed response: {e}"),
            })?;
        Ok(parsed
            .suggestions
            .into_iter()
            .map(|s| CompanySuggestion {
                name: s.value,
                inn: s.data.inn,
                ogrn: s.data.ogrn,
                kpp: s.data.kpp,
                opf_full: s.data.opf.as_ref().and_then(|o| o.full.clone()),
                opf_short: s.data.opf.as_ref().and_then(|o| o.short.clone()),
                management_name: s.data.management.and_then(|m| m.name),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_parsing() {
        let raw = r#"{
            "suggestions": [{
                "value": "OOO Vector",
                "data": {
                    "inn": "3906123456",
                    "ogrn": "1023900000000",
                    "kpp": "390601001",
                    "management": {"name": "Petrov Ivan"},
                    "opf": {"full": "Limited liability company", "short": "LLC"}
                }
            }]
        }"#;
        let parsed: SuggestResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.suggestions.len(), 1);
        assert_eq!(parsed.suggestions[0].data.inn.as_deref(), Some("3906123456"));
    }

    #[test]
    fn test_suggestion_parsing_with_sparse_data() {
        let raw = r#"{"suggestions": [{"value": "IP Sidorov", "data": {}}]}"#;
        let parsed: SuggestResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.suggestions[0].data.inn.is_none());
        assert!(parsed.suggestions[0].data.opf.is_none());
    }
}
