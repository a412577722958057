//! Domain Models
//!
//! Core entities for users, enterprises, and the tenant-scoped catalog.
//! All rows use `BIGSERIAL` integer ids.

pub mod enterprise;
pub mod machines;
pub mod materials;
pub mod user;

pub use enterprise::*;
pub use machines::*;
pub use materials::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Deserializes a comma-separated `ids` query parameter into an id list.
pub(crate) fn id_list<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i64>().map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "id_list")]
        ids: Option<Vec<i64>>,
    }

    #[test]
    fn test_id_list_parses_comma_separated() {
        let params: Params = serde_json::from_str(r#"{"ids": "1,2, 30"}"#).unwrap();
        assert_eq!(params.ids, Some(vec![1, 2, 30]));
    }

    #[test]
    fn test_id_list_absent_is_none() {
        let params: Params = serde_json::from_str("{}").unwrap();
        assert_eq!(params.ids, None);
    }

    #[test]
    fn test_id_list_rejects_garbage() {
        assert!(serde_json::from_str::<Params>(r#"{"ids": "1,x"}"#).is_err());
    }
}
