//! The persisted token record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::TokenCategory;

/// Opaque caller metadata stored alongside a token.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Record keys owned by the token service. Metadata may not use them.
pub const RESERVED_KEYS: [&str; 3] = ["type", "client_id", "token_buffer_length"];

/// Metadata key conventionally holding the RFC 3339 expiry of a token.
pub const NOT_AFTER_KEY: &str = "not_after";

/// The value stored at a token index.
///
/// Serialized flat: the three core fields sit beside the caller's metadata
/// keys, e.g. `{"type":"access","client_id":"c1","scope":"read","token_buffer_length":96}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token category.
    #[serde(rename = "type")]
    pub category: TokenCategory,
    /// Owning client.
    pub client_id: String,
    /// Length in bytes of the secret the bearer token carries.
    pub token_buffer_length: usize,
    /// Caller metadata, passed through unchanged.
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl TokenRecord {
    /// Looks up a metadata value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Parses the `not_after` metadata entry, if present and well-formed.
    ///
    /// The caller decides what to do with it; this crate never compares it
    /// against the clock.
    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata.get(NOT_AFTER_KEY)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> TokenRecord {
        let mut metadata = Metadata::new();
        metadata.insert("scope".to_string(), json!("read"));
        TokenRecord {
            category: TokenCategory::Access,
            client_id: "c1".to_string(),
            token_buffer_length: 96,
            metadata,
        }
    }

    #[test]
    fn test_serializes_flat() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({"type": "access", "client_id": "c1", "scope": "read", "token_buffer_length": 96})
        );
    }

    #[test]
    fn test_deserialize_collects_metadata() {
        let raw = r#"{"type":"grant","client_id":"c2","token_buffer_length":96,"scope":"write","n":3}"#;
        let record: TokenRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.category, TokenCategory::Grant);
        assert_eq!(record.client_id, "c2");
        assert_eq!(record.metadata.len(), 2);
        assert_eq!(record.get("n"), Some(&json!(3)));
    }

    #[test]
    fn test_not_after() {
        let mut record = sample();
        assert!(record.not_after().is_none());

        record
            .metadata
            .insert(NOT_AFTER_KEY.to_string(), json!("2030-01-01T00:00:00Z"));
        let not_after = record.not_after().unwrap();
        assert_eq!(not_after.to_rfc3339(), "2030-01-01T00:00:00+00:00");

        record
            .metadata
            .insert(NOT_AFTER_KEY.to_string(), json!("tomorrow"));
        assert!(record.not_after().is_none());
    }
}
