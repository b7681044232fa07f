//! Redis token store implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use webauthz_core::error::{AppError, ErrorKind};
use webauthz_core::result::AppResult;
use webauthz_core::traits::TokenDatabase;
use webauthz_core::types::TokenRecord;

use super::client::RedisClient;

/// Redis-backed token store.
///
/// Records are stored as JSON strings. Creation uses `SET ... NX`, which makes
/// insert-if-absent atomic across every process sharing the Redis instance.
#[derive(Debug, Clone)]
pub struct RedisTokenStore {
    /// Redis client.
    client: RedisClient,
    /// Expiry applied to new records.
    record_ttl: Option<Duration>,
}

impl RedisTokenStore {
    /// Create a new Redis token store.
    pub fn new(client: RedisClient, record_ttl_seconds: Option<u64>) -> Self {
        Self {
            client,
            record_ttl: record_ttl_seconds.map(Duration::from_secs),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Database, format!("Redis error: {e}"), e)
    }
}

/// Serialize a record to the JSON string stored under its key.
fn encode_record(record: &TokenRecord) -> AppResult<String> {
    Ok(serde_json::to_string(record)?)
}

/// Parse a stored JSON string back into a record.
fn decode_record(raw: &str) -> AppResult<TokenRecord> {
    Ok(serde_json::from_str(raw)?)
}

/// `SET key value NX [EX ttl]`: replies `OK` when written, nil when the key
/// already exists.
fn set_if_absent(key: &str, value: &str, ttl: Option<Duration>) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value).arg("NX");
    if let Some(ttl) = ttl {
        cmd.arg("EX").arg(ttl.as_secs());
    }
    cmd
}

#[async_trait]
impl TokenDatabase for RedisTokenStore {
    async fn create_token(&self, index: &str, record: &TokenRecord) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(index);
        let value = encode_record(record)?;
        let mut conn = self.client.conn_mut();

        let result: Option<String> = set_if_absent(&full_key, &value, self.record_ttl)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        if result.is_none() {
            debug!("Token index already present in Redis");
        }
        Ok(result.is_some())
    }

    async fn fetch_token(&self, index: &str) -> AppResult<Option<TokenRecord>> {
        let full_key = self.client.prefixed_key(index);
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;

        match raw {
            Some(json) => Ok(Some(decode_record(&json)?)),
            None => Ok(None),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::Arg;
    use serde_json::json;
    use webauthz_core::types::{Metadata, TokenCategory};

    use crate::redis::client::token_key;

    fn args(cmd: &redis::Cmd) -> Vec<String> {
        cmd.args_iter()
            .map(|arg| match arg {
                Arg::Simple(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                Arg::Cursor => "<cursor>".to_string(),
            })
            .collect()
    }

    fn record() -> TokenRecord {
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
    fn test_record_stored_as_flat_json() {
        let raw = encode_record(&record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!({"type": "access", "client_id": "c1", "scope": "read", "token_buffer_length": 96})
        );
        assert_eq!(decode_record(&raw).unwrap(), record());
    }

    #[test]
    fn test_decode_rejects_corrupt_value() {
        let err = decode_record("{\"type\":\"access\"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(decode_record("{\"client_id\":\"c1\"}").is_err());
    }

    #[test]
    fn test_set_if_absent_without_ttl() {
        let key = token_key("webauthz:", "access:c1:hash");
        let cmd = set_if_absent(&key, "{}", None);
        assert_eq!(
            args(&cmd),
            ["SET", "webauthz:token:access:c1:hash", "{}", "NX"]
        );
    }

    #[test]
    fn test_set_if_absent_with_ttl() {
        let cmd = set_if_absent("k", "v", Some(Duration::from_secs(3600)));
        assert_eq!(args(&cmd), ["SET", "k", "v", "NX", "EX", "3600"]);
    }
}
