//! Token store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Top-level persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific store configuration.
    #[serde(default)]
    pub redis: RedisStoreConfig,
    /// In-memory store configuration.
    #[serde(default)]
    pub memory: MemoryStoreConfig,
}

impl StoreConfig {
    /// Rejects backend settings under which a stored record would not
    /// survive until it is verified.
    pub fn validate(&self) -> Result<(), AppError> {
        self.memory.validate()?;
        self.redis.validate()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisStoreConfig::default(),
            memory: MemoryStoreConfig::default(),
        }
    }
}

/// Redis store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all token records.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Expiry applied to stored records, if any. Must be positive.
    #[serde(default)]
    pub record_ttl_seconds: Option<u64>,
}

impl RedisStoreConfig {
    /// Rejects a zero record TTL, which Redis refuses for `SET ... EX`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.record_ttl_seconds == Some(0) {
            return Err(AppError::configuration(
                "store.redis.record_ttl_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
            record_ttl_seconds: None,
        }
    }
}

/// In-memory store backend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    /// Hard limit on the number of records. Creates beyond it are refused;
    /// stored records are never evicted to make room. `None` is unbounded.
    #[serde(default)]
    pub max_capacity: Option<u64>,
    /// Time-to-live for records in seconds. `None` keeps records for the
    /// life of the process.
    #[serde(default)]
    pub time_to_live_seconds: Option<u64>,
}

impl MemoryStoreConfig {
    /// Rejects a zero capacity or a zero TTL.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_capacity == Some(0) {
            return Err(AppError::configuration(
                "store.memory.max_capacity must be greater than zero",
            ));
        }
        if self.time_to_live_seconds == Some(0) {
            return Err(AppError::configuration(
                "store.memory.time_to_live_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "webauthz:".to_string()
}
