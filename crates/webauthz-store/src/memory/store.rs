//! In-memory token store implementation using the moka crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use moka::notification::RemovalCause;
use tracing::{debug, warn};

use webauthz_core::config::MemoryStoreConfig;
use webauthz_core::error::AppError;
use webauthz_core::result::AppResult;
use webauthz_core::traits::TokenDatabase;
use webauthz_core::types::TokenRecord;

/// In-memory token store using moka.
///
/// Suitable for tests and single-process deployments. Records are lost on
/// restart. The cache itself is unbounded, so an accepted record is never
/// evicted; `max_capacity` is enforced by refusing new creates instead.
#[derive(Debug, Clone)]
pub struct MemoryTokenStore {
    /// The underlying moka cache, keyed by token index.
    records: Cache<String, TokenRecord>,
    /// Records admitted and not yet expired.
    held: Arc<AtomicU64>,
    /// Hard limit on `held`.
    max_capacity: Option<u64>,
}

impl MemoryTokenStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &MemoryStoreConfig) -> Self {
        let held = Arc::new(AtomicU64::new(0));
        let listener_held = Arc::clone(&held);

        let mut builder = Cache::builder().eviction_listener(
            move |_key: Arc<String>, _value: TokenRecord, cause: RemovalCause| {
                if cause != RemovalCause::Replaced {
                    listener_held.fetch_sub(1, Ordering::AcqRel);
                }
            },
        );
        if let Some(ttl) = config.time_to_live_seconds {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }

        Self {
            records: builder.build(),
            held,
            max_capacity: config.max_capacity,
        }
    }

    /// Reserves a slot under the capacity limit.
    async fn reserve(&self, limit: u64) -> bool {
        if self.held.fetch_add(1, Ordering::AcqRel) < limit {
            return true;
        }
        self.held.fetch_sub(1, Ordering::AcqRel);

        // Expired records are only released once pending maintenance runs.
        self.records.run_pending_tasks().await;
        if self.held.fetch_add(1, Ordering::AcqRel) < limit {
            return true;
        }
        self.held.fetch_sub(1, Ordering::AcqRel);
        false
    }

    /// Number of records currently held.
    pub async fn len(&self) -> u64 {
        self.records.run_pending_tasks().await;
        self.records.entry_count()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::build(&MemoryStoreConfig::default())
    }
}

#[async_trait]
impl TokenDatabase for MemoryTokenStore {
    async fn create_token(&self, index: &str, record: &TokenRecord) -> AppResult<bool> {
        match self.max_capacity {
            Some(limit) => {
                if !self.reserve(limit).await {
                    warn!(limit, "In-memory token store is full");
                    return Err(AppError::service_unavailable(format!(
                        "In-memory token store is full ({limit} records)"
                    )));
                }
            }
            None => {
                self.held.fetch_add(1, Ordering::AcqRel);
            }
        }

        let value = record.clone();
        let entry = self
            .records
            .entry(index.to_string())
            .or_insert_with(async move { value })
            .await;

        if !entry.is_fresh() {
            self.held.fetch_sub(1, Ordering::AcqRel);
            debug!("Token index already present, refusing to overwrite");
        }
        Ok(entry.is_fresh())
    }

    async fn fetch_token(&self, index: &str) -> AppResult<Option<TokenRecord>> {
        Ok(self.records.get(index).await)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
