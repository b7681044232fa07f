//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use webauthz_core::config::StoreConfig;
use webauthz_core::error::AppError;
use webauthz_core::result::AppResult;
use webauthz_core::traits::TokenDatabase;
use webauthz_core::types::TokenRecord;

/// Store manager that wraps the configured token store.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner token store.
    inner: Arc<dyn TokenDatabase>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        config.validate()?;

        let inner: Arc<dyn TokenDatabase> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis token store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                let store =
                    crate::redis::RedisTokenStore::new(client, config.redis.record_ttl_seconds);
                Arc::new(store)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory token store");
                Arc::new(crate::memory::MemoryTokenStore::new(&config.memory)?)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl TokenDatabase for StoreManager {
    async fn create_token(&self, index: &str, record: &TokenRecord) -> AppResult<bool> {
        self.inner.create_token(index, record).await
    }

    async fn fetch_token(&self, index: &str) -> AppResult<Option<TokenRecord>> {
        self.inner.fetch_token(index).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
