//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file plus `WEBAUTHZ__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod logging;
pub mod store;
pub mod token;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::store::{MemoryStoreConfig, RedisStoreConfig, StoreConfig};
pub use self::token::TokenConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token format settings.
    #[serde(default)]
    pub token: TokenConfig,
    /// Persistence backend settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; every field has a default. Environment variables
    /// use the `WEBAUTHZ` prefix and `__` as the section separator, e.g.
    /// `WEBAUTHZ__STORE__PROVIDER=redis`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("WEBAUTHZ")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.token.validate()?;
        config.store.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load("does/not/exist").unwrap();
        assert_eq!(config.token.separator, ':');
        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_deserialize_sections() {
        let raw = r#"{
            "token": { "separator": "~" },
            "store": { "provider": "redis", "redis": { "url": "redis://cache:6379" } }
        }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.token.separator, '~');
        assert_eq!(config.store.provider, "redis");
        assert_eq!(config.store.redis.url, "redis://cache:6379");
        assert_eq!(config.store.redis.key_prefix, "webauthz:");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_rejects_zero_ttl() {
        let path = std::env::temp_dir()
            .join(format!("webauthz-zero-ttl-{}.toml", std::process::id()));
        std::fs::write(&path, "[store.memory]\ntime_to_live_seconds = 0\n").unwrap();

        let err = AppConfig::load(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
