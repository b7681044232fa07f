//! Store health check command.

use webauthz_core::config::AppConfig;
use webauthz_core::error::AppError;
use webauthz_core::traits::TokenDatabase;

use crate::output;

/// Execute the health check
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let store = super::create_store(config).await?;
    if store.health_check().await? {
        output::print_success(&format!("Token store '{}' is reachable", config.store.provider));
        Ok(())
    } else {
        Err(AppError::service_unavailable(format!(
            "Token store '{}' failed its health check",
            config.store.provider
        )))
    }
}
