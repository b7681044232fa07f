//! Token format configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Bearer token format settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Character joining the category, client id and secret fields.
    ///
    /// Changing this on a running deployment makes every previously issued
    /// token unparseable, and orphans every stored index built with the old
    /// separator. Pick one value per deployment and keep it.
    #[serde(default = "default_separator")]
    pub separator: char,
}

impl TokenConfig {
    /// Rejects separators that collide with the URL-safe base64 alphabet.
    pub fn validate(&self) -> Result<(), AppError> {
        let c = self.separator;
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c.is_whitespace() {
            return Err(AppError::configuration(format!(
                "Token separator '{c}' collides with the base64url alphabet"
            )));
        }
        Ok(())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

fn default_separator() -> char {
    ':'
}
