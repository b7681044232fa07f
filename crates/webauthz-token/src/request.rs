//! Mint requests.

use chrono::{DateTime, SecondsFormat, Utc};

use webauthz_core::types::{Metadata, NOT_AFTER_KEY, RESERVED_KEYS, TokenCategory};

use crate::error::TokenError;

/// Everything needed to mint one token.
///
/// ```
/// use webauthz_token::TokenRequest;
///
/// let request = TokenRequest::new("access", "c1").with("scope", "read");
/// assert_eq!(request.client_id, "c1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRequest {
    /// Token category, the first namespace component.
    pub category: TokenCategory,
    /// Owning client, the second namespace component.
    pub client_id: String,
    /// Opaque metadata copied into the stored record.
    pub metadata: Metadata,
}

impl TokenRequest {
    /// Creates a request with no metadata.
    pub fn new(category: impl Into<TokenCategory>, client_id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            client_id: client_id.into(),
            metadata: Metadata::new(),
        }
    }

    /// Adds one metadata entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Merges a metadata map into the request.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata.extend(metadata);
        self
    }

    /// Records an expiry the caller will enforce when the token is presented.
    pub fn not_after(self, at: DateTime<Utc>) -> Self {
        self.with(NOT_AFTER_KEY, at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Rejects requests that would produce an unparseable token or a record
    /// whose core fields are shadowed by metadata.
    pub(crate) fn validate(&self, separator: char) -> Result<(), TokenError> {
        let category = self.category.as_str();
        if category.is_empty() {
            return Err(TokenError::InvalidRequest("token type is empty".into()));
        }
        if self.client_id.is_empty() {
            return Err(TokenError::InvalidRequest("client_id is empty".into()));
        }
        if category.contains(separator) {
            return Err(TokenError::InvalidRequest(format!(
                "token type contains the separator '{separator}'"
            )));
        }
        if self.client_id.contains(separator) {
            return Err(TokenError::InvalidRequest(format!(
                "client_id contains the separator '{separator}'"
            )));
        }
        if let Some(key) = RESERVED_KEYS
            .iter()
            .find(|key| self.metadata.contains_key(**key))
        {
            return Err(TokenError::InvalidRequest(format!(
                "metadata key '{key}' is reserved"
            )));
        }
        Ok(())
    }
}
