//! Bearer token values and field splitting.

use std::fmt;

/// A minted bearer token.
///
/// Holds the secret in clear, so `Debug` is redacted. Hand it to the client
/// with [`BearerToken::as_str`].
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// The three fields of a bearer token or a token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenParts<'a> {
    pub category: &'a str,
    pub client_id: &'a str,
    pub value: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Split on `separator` into exactly three non-empty fields.
    pub fn split(token: &'a str, separator: char) -> Option<Self> {
        let mut fields = token.split(separator);
        let category = fields.next()?;
        let client_id = fields.next()?;
        let value = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        if category.is_empty() || client_id.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            category,
            client_id,
            value,
        })
    }

    /// Join the fields with `separator`.
    pub fn join(&self, separator: char) -> String {
        format!(
            "{}{separator}{}{separator}{}",
            self.category, self.client_id, self.value
        )
    }
}
