//! Token category tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The purpose of a token, used as its namespace.
///
/// Unknown tags are kept verbatim in [`TokenCategory::Other`] so callers can
/// introduce new categories without a release of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenCategory {
    /// Client registration token.
    Client,
    /// Authorization grant token.
    Grant,
    /// Refresh token.
    Refresh,
    /// Access token.
    Access,
    /// Any other caller-defined category.
    Other(String),
}

impl TokenCategory {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Client => "client",
            Self::Grant => "grant",
            Self::Refresh => "refresh",
            Self::Access => "access",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for TokenCategory {
    fn from(s: &str) -> Self {
        match s {
            "client" => Self::Client,
            "grant" => Self::Grant,
            "refresh" => Self::Refresh,
            "access" => Self::Access,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TokenCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "client" | "grant" | "refresh" | "access" => Self::from(s.as_str()),
            _ => Self::Other(s),
        }
    }
}

impl From<TokenCategory> for String {
    fn from(category: TokenCategory) -> Self {
        match category {
            TokenCategory::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
