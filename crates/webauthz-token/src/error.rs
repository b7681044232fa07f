//! Token verification and minting errors.

use std::fmt;

use thiserror::Error;

use webauthz_core::error::AppError;

/// Which stored field disagreed with the presented token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Stored category differs from the token's.
    Category,
    /// Stored client id differs from the token's.
    ClientId,
    /// Stored secret length differs from the decoded secret's.
    SecretLength,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "token type does not match stored value"),
            Self::ClientId => write!(f, "token client_id does not match stored value"),
            Self::SecretLength => write!(f, "token length does not match stored value"),
        }
    }
}

/// Errors returned by [`crate::TokenService`].
///
/// Failing to *mint* because the store refused the record is not an error;
/// `generate_token` returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The bearer token is not exactly three non-empty fields with a
    /// decodable secret.
    #[error("invalid bearer token format")]
    InvalidTokenFormat,
    /// No record exists at the index derived from the bearer token.
    #[error("token not found")]
    TokenNotFound,
    /// A record was found but disagrees with the bearer token.
    #[error("invalid token: {0}")]
    InvalidToken(Mismatch),
    /// The mint request was rejected before any secret was drawn.
    #[error("invalid token request: {0}")]
    InvalidRequest(String),
    /// The random source or the store failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let message = err.to_string();
        match err {
            TokenError::InvalidTokenFormat | TokenError::InvalidToken(_) => {
                AppError::authentication(message)
            }
            TokenError::TokenNotFound => AppError::not_found(message),
            TokenError::InvalidRequest(_) => AppError::validation(message),
            TokenError::Backend(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webauthz_core::error::ErrorKind;

    #[test]
    fn test_messages() {
        assert_eq!(
            TokenError::InvalidToken(Mismatch::ClientId).to_string(),
            "invalid token: token client_id does not match stored value"
        );
        assert_eq!(TokenError::TokenNotFound.to_string(), "token not found");
    }

    #[test]
    fn test_into_app_error_kinds() {
        let kind = |e: TokenError| AppError::from(e).kind;
        assert_eq!(kind(TokenError::InvalidTokenFormat), ErrorKind::Authentication);
        assert_eq!(kind(TokenError::TokenNotFound), ErrorKind::NotFound);
        assert_eq!(
            kind(TokenError::InvalidToken(Mismatch::SecretLength)),
            ErrorKind::Authentication
        );
        assert_eq!(
            kind(TokenError::InvalidRequest("empty client_id".into())),
            ErrorKind::Validation
        );
        assert_eq!(
            kind(TokenError::Backend(AppError::database("down"))),
            ErrorKind::Database
        );
    }
}
