//! Token minting and verification.

use std::sync::Arc;

use tracing::{Instrument, Span, debug, trace, trace_span, warn};

use webauthz_core::config::TokenConfig;
use webauthz_core::result::AppResult;
use webauthz_core::traits::TokenDatabase;
use webauthz_core::types::TokenRecord;

use crate::bearer::{BearerToken, TokenParts};
use crate::crypto::{
    Base64UrlEncoding, OsSecretSource, SECRET_LENGTH, SecretSource, Sha384Digest, TokenDigest,
    TokenEncoding,
};
use crate::error::{Mismatch, TokenError};
use crate::request::TokenRequest;

/// Issues bearer tokens and verifies presented ones against the store.
///
/// The service holds no mutable state; clones share the same collaborators
/// and every call is an independent request against the store.
#[derive(Clone)]
pub struct TokenService {
    /// Persistence collaborator.
    database: Arc<dyn TokenDatabase>,
    /// Field separator for tokens and indices.
    separator: char,
    /// Secret source.
    secrets: Arc<dyn SecretSource>,
    /// Hash applied to secrets for the index.
    digest: Arc<dyn TokenDigest>,
    /// Text encoding for secrets and hashes.
    encoding: Arc<dyn TokenEncoding>,
    /// Parent span for diagnostics, if the caller injected one.
    log_span: Option<Span>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("separator", &self.separator)
            .field("digest", &self.digest.name())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a service with the default primitives.
    pub fn new(database: Arc<dyn TokenDatabase>, config: &TokenConfig) -> AppResult<Self> {
        Self::builder(database).separator(config.separator).build()
    }

    /// Starts a builder over `database`.
    pub fn builder(database: Arc<dyn TokenDatabase>) -> TokenServiceBuilder {
        TokenServiceBuilder::new(database)
    }

    /// The configured field separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Mints a token and stores its record.
    ///
    /// Returns `Ok(None)` when the store refuses the record or fails to
    /// write it: a token whose index was not stored could never be verified,
    /// so it is not handed out. Returns `Err` only for an invalid request or
    /// an unavailable random source.
    pub async fn generate_token(
        &self,
        request: TokenRequest,
    ) -> Result<Option<BearerToken>, TokenError> {
        let span = match &self.log_span {
            Some(parent) => trace_span!(parent: parent, "generate_token", category = %request.category, client_id = %request.client_id),
            None => trace_span!("generate_token", category = %request.category, client_id = %request.client_id),
        };

        async move {
            if let Err(e) = request.validate(self.separator) {
                trace!(error = %e, "generate_token: rejected request");
                return Err(e);
            }

            let mut secret = vec![0u8; SECRET_LENGTH];
            if let Err(e) = self.secrets.fill(&mut secret) {
                trace!(error = %e, "generate_token: secret source failed");
                return Err(e.into());
            }

            let category = request.category.as_str();
            let token = TokenParts {
                category,
                client_id: &request.client_id,
                value: &self.encoding.encode(&secret),
            }
            .join(self.separator);
            let index = self.derive_index(category, &request.client_id, &secret);

            let record = TokenRecord {
                category: request.category.clone(),
                client_id: request.client_id.clone(),
                token_buffer_length: secret.len(),
                metadata: request.metadata,
            };

            match self.database.create_token(&index, &record).await {
                Ok(true) => {
                    debug!("Token issued");
                    Ok(Some(BearerToken::new(token)))
                }
                Ok(false) => {
                    trace!("generate_token: store refused record, not issuing token");
                    Ok(None)
                }
                Err(e) => {
                    trace!(error = %e, "generate_token: store write failed");
                    warn!(error = %e, "Failed to store token record");
                    Ok(None)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Verifies a presented bearer token and returns its stored record.
    ///
    /// Expiry is not checked here; see [`TokenRecord::not_after`].
    pub async fn check_token(&self, bearer_token: &str) -> Result<TokenRecord, TokenError> {
        let span = match &self.log_span {
            Some(parent) => trace_span!(parent: parent, "check_token"),
            None => trace_span!("check_token"),
        };

        async move {
            let Some(parts) = TokenParts::split(bearer_token, self.separator) else {
                trace!("check_token: invalid bearer token format");
                return Err(TokenError::InvalidTokenFormat);
            };

            let Some(secret) = self.encoding.decode(parts.value) else {
                trace!("check_token: token value is not valid base64url");
                return Err(TokenError::InvalidTokenFormat);
            };

            let index = self.derive_index(parts.category, parts.client_id, &secret);
            let record = match self.database.fetch_token(&index).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    trace!("check_token: token not found");
                    return Err(TokenError::TokenNotFound);
                }
                Err(e) => {
                    trace!(error = %e, "check_token: store read failed");
                    return Err(e.into());
                }
            };

            let mismatch = if record.category.as_str() != parts.category {
                Some(Mismatch::Category)
            } else if record.client_id != parts.client_id {
                Some(Mismatch::ClientId)
            } else if record.token_buffer_length != secret.len() {
                Some(Mismatch::SecretLength)
            } else {
                None
            };
            if let Some(mismatch) = mismatch {
                trace!("check_token: {mismatch}");
                return Err(TokenError::InvalidToken(mismatch));
            }

            trace!(category = %record.category, client_id = %record.client_id, "check_token: valid");
            Ok(record)
        }
        .instrument(span)
        .await
    }

    /// Builds the lookup index for a secret. Minting and verification both
    /// go through here so the two derivations cannot drift apart.
    fn derive_index(&self, category: &str, client_id: &str, secret: &[u8]) -> String {
        let hash = self.encoding.encode(&self.digest.digest(secret));
        TokenParts {
            category,
            client_id,
            value: &hash,
        }
        .join(self.separator)
    }
}

/// Builder for [`TokenService`].
pub struct TokenServiceBuilder {
    database: Arc<dyn TokenDatabase>,
    config: TokenConfig,
    secrets: Arc<dyn SecretSource>,
    digest: Arc<dyn TokenDigest>,
    encoding: Arc<dyn TokenEncoding>,
    log_span: Option<Span>,
}

impl TokenServiceBuilder {
    fn new(database: Arc<dyn TokenDatabase>) -> Self {
        Self {
            database,
            config: TokenConfig::default(),
            secrets: Arc::new(OsSecretSource),
            digest: Arc::new(Sha384Digest),
            encoding: Arc::new(Base64UrlEncoding),
            log_span: None,
        }
    }

    /// Field separator; see [`TokenConfig::separator`] before changing it.
    pub fn separator(mut self, separator: char) -> Self {
        self.config.separator = separator;
        self
    }

    /// Replaces the OS random source.
    pub fn secret_source(mut self, secrets: Arc<dyn SecretSource>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Replaces the SHA-384 index digest.
    pub fn digest(mut self, digest: Arc<dyn TokenDigest>) -> Self {
        self.digest = digest;
        self
    }

    /// Replaces the base64url encoding.
    pub fn encoding(mut self, encoding: Arc<dyn TokenEncoding>) -> Self {
        self.encoding = encoding;
        self
    }

    /// Parents every operation span under `span`.
    pub fn log_span(mut self, span: Span) -> Self {
        self.log_span = Some(span);
        self
    }

    /// Validates the configuration and builds the service.
    pub fn build(self) -> AppResult<TokenService> {
        self.config.validate()?;
        Ok(TokenService {
            database: self.database,
            separator: self.config.separator,
            secrets: self.secrets,
            digest: self.digest,
            encoding: self.encoding,
            log_span: self.log_span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webauthz_store::memory::MemoryTokenStore;

    fn service() -> (TokenService, MemoryTokenStore) {
        let store = MemoryTokenStore::default();
        let service = TokenService::new(Arc::new(store.clone()), &TokenConfig::default()).unwrap();
        (service, store)
    }

    #[tokio::test]
    async fn test_token_shape() {
        let (service, store) = service();
        let token = service
            .generate_token(TokenRequest::new("access", "c1"))
            .await
            .unwrap()
            .unwrap();

        let parts = TokenParts::split(token.as_str(), ':').unwrap();
        assert_eq!(parts.category, "access");
        assert_eq!(parts.client_id, "c1");
        assert_eq!(parts.value.len(), 128);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_index_is_hash_not_secret() {
        let (service, _) = service();
        let secret = [42u8; SECRET_LENGTH];
        let index = service.derive_index("access", "c1", &secret);

        let parts = TokenParts::split(&index, ':').unwrap();
        assert_eq!(parts.value.len(), 64);
        assert_ne!(parts.value, Base64UrlEncoding.encode(&secret));
    }

    #[tokio::test]
    async fn test_check_round_trip() {
        let (service, _) = service();
        let token = service
            .generate_token(TokenRequest::new("grant", "c2").with("scope", "read"))
            .await
            .unwrap()
            .unwrap();

        let record = service.check_token(token.as_str()).await.unwrap();
        assert_eq!(record.category.as_str(), "grant");
        assert_eq!(record.client_id, "c2");
        assert_eq!(record.token_buffer_length, SECRET_LENGTH);
        assert_eq!(record.get("scope"), Some(&serde_json::json!("read")));
    }

    #[tokio::test]
    async fn test_invalid_request_draws_nothing() {
        let (service, store) = service();
        let err = service
            .generate_token(TokenRequest::new("access", "a:b"))
            .await
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidRequest(_)));
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_builder_rejects_bad_separator() {
        let store: Arc<dyn TokenDatabase> = Arc::new(MemoryTokenStore::default());
        assert!(TokenService::builder(store).separator('A').build().is_err());
    }
}
