//! Persistence collaborator trait for token records.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::record::TokenRecord;

/// Trait for token record backends (Redis, in-memory, or external).
///
/// Implementations own durability and concurrency. The token service relies
/// on two properties:
/// - `create_token` is an atomic insert-if-absent, so of two concurrent
///   creates at the same index at most one returns `true`.
/// - a `fetch_token` issued after a successful `create_token` observes it.
#[async_trait]
pub trait TokenDatabase: Send + Sync + std::fmt::Debug + 'static {
    /// Insert `record` at `index` if nothing is stored there yet.
    ///
    /// Returns `Ok(true)` if the record was written, `Ok(false)` if the index
    /// was already taken. Backend failures are reported as `Err`.
    async fn create_token(&self, index: &str, record: &TokenRecord) -> AppResult<bool>;

    /// Fetch the record stored at `index`, or `None` if there is none.
    async fn fetch_token(&self, index: &str) -> AppResult<Option<TokenRecord>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
