//! Convenience result type alias for webauthz.

use crate::error::AppError;

/// A specialized `Result` type for webauthz operations.
pub type AppResult<T> = Result<T, AppError>;
