//! Secret generation.

use rand::RngCore;
use rand::rngs::OsRng;

use webauthz_core::error::{AppError, ErrorKind};

/// Length in bytes of every token secret.
pub const SECRET_LENGTH: usize = 96;

/// Source of token secret bytes.
///
/// Production code uses [`OsSecretSource`]; tests substitute a deterministic
/// source to get reproducible tokens.
pub trait SecretSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fill `buf` entirely with secret bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretSource;

impl SecretSource for OsSecretSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        OsRng.try_fill_bytes(buf).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "OS random source unavailable", e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_whole_buffer() {
        let mut a = [0u8; SECRET_LENGTH];
        let mut b = [0u8; SECRET_LENGTH];
        OsSecretSource.fill(&mut a).unwrap();
        OsSecretSource.fill(&mut b).unwrap();
        assert_ne!(a, b);
        assert!(a.iter().any(|&byte| byte != 0));
    }
}
