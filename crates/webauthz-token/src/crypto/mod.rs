//! Pluggable primitives used to build tokens and indices.

pub mod digest;
pub mod encoding;
pub mod random;

pub use digest::{Sha384Digest, Sha512Digest, TokenDigest};
pub use encoding::{Base64UrlEncoding, TokenEncoding};
pub use random::{OsSecretSource, SECRET_LENGTH, SecretSource};
