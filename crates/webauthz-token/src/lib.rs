//! # webauthz-token
//!
//! Issues and verifies opaque bearer tokens on behalf of a client and a token
//! category.
//!
//! A token is `<type>:<client_id>:<base64url(secret)>`. Only a SHA-384 hash of
//! the 96-byte secret reaches the store, inside the lookup index
//! `<type>:<client_id>:<base64url(hash)>`, so a leaked store does not leak
//! usable tokens.
//!
//! ## Modules
//!
//! - `crypto`: random source, digest and encoding strategies
//! - `bearer`: bearer token value and field splitting
//! - `request`: mint request with caller metadata
//! - `service`: `TokenService`: `generate_token` / `check_token`
//! - `error`: verification failure kinds

pub mod bearer;
pub mod crypto;
pub mod error;
pub mod request;
pub mod service;

pub use bearer::BearerToken;
pub use crypto::{
    Base64UrlEncoding, OsSecretSource, SECRET_LENGTH, SecretSource, Sha384Digest, Sha512Digest,
    TokenDigest, TokenEncoding,
};
pub use error::{Mismatch, TokenError};
pub use request::TokenRequest;
pub use service::{TokenService, TokenServiceBuilder};
