//! # webauthz-core
//!
//! Core crate for webauthz. Contains the persistence collaborator trait,
//! configuration schemas, the token category and record types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other webauthz crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
