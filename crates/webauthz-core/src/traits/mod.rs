//! Core traits defined in `webauthz-core` and implemented by other crates.

pub mod token_store;

pub use token_store::TokenDatabase;
