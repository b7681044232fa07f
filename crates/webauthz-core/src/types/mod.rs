//! Token types shared by the service and the store backends.

pub mod category;
pub mod record;

pub use category::TokenCategory;
pub use record::{Metadata, NOT_AFTER_KEY, RESERVED_KEYS, TokenRecord};
