//! In-memory token store.

pub mod store;

pub use store::MemoryTokenStore;
