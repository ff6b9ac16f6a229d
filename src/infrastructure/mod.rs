//! Infrastructure layer - Persistence backends and their selection

pub mod config;
pub mod json_store;
pub mod sqlite_store;
pub mod storage;

pub use config::{open_store, StorageKind, StoreConfig};
pub use json_store::JsonStore;
pub use sqlite_store::SqliteStore;
pub use storage::TodoStore;
