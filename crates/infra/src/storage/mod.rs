//! Local persistence boundary.
//!
//! `KeyValueStore` models browser-style local storage (named string slots);
//! `CatalogStorage` is the port the catalog store depends on. The slot adapter
//! bridges the two by keeping the whole catalog as one JSON array.

pub mod file;
pub mod in_memory;
pub mod slot;
pub mod r#trait;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
pub use r#trait::{CatalogStorage, KeyValueStore, StorageError, validate_key};
pub use slot::{DEFAULT_SLOT, SlotCatalogStorage};
