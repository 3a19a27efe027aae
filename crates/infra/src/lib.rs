//! Infrastructure layer: local storage, the catalog store, deferred submission, config.

pub mod config;
pub mod storage;
pub mod store;
pub mod submission;

pub use config::{ConfigError, StorefrontConfig};
pub use storage::{
    CatalogStorage, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, SlotCatalogStorage,
    StorageError,
};
pub use store::{CatalogError, CatalogResult, CatalogStore};
pub use submission::{ListingSubmitter, SharedCatalogStore, SubmissionHandle};
