use std::sync::Arc;

use thiserror::Error;

use technexus_catalog::Product;

/// Storage operation error.
///
/// These are **infrastructure errors** (IO, encoding, locking). Malformed
/// persisted content is not an error at this boundary; adapters report it as
/// "no usable state".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    LockPoisoned,

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Named string slots, local to this profile.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Persistence port for the catalog store.
///
/// `load` returns `Ok(None)` when there is no usable prior state, whether the
/// slot is empty or its content is malformed.
pub trait CatalogStorage: Send + Sync {
    fn load(&self) -> Result<Option<Vec<Product>>, StorageError>;
    fn save(&self, products: &[Product]) -> Result<(), StorageError>;
}

impl<S> CatalogStorage for Arc<S>
where
    S: CatalogStorage + ?Sized,
{
    fn load(&self) -> Result<Option<Vec<Product>>, StorageError> {
        (**self).load()
    }

    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        (**self).save(products)
    }
}

/// Slot keys are non-empty and limited to `[A-Za-z0-9_-]`, so they are safe
/// as file names.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
