use std::collections::HashSet;

use technexus_catalog::Product;
use technexus_core::Entity;

use super::r#trait::{CatalogStorage, KeyValueStore, StorageError};

/// Slot the storefront has always used for its catalog.
pub const DEFAULT_SLOT: &str = "technexus_products";

/// The whole catalog as a JSON array under one named slot.
#[derive(Debug, Clone)]
pub struct SlotCatalogStorage<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> SlotCatalogStorage<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_SLOT)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValueStore> CatalogStorage for SlotCatalogStorage<K> {
    fn load(&self) -> Result<Option<Vec<Product>>, StorageError> {
        let Some(raw) = self.kv.get_item(&self.key)? else {
            tracing::debug!(slot = %self.key, "no persisted catalog");
            return Ok(None);
        };

        let products: Vec<Product> = match serde_json::from_str(&raw) {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!(
                    slot = %self.key,
                    error = %err,
                    "discarding malformed persisted catalog"
                );
                return Ok(None);
            }
        };

        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id().clone())) {
            tracing::warn!(
                slot = %self.key,
                id = %dup.id(),
                "discarding persisted catalog with duplicate ids"
            );
            return Ok(None);
        }

        Ok(Some(products))
    }

    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(products)?;
        self.kv.set_item(&self.key, &payload)
    }
}
