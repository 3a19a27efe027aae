//! The catalog store: owns the listing sequence, persists every mutation.
//!
//! ## State machine
//!
//! - **Uninitialized**: nothing loaded; only `initialize` is allowed.
//! - **Ready**: the sequence is loaded (or seeded) and mirrored to storage.
//!
//! `initialize` is the only transition and there is no teardown. Once ready,
//! `initialize` returns the in-memory sequence without touching storage.

use chrono::Utc;
use thiserror::Error;

use technexus_catalog::{CategoryFilter, Product, query, sample_products};
use technexus_core::{DomainError, Entity, ProductId};

use crate::storage::{CatalogStorage, StorageError};

/// Result type used by the catalog store.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog store is not initialized")]
    NotInitialized,

    #[error("duplicate listing id: {0}")]
    DuplicateId(ProductId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("listing submission failed: {0}")]
    Submission(String),
}

#[derive(Debug)]
enum Seed {
    /// The built-in sample set, stamped at seeding time.
    Samples,
    Fixed(Vec<Product>),
}

#[derive(Debug)]
enum StoreState {
    Uninitialized,
    Ready(Vec<Product>),
}

/// Authoritative, newest-first listing sequence backed by a [`CatalogStorage`].
#[derive(Debug)]
pub struct CatalogStore<S> {
    storage: S,
    seed: Seed,
    state: StoreState,
}

impl<S: CatalogStorage> CatalogStore<S> {
    /// A store that seeds the built-in sample listings.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            seed: Seed::Samples,
            state: StoreState::Uninitialized,
        }
    }

    /// A store that seeds `seed` instead of the built-in samples.
    pub fn with_seed(storage: S, seed: Vec<Product>) -> Self {
        Self {
            storage,
            seed: Seed::Fixed(seed),
            state: StoreState::Uninitialized,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready(_))
    }

    /// Load the persisted catalog, or install and persist the seed set when
    /// there is no usable prior state.
    pub fn initialize(&mut self) -> CatalogResult<&[Product]> {
        if self.is_ready() {
            tracing::debug!("catalog already initialized");
            return self.products();
        }

        let products = match self.storage.load()? {
            Some(products) => {
                tracing::info!(count = products.len(), "loaded persisted catalog");
                products
            }
            None => {
                let seed = self.seed_products()?;
                self.storage.save(&seed)?;
                tracing::info!(count = seed.len(), "seeded catalog");
                seed
            }
        };

        self.state = StoreState::Ready(products);
        self.products()
    }

    /// Prepend `candidate` and persist the updated sequence.
    ///
    /// A candidate whose id is already present is rejected and nothing is
    /// written. If persisting fails the in-memory sequence is unchanged.
    pub fn add_listing(&mut self, candidate: Product) -> CatalogResult<&[Product]> {
        let StoreState::Ready(products) = &mut self.state else {
            return Err(CatalogError::NotInitialized);
        };

        if products.iter().any(|p| p.id() == candidate.id()) {
            tracing::warn!(id = %candidate.id(), "rejecting listing with duplicate id");
            return Err(CatalogError::DuplicateId(candidate.id().clone()));
        }

        let id = candidate.id().clone();
        products.insert(0, candidate);
        if let Err(err) = self.storage.save(products) {
            products.remove(0);
            tracing::error!(%id, error = %err, "failed to persist new listing");
            return Err(err.into());
        }

        tracing::info!(%id, count = products.len(), "listing added");
        Ok(products.as_slice())
    }

    /// The current sequence, newest first.
    pub fn products(&self) -> CatalogResult<&[Product]> {
        match &self.state {
            StoreState::Ready(products) => Ok(products.as_slice()),
            StoreState::Uninitialized => Err(CatalogError::NotInitialized),
        }
    }

    /// Filtered view over the current sequence. Never touches storage.
    pub fn query(
        &self,
        category: CategoryFilter,
        search_text: &str,
    ) -> CatalogResult<Vec<&Product>> {
        let found = query(self.products()?, category, search_text);
        tracing::debug!(%category, search_text, results = found.len(), "catalog query");
        Ok(found)
    }

    pub fn get(&self, id: &ProductId) -> CatalogResult<Option<&Product>> {
        Ok(self.products()?.iter().find(|p| p.id() == id))
    }

    fn seed_products(&self) -> CatalogResult<Vec<Product>> {
        match &self.seed {
            Seed::Samples => Ok(sample_products(Utc::now())?),
            Seed::Fixed(products) => Ok(products.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;
    use technexus_catalog::{Category, ListingForm};

    use crate::storage::{DEFAULT_SLOT, InMemoryKeyValueStore, KeyValueStore, SlotCatalogStorage};

    type Slot = SlotCatalogStorage<Arc<InMemoryKeyValueStore>>;

    /// Counts port calls and can be told to fail loads or saves.
    #[derive(Default)]
    struct CountingStorage {
        inner: Option<Slot>,
        loads: AtomicUsize,
        saves: AtomicUsize,
        fail_saves: bool,
        /// Number of upcoming loads that fail with an I/O error.
        failing_loads: AtomicUsize,
        /// Number of upcoming saves that fail with an I/O error.
        failing_saves: AtomicUsize,
    }

    impl CountingStorage {
        fn over(kv: Arc<InMemoryKeyValueStore>) -> Self {
            Self {
                inner: Some(SlotCatalogStorage::new(kv)),
                ..Self::default()
            }
        }

        fn slot(&self) -> &Slot {
            self.inner.as_ref().unwrap()
        }
    }

    fn take_failure(budget: &AtomicUsize) -> bool {
        budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn disk_error() -> StorageError {
        StorageError::Io(std::io::Error::other("disk unavailable"))
    }

    impl CatalogStorage for CountingStorage {
        fn load(&self) -> Result<Option<Vec<Product>>, StorageError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if take_failure(&self.failing_loads) {
                return Err(disk_error());
            }
            self.slot().load()
        }

        fn save(&self, products: &[Product]) -> Result<(), StorageError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_saves {
                return Err(StorageError::LockPoisoned);
            }
            if take_failure(&self.failing_saves) {
                return Err(disk_error());
            }
            self.slot().save(products)
        }
    }

    fn seed() -> Vec<Product> {
        sample_products(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()).unwrap()
    }

    fn listing(id: &str, title: &str) -> Product {
        ListingForm {
            title: title.to_string(),
            price: "100".to_string(),
            description: String::new(),
            category: Category::Laptops,
            seller_contact: "+1 555 0100".to_string(),
            image_url: None,
        }
        .into_candidate(
            id.parse().unwrap(),
            Utc.timestamp_millis_opt(1_700_000_100_000).unwrap(),
        )
        .unwrap()
    }

    fn memory_store() -> CatalogStore<SlotCatalogStorage<InMemoryKeyValueStore>> {
        CatalogStore::with_seed(SlotCatalogStorage::new(InMemoryKeyValueStore::new()), seed())
    }

    fn ids(products: &[Product]) -> Vec<String> {
        products.iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn seed_on_empty_installs_and_persists_sample_set() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = CatalogStore::with_seed(CountingStorage::over(kv.clone()), seed());

        let products = store.initialize().unwrap().to_vec();
        assert_eq!(products, seed());
        assert_eq!(store.storage().saves.load(Ordering::SeqCst), 1);
        assert_eq!(SlotCatalogStorage::new(kv).load().unwrap(), Some(seed()));
    }

    #[test]
    fn built_in_samples_are_used_by_default() {
        let mut store = CatalogStore::new(SlotCatalogStorage::new(InMemoryKeyValueStore::new()));
        assert_eq!(ids(store.initialize().unwrap()), ["1", "2", "3"]);
    }

    #[test]
    fn initialize_is_idempotent_and_does_not_repersist() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = CatalogStore::with_seed(CountingStorage::over(kv), seed());

        let first = store.initialize().unwrap().to_vec();
        let second = store.initialize().unwrap().to_vec();

        assert_eq!(first, second);
        assert_eq!(store.storage().loads.load(Ordering::SeqCst), 1);
        assert_eq!(store.storage().saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn existing_state_is_loaded_without_reseeding() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let persisted = vec![listing("only", "Lone listing")];
        SlotCatalogStorage::new(kv.clone()).save(&persisted).unwrap();

        let mut store = CatalogStore::with_seed(CountingStorage::over(kv), seed());
        assert_eq!(store.initialize().unwrap(), persisted.as_slice());
        assert_eq!(store.storage().saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_state_reseeds_cleanly() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set_item(DEFAULT_SLOT, "[{\"id\": 42, \"broken\": tru").unwrap();

        let mut store = CatalogStore::with_seed(SlotCatalogStorage::new(kv.clone()), seed());
        assert_eq!(store.initialize().unwrap(), seed().as_slice());

        let reloaded = SlotCatalogStorage::new(kv).load().unwrap();
        assert_eq!(reloaded, Some(seed()));
    }

    #[test]
    fn failed_load_surfaces_error_and_stays_uninitialized() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let storage = CountingStorage::over(kv);
        storage.failing_loads.store(1, Ordering::SeqCst);
        let mut store = CatalogStore::with_seed(storage, seed());

        let err = store.initialize().unwrap_err();
        assert!(matches!(err, CatalogError::Storage(StorageError::Io(_))));
        assert!(!store.is_ready());
        assert_eq!(store.storage().saves.load(Ordering::SeqCst), 0);

        assert_eq!(store.initialize().unwrap(), seed().as_slice());
        assert!(store.is_ready());
    }

    #[test]
    fn failed_seed_save_surfaces_error_and_stays_uninitialized() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let storage = CountingStorage::over(kv.clone());
        storage.failing_saves.store(1, Ordering::SeqCst);
        let mut store = CatalogStore::with_seed(storage, seed());

        let err = store.initialize().unwrap_err();
        assert!(matches!(err, CatalogError::Storage(StorageError::Io(_))));
        assert!(!store.is_ready());
        assert!(matches!(store.products(), Err(CatalogError::NotInitialized)));
        assert_eq!(kv.get_item(DEFAULT_SLOT).unwrap(), None);

        assert_eq!(ids(store.initialize().unwrap()), ["1", "2", "3"]);
        assert_eq!(SlotCatalogStorage::new(kv).load().unwrap(), Some(seed()));
    }

    #[test]
    fn add_listing_prepends_newest_first() {
        let mut store = memory_store();
        store.initialize().unwrap();

        store.add_listing(listing("x", "X")).unwrap();
        let products = store.add_listing(listing("y", "Y")).unwrap();

        assert_eq!(ids(products), ["y", "x", "1", "2", "3"]);
    }

    #[test]
    fn add_listing_persists_full_sequence() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = CatalogStore::with_seed(SlotCatalogStorage::new(kv.clone()), seed());
        store.initialize().unwrap();
        let after = store.add_listing(listing("x", "X")).unwrap().to_vec();

        let persisted = SlotCatalogStorage::new(kv).load().unwrap().unwrap();
        assert_eq!(persisted, after);
    }

    #[test]
    fn duplicate_id_is_rejected_without_writing() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = CatalogStore::with_seed(CountingStorage::over(kv), seed());
        store.initialize().unwrap();

        let err = store.add_listing(listing("2", "Collides with seed")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id.as_str() == "2"));
        assert_eq!(store.products().unwrap().len(), 3);
        assert_eq!(store.storage().saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_save_leaves_sequence_unchanged() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        SlotCatalogStorage::new(kv.clone()).save(&seed()).unwrap();

        let mut store = CatalogStore::new(CountingStorage {
            fail_saves: true,
            ..CountingStorage::over(kv)
        });
        store.initialize().unwrap();

        let err = store.add_listing(listing("x", "X")).unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
        assert_eq!(ids(store.products().unwrap()), ["1", "2", "3"]);
    }

    #[test]
    fn operations_before_initialize_fail() {
        let mut store = CatalogStore::new(SlotCatalogStorage::new(InMemoryKeyValueStore::new()));
        assert!(!store.is_ready());
        assert!(matches!(store.products(), Err(CatalogError::NotInitialized)));
        assert!(matches!(
            store.query(CategoryFilter::All, ""),
            Err(CatalogError::NotInitialized)
        ));
        assert!(matches!(
            store.add_listing(listing("x", "X")),
            Err(CatalogError::NotInitialized)
        ));
    }

    #[test]
    fn query_filters_without_touching_storage() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut store = CatalogStore::with_seed(CountingStorage::over(kv), seed());
        store.initialize().unwrap();

        let laptops = store.query(Category::Laptops.into(), "").unwrap();
        assert_eq!(laptops.len(), 1);
        assert_eq!(laptops[0].id().as_str(), "2");

        let iphone = store.query(CategoryFilter::All, "IPHONE").unwrap();
        assert_eq!(iphone[0].title(), "iPhone 15 Pro Max - 256GB");

        assert!(store.query(CategoryFilter::All, "xyznonexistent").unwrap().is_empty());

        assert_eq!(store.storage().loads.load(Ordering::SeqCst), 1);
        assert_eq!(store.storage().saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn get_finds_listing_by_id() {
        let mut store = memory_store();
        store.initialize().unwrap();

        let id: ProductId = "3".parse().unwrap();
        let found = store.get(&id).unwrap().map(|p| p.category());
        assert_eq!(found, Some(Category::Accessories));
        assert!(store.get(&"nope".parse().unwrap()).unwrap().is_none());
    }
}
