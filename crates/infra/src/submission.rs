//! Deferred listing submission.
//!
//! A submission is validated synchronously, then completed by a spawned task
//! after a fixed delay. There is no cancellation: once scheduled, the write
//! always runs, even if the [`SubmissionHandle`] is dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use technexus_catalog::{ListingForm, Product};
use technexus_core::{Entity, ProductId};

use crate::storage::CatalogStorage;
use crate::store::{CatalogError, CatalogResult, CatalogStore};

/// Store handle shared between the caller and pending submissions.
pub type SharedCatalogStore<S> = Arc<Mutex<CatalogStore<S>>>;

/// The storefront's simulated network latency.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(800);

/// Turns seller forms into listings after a fixed delay.
#[derive(Debug)]
pub struct ListingSubmitter<S> {
    store: SharedCatalogStore<S>,
    delay: Duration,
}

impl<S> Clone for ListingSubmitter<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            delay: self.delay,
        }
    }
}

impl<S: CatalogStorage + 'static> ListingSubmitter<S> {
    pub fn new(store: SharedCatalogStore<S>) -> Self {
        Self::with_delay(store, DEFAULT_SUBMIT_DELAY)
    }

    pub fn with_delay(store: SharedCatalogStore<S>, delay: Duration) -> Self {
        Self { store, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validate `form` and schedule the write.
    ///
    /// Invalid forms fail here and nothing is scheduled. Otherwise the
    /// candidate gets a fresh id and creation time now; `on_complete` runs
    /// exactly once with the outcome after the store has applied (or
    /// rejected) it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit<F>(&self, form: ListingForm, on_complete: F) -> CatalogResult<SubmissionHandle>
    where
        F: FnOnce(&CatalogResult<Product>) + Send + 'static,
    {
        let candidate = form.into_candidate(ProductId::generate(), Utc::now())?;
        let id = candidate.id().clone();
        tracing::info!(
            %id,
            delay_ms = self.delay.as_millis() as u64,
            "listing submission scheduled"
        );

        let store = self.store.clone();
        let delay = self.delay;
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let outcome = {
                let mut store = store.lock().await;
                store.add_listing(candidate.clone()).map(|_| candidate)
            };
            match &outcome {
                Ok(product) => tracing::info!(id = %product.id(), "listing submission completed"),
                Err(err) => tracing::error!(error = %err, "listing submission failed"),
            }

            on_complete(&outcome);
            outcome
        });

        Ok(SubmissionHandle { id, join })
    }
}

/// A scheduled submission. Awaiting it is optional.
#[derive(Debug)]
pub struct SubmissionHandle {
    id: ProductId,
    join: JoinHandle<CatalogResult<Product>>,
}

impl SubmissionHandle {
    /// Id assigned to the pending listing.
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Wait for the write to complete.
    pub async fn wait(self) -> CatalogResult<Product> {
        self.join
            .await
            .map_err(|err| CatalogError::Submission(err.to_string()))?
    }
}
