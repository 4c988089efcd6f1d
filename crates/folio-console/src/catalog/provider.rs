//! Entity data providers
//!
//! One provider per entity collection: it issues paginated, filtered,
//! sorted list requests and holds the resulting page. Every fetch
//! replaces the held list wholesale; there is no merging. Mutations call
//! the backend and return; the caller decides when to refetch, so page,
//! filter and sort state stay under its control.
//!
//! Overlapping fetches are not deduplicated: the last response to resolve
//! wins and overwrites state. This is accepted behavior, not a guarantee.

use crate::catalog::models::{CatalogRecord, Page};
use crate::catalog::transport::{EntityTransport, ListParams};
use crate::error::ConsoleResult;
use futures::future::join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Result of a fan-out bulk delete.
///
/// Successes are applied to local state; failures are a count, not
/// retried per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    /// Records deleted and removed from the held list
    pub removed: usize,

    /// Delete requests that failed
    pub failed: usize,
}

struct ProviderState<T> {
    items: Vec<T>,
    total: u64,
    page: u32,
    params: ListParams,
}

/// Fetch/mutate/paginate state holder for one entity collection
pub struct EntityProvider<T> {
    path: String,
    transport: Arc<dyn EntityTransport>,
    state: Arc<RwLock<ProviderState<T>>>,
}

impl<T> EntityProvider<T>
where
    T: CatalogRecord + Serialize + DeserializeOwned + 'static,
{
    /// Create a provider for the collection at `path`, e.g. `projects`
    pub fn new<S: Into<String>>(transport: Arc<dyn EntityTransport>, path: S) -> Self {
        Self {
            path: path.into(),
            transport,
            state: Arc::new(RwLock::new(ProviderState {
                items: Vec::new(),
                total: 0,
                page: 1,
                params: ListParams::default(),
            })),
        }
    }

    /// The collection path this provider serves
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetch one page and replace the held list wholesale
    pub async fn fetch(&self, params: ListParams) -> ConsoleResult<()> {
        let page: Page<Value> = self.transport.list(&self.path, &params).await?;

        let items = page.items.into_iter().map(serde_json::from_value).collect::<Result<Vec<T>, _>>()?;

        let mut state = self.state.write().await;
        state.items = items;
        state.total = page.total;
        state.page = page.page;
        state.params = params;

        debug!(path = %self.path, count = state.items.len(), total = state.total, "Entity page fetched");

        Ok(())
    }

    /// Refetch with the current page, filters and sort
    pub async fn refetch(&self) -> ConsoleResult<()> {
        let params = self.state.read().await.params.clone();
        self.fetch(params).await
    }

    /// The held items
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    /// Total record count reported by the backend
    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    /// Current page number
    pub async fn page(&self) -> u32 {
        self.state.read().await.page
    }

    /// Parameters of the last fetch
    pub async fn params(&self) -> ListParams {
        self.state.read().await.params.clone()
    }

    /// Create a record. The caller refetches afterwards.
    pub async fn create(&self, record: &T) -> ConsoleResult<T> {
        let created = self.transport.create(&self.path, serde_json::to_value(record)?).await?;
        Ok(serde_json::from_value(created)?)
    }

    /// Update a record. The caller refetches afterwards.
    pub async fn update(&self, record: &T) -> ConsoleResult<T> {
        let updated = self.transport.update(&self.path, record.id(), serde_json::to_value(record)?).await?;
        Ok(serde_json::from_value(updated)?)
    }

    /// Delete one record. The caller refetches afterwards.
    pub async fn delete(&self, id: i64) -> ConsoleResult<()> {
        self.transport.delete(&self.path, id).await
    }

    /// Delete the selected records concurrently.
    ///
    /// Waits for all requests; successfully deleted records are removed
    /// from the held list and total, failures only counted.
    pub async fn bulk_delete(&self, ids: &[i64]) -> BulkDeleteOutcome {
        let results = join_all(ids.iter().map(|&id| {
            let transport = Arc::clone(&self.transport);
            let path = self.path.clone();
            async move { (id, transport.delete(&path, id).await) }
        }))
        .await;

        let mut removed_ids = Vec::new();
        let mut failed = 0;

        for (id, result) in results {
            match result {
                Ok(()) => removed_ids.push(id),
                Err(err) => {
                    warn!(path = %self.path, id, error = %err, "Bulk delete request failed");
                    failed += 1;
                }
            }
        }

        let mut state = self.state.write().await;
        state.items.retain(|item| !removed_ids.contains(&item.id()));
        state.total = state.total.saturating_sub(removed_ids.len() as u64);

        BulkDeleteOutcome {
            removed: removed_ids.len(),
            failed,
        }
    }
}
