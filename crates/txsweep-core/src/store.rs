//! Storage port for the deduplication engine
//!
//! The engine never talks to a concrete backend; it decides what should
//! be deleted and hands the batch to whatever implements this trait.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StoreResult;
use crate::model::Transaction;

/// Store reference type
pub type StoreRef = Arc<dyn TransactionStore>;

/// Trait for transaction document stores
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fetch the full collection, ordered by date ascending
    async fn fetch_all(&self) -> StoreResult<Vec<Transaction>>;

    /// Check whether a transaction currently exists
    async fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Delete the given ids as a single atomic batch
    ///
    /// All-or-nothing: on error no deletion is applied. Ids missing at
    /// commit time are skipped, not errors.
    async fn delete_batch(&self, ids: &[String]) -> StoreResult<()>;
}
