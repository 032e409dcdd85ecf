//! File-backed transaction document store
//!
//! `DocumentStore` keeps the full collection in memory, loaded from a
//! JSON array file, and writes the collection back after each batch
//! delete. A failed write-back restores the previous snapshot, so the
//! commit is all-or-nothing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::RwLock;

use txsweep_core::{StoreError, StoreResult, Transaction, TransactionStore};

/// In-memory document store with optional file persistence
pub struct DocumentStore {
    records: RwLock<Vec<Transaction>>,
    entry: RwLock<Option<PathBuf>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store with no backing file
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            entry: RwLock::new(None),
        }
    }

    /// Create a store seeded with records, no backing file
    pub fn with_records(mut records: Vec<Transaction>) -> Self {
        Self::sort_records(&mut records);
        Self {
            records: RwLock::new(records),
            entry: RwLock::new(None),
        }
    }

    /// Load the collection from a JSON document file
    ///
    /// Replaces the current snapshot and remembers the path for
    /// `reload` and write-back. Returns the number of records loaded.
    pub async fn load(&self, path: PathBuf) -> StoreResult<usize> {
        let content = tokio::fs::read_to_string(&path).await?;
        let mut records: Vec<Transaction> =
            serde_json::from_str(&content).map_err(|e| StoreError::Decode {
                message: e.to_string(),
            })?;
        Self::sort_records(&mut records);

        let count = records.len();
        *self.records.write().unwrap() = records;
        *self.entry.write().unwrap() = Some(path.clone());
        log::info!("loaded {} transactions from {}", count, path.display());
        Ok(count)
    }

    /// Re-read the collection from the backing file
    pub async fn reload(&self) -> StoreResult<usize> {
        let entry = self.entry.read().unwrap().clone();
        match entry {
            Some(path) => self.load(path).await,
            None => Err(StoreError::Backend {
                message: "No document file loaded".to_string(),
            }),
        }
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// True when the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    fn sort_records(records: &mut [Transaction]) {
        records.sort_by_key(|tx| tx.timestamp_millis().unwrap_or(i64::MAX));
    }

    fn encode(records: &[Transaction]) -> StoreResult<String> {
        serde_json::to_string_pretty(records).map_err(|e| StoreError::Backend {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TransactionStore for DocumentStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Transaction>> {
        Ok(self.records.read().unwrap().clone())
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.records.read().unwrap().iter().any(|t| t.id == id))
    }

    async fn delete_batch(&self, ids: &[String]) -> StoreResult<()> {
        let entry = self.entry.read().unwrap().clone();

        let (previous, snapshot) = {
            let mut records = self.records.write().unwrap();
            let previous = records.clone();
            records.retain(|t| !ids.iter().any(|id| id == &t.id));
            (previous, records.clone())
        };

        if snapshot.len() == previous.len() {
            // Every id was already gone; nothing to persist
            return Ok(());
        }

        if let Some(path) = entry {
            let encoded = Self::encode(&snapshot)?;
            if let Err(e) = tokio::fs::write(&path, encoded).await {
                *self.records.write().unwrap() = previous;
                return Err(StoreError::Io(e));
            }
        }

        log::debug!(
            "deleted {} of {} batch ids",
            previous.len() - snapshot.len(),
            ids.len()
        );
        Ok(())
    }
}

// ==================== Tests ====================
