//! Deduplication run orchestration
//!
//! One run processes one full snapshot of the collection end-to-end:
//! fetch, group, select survivors, re-verify removal candidates, commit
//! a single atomic batch. There are no internal retries; the run either
//! completes or fails as a whole.

use txsweep_config::DedupConfig;

use crate::dedup::{find_duplicate_groups, select_survivor};
use crate::error::CoreResult;
use crate::matcher::TransactionMatcher;
use crate::model::DuplicateGroup;
use crate::store::TransactionStore;

/// Result of a deduplication run
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Number of records removed by the batch commit
    pub removed_count: usize,
    /// Every duplicate group found, survivors included
    pub groups: Vec<DuplicateGroup>,
}

impl DedupOutcome {
    fn empty() -> Self {
        Self {
            removed_count: 0,
            groups: Vec::new(),
        }
    }
}

/// Run a full deduplication pass against the store
///
/// Finding no duplicate groups is a success outcome with zero removals
/// and no batch commit issued. When groups are found, each removal
/// candidate's existence is re-verified immediately before the commit:
/// a candidate deleted by another process since the snapshot was read is
/// skipped silently and excluded from the removed count. All verified
/// removals go to the store as one atomic batch.
pub async fn run_deduplication(
    store: &dyn TransactionStore,
    matcher: &dyn TransactionMatcher,
    config: &DedupConfig,
) -> CoreResult<DedupOutcome> {
    let mut transactions = store.fetch_all().await?;
    // Stores return date-ascending order; sort again so an out-of-order
    // backend cannot break the window scan. Stable, so it is a no-op on
    // well-behaved input.
    transactions.sort_by_key(|tx| tx.timestamp_millis().unwrap_or(i64::MAX));

    let groups = find_duplicate_groups(
        &transactions,
        config.window_millis,
        config.chaining,
        matcher,
    );
    if groups.is_empty() {
        log::debug!("no duplicate groups in {} records", transactions.len());
        return Ok(DedupOutcome::empty());
    }

    let mut verified: Vec<String> = Vec::new();
    for group in &groups {
        let selection = select_survivor(group)?;
        for removal in &selection.removals {
            if store.exists(&removal.id).await? {
                verified.push(removal.id.clone());
            } else {
                log::info!(
                    "skipping {}: no longer present in store",
                    removal.id
                );
            }
        }
    }

    if !verified.is_empty() {
        store.delete_batch(&verified).await?;
    }

    log::info!(
        "removed {} duplicates across {} groups",
        verified.len(),
        groups.len()
    );

    Ok(DedupOutcome {
        removed_count: verified.len(),
        groups,
    })
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::matcher::FieldMatcher;
    use crate::model::Transaction;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn record(id: &str, payee: &str, time: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: "2026-01-15".to_string(),
            time: time.to_string(),
            payee: payee.to_string(),
            narration: String::new(),
            amount: Decimal::new(-450, 2),
            currency: "USD".to_string(),
            category: None,
            tags: Vec::new(),
            metadata: serde_json::Value::Null,
        }
    }

    /// In-memory store with knobs for race and failure scenarios
    struct StubStore {
        records: Mutex<Vec<Transaction>>,
        vanished: Vec<String>,
        fail_commit: bool,
        commits: AtomicUsize,
    }

    impl StubStore {
        fn new(records: Vec<Transaction>) -> Self {
            Self {
                records: Mutex::new(records),
                vanished: Vec::new(),
                fail_commit: false,
                commits: AtomicUsize::new(0),
            }
        }

        fn commit_count(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        fn ids(&self) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .map(|t| t.id.clone())
                .collect()
        }
    }

    #[async_trait]
    impl TransactionStore for StubStore {
        async fn fetch_all(&self) -> StoreResult<Vec<Transaction>> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn exists(&self, id: &str) -> StoreResult<bool> {
            if self.vanished.iter().any(|v| v == id) {
                return Ok(false);
            }
            Ok(self.records.lock().unwrap().iter().any(|t| t.id == id))
        }

        async fn delete_batch(&self, ids: &[String]) -> StoreResult<()> {
            if self.fail_commit {
                return Err(StoreError::Backend {
                    message: "commit rejected".to_string(),
                });
            }
            self.commits.fetch_add(1, Ordering::SeqCst);
            let mut records = self.records.lock().unwrap();
            records.retain(|t| !ids.contains(&t.id));
            Ok(())
        }
    }

    async fn run(store: &StubStore) -> CoreResult<DedupOutcome> {
        let config = DedupConfig::default();
        let matcher = FieldMatcher::default();
        run_deduplication(store, &matcher, &config).await
    }

    #[tokio::test]
    async fn test_removes_duplicates_and_keeps_survivor() {
        let store = StubStore::new(vec![
            record("a", "Coffee Shop", "08:00:00"),
            record("b", "Coffee Shop", "08:00:30"),
            record("c", "Grocery", "08:00:10"),
        ]);

        let outcome = run(&store).await.unwrap();
        assert_eq!(outcome.removed_count, 1);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(store.commit_count(), 1);

        let remaining = store.ids();
        assert!(remaining.contains(&"a".to_string()));
        assert!(!remaining.contains(&"b".to_string()));
        assert!(remaining.contains(&"c".to_string()));
    }

    #[tokio::test]
    async fn test_empty_store_short_circuits() {
        let store = StubStore::new(Vec::new());
        let outcome = run(&store).await.unwrap();
        assert_eq!(outcome.removed_count, 0);
        assert!(outcome.groups.is_empty());
        assert_eq!(store.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_no_duplicates_issues_no_commit() {
        let store = StubStore::new(vec![
            record("a", "Coffee Shop", "08:00:00"),
            record("b", "Grocery", "08:00:10"),
        ]);
        let outcome = run(&store).await.unwrap();
        assert_eq!(outcome.removed_count, 0);
        assert!(outcome.groups.is_empty());
        assert_eq!(store.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_vanished_candidate_is_skipped_without_error() {
        let mut store = StubStore::new(vec![
            record("a", "Coffee Shop", "08:00:00"),
            record("b", "Coffee Shop", "08:00:30"),
            record("c", "Grocery", "08:00:10"),
            record("d", "Grocery", "08:00:40"),
        ]);
        store.vanished = vec!["b".to_string()];

        let outcome = run(&store).await.unwrap();
        // b vanished between read and verification; only d is committed
        assert_eq!(outcome.removed_count, 1);
        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(store.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_all_candidates_vanished_still_reports_groups() {
        let mut store = StubStore::new(vec![
            record("a", "Coffee Shop", "08:00:00"),
            record("b", "Coffee Shop", "08:00:30"),
        ]);
        store.vanished = vec!["b".to_string()];

        let outcome = run(&store).await.unwrap();
        assert_eq!(outcome.removed_count, 0);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(store.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_commit_failure_aborts_run() {
        let mut store = StubStore::new(vec![
            record("a", "Coffee Shop", "08:00:00"),
            record("b", "Coffee Shop", "08:00:30"),
        ]);
        store.fail_commit = true;

        let err = run(&store).await.unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::StoreBackend);
        assert_eq!(store.ids().len(), 2);
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let store = StubStore::new(vec![
            record("a", "Coffee Shop", "08:00:00"),
            record("b", "Coffee Shop", "08:00:30"),
            record("c", "Coffee Shop", "08:00:45"),
        ]);

        let first = run(&store).await.unwrap();
        assert_eq!(first.removed_count, 2);

        let second = run(&store).await.unwrap();
        assert_eq!(second.removed_count, 0);
        assert!(second.groups.is_empty());
        assert_eq!(store.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_engine_sorts_out_of_order_snapshot() {
        let store = StubStore::new(vec![
            record("b", "Coffee Shop", "08:00:30"),
            record("a", "Coffee Shop", "08:00:00"),
        ]);

        let outcome = run(&store).await.unwrap();
        assert_eq!(outcome.removed_count, 1);
        assert_eq!(store.ids(), vec!["a".to_string()]);
    }
}
