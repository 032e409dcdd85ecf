//! Transaction deduplication core
//!
//! Modules:
//! - model: transaction record and duplicate group types
//! - matcher: the "same transaction" predicate seam and default matcher
//! - dedup: pure group detection and survivor selection
//! - store: the storage port the engine drives
//! - engine: full-run orchestration (fetch, group, verify, batch commit)

pub mod dedup;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod store;

pub use dedup::{find_duplicate_groups, select_survivor, SurvivorSelection};
pub use engine::{run_deduplication, DedupOutcome};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity, StoreError, StoreResult};
pub use matcher::{FieldMatcher, TransactionMatcher};
pub use model::{DuplicateGroup, Transaction};
pub use store::{StoreRef, TransactionStore};
