//! Duplicate group detection and survivor selection
//!
//! Both operations are pure: they classify records and recommend a
//! subset for deletion, nothing more. Persisting the removals is the
//! engine's job.

use txsweep_config::ChainingPolicy;

use crate::error::{CoreError, CoreResult};
use crate::matcher::TransactionMatcher;
use crate::model::{DuplicateGroup, Transaction};

/// The outcome of splitting a duplicate group: one record to keep and
/// the rest to remove
#[derive(Debug, Clone)]
pub struct SurvivorSelection {
    /// The single transaction retained from the group
    pub survivor: Transaction,
    /// Removal candidates, in group order
    pub removals: Vec<Transaction>,
}

/// Partition transactions into duplicate groups
///
/// `transactions` must be sorted by date ascending. A greedy
/// left-to-right scan anchors a candidate group on each unclaimed
/// record; later records join when the matcher accepts them against the
/// anchor and their timestamp falls within `window_millis` of the
/// reference member selected by `chaining`. Singletons are omitted:
/// every returned group has at least 2 members, and no record appears
/// in more than one group.
///
/// Records whose date does not parse cannot be placed on the timeline
/// and are skipped with a warning.
pub fn find_duplicate_groups(
    transactions: &[Transaction],
    window_millis: i64,
    chaining: ChainingPolicy,
    matcher: &dyn TransactionMatcher,
) -> Vec<DuplicateGroup> {
    let mut claimed = vec![false; transactions.len()];
    let mut groups = Vec::new();

    for i in 0..transactions.len() {
        if claimed[i] {
            continue;
        }
        let anchor = &transactions[i];
        let anchor_ts = match anchor.timestamp_millis() {
            Some(ts) => ts,
            None => {
                log::warn!("skipping {}: unparseable date {:?}", anchor.id, anchor.datetime());
                continue;
            }
        };

        let mut members = vec![anchor.clone()];
        let mut last_ts = anchor_ts;

        for j in (i + 1)..transactions.len() {
            if claimed[j] {
                continue;
            }
            let candidate = &transactions[j];
            let ts = match candidate.timestamp_millis() {
                Some(ts) => ts,
                None => continue,
            };
            let reference = match chaining {
                ChainingPolicy::FirstMember => anchor_ts,
                ChainingPolicy::Consecutive => last_ts,
            };
            // Sorted input: once a candidate falls outside the window,
            // every later one does too
            if ts - reference > window_millis {
                break;
            }
            if !matcher.matches(anchor, candidate) {
                continue;
            }
            claimed[j] = true;
            last_ts = ts;
            members.push(candidate.clone());
        }

        if members.len() >= 2 {
            claimed[i] = true;
            groups.push(DuplicateGroup::from_vec(members));
        }
    }

    groups
}

/// Split a duplicate group into its survivor and removal candidates
///
/// The survivor is the member with the minimum timestamp; timestamp
/// ties break by smallest id, so the choice does not depend on the
/// order the group's members arrived in. Removals preserve group order.
pub fn select_survivor(group: &DuplicateGroup) -> CoreResult<SurvivorSelection> {
    let members = group.members();
    if members.len() < 2 {
        return Err(CoreError::InvalidGroup {
            size: members.len(),
        });
    }

    let survivor_idx = members
        .iter()
        .enumerate()
        .min_by_key(|(_, tx)| (tx.timestamp_millis().unwrap_or(i64::MAX), tx.id.clone()))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let survivor = members[survivor_idx].clone();
    let removals = members
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != survivor_idx)
        .map(|(_, tx)| tx.clone())
        .collect();

    Ok(SurvivorSelection { survivor, removals })
}

// ==================== Tests ====================
