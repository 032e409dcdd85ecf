//! Core data models for transaction deduplication

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A transaction record as stored in the document collection
///
/// Records are read-only inputs to the deduplicator: the engine classifies
/// them and recommends removals, but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier, stable for the record's lifetime
    pub id: String,
    /// Transaction date (YYYY-MM-DD format)
    pub date: String,
    /// Transaction time (HH:MM:SS format, may be empty)
    #[serde(default)]
    pub time: String,
    /// Payee name
    #[serde(default)]
    pub payee: String,
    /// Transaction narration/description
    #[serde(default)]
    pub narration: String,
    /// Signed amount
    pub amount: Decimal,
    /// Currency code
    #[serde(default)]
    pub currency: String,
    /// Spending category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Transaction tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Metadata key-value pairs
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Get the transaction time as NaiveTime, midnight when absent
    pub fn time_naive(&self) -> Option<NaiveTime> {
        if self.time.is_empty() {
            return NaiveTime::from_hms_opt(0, 0, 0);
        }
        NaiveTime::parse_from_str(&self.time, "%H:%M:%S").ok()
    }

    /// Resolve the record to an absolute UTC instant in milliseconds
    ///
    /// Returns None when the date (or a non-empty time) does not parse;
    /// such records are excluded from duplicate grouping.
    pub fn timestamp_millis(&self) -> Option<i64> {
        let date = self.date_naive()?;
        let time = self.time_naive()?;
        Some(NaiveDateTime::new(date, time).and_utc().timestamp_millis())
    }

    /// Get formatted datetime string (date + time)
    pub fn datetime(&self) -> String {
        if self.time.is_empty() || self.time == "00:00:00" {
            self.date.clone()
        } else {
            format!("{} {}", self.date, self.time)
        }
    }

    /// Check if transaction has time information
    pub fn has_time(&self) -> bool {
        !self.time.is_empty() && self.time != "00:00:00"
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let payee = if self.payee.is_empty() {
            &self.narration
        } else {
            &self.payee
        };
        format!("{} - {}", self.date, payee)
    }
}

/// An ordered set of transactions judged to record the same real-world
/// event
///
/// Serializes transparently as an array of transactions, so a list of
/// groups has the wire shape `[[Transaction, ...], ...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuplicateGroup {
    members: Vec<Transaction>,
}

impl DuplicateGroup {
    /// Create a group, rejecting fewer than 2 members (a singleton is
    /// not a duplicate group)
    pub fn new(members: Vec<Transaction>) -> CoreResult<Self> {
        if members.len() < 2 {
            return Err(CoreError::InvalidGroup {
                size: members.len(),
            });
        }
        Ok(Self { members })
    }

    /// Construct without the size check; callers must have verified it
    pub(crate) fn from_vec(members: Vec<Transaction>) -> Self {
        debug_assert!(members.len() >= 2);
        Self { members }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the group holds no members (only possible through
    /// deserialization of malformed input)
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in group order
    pub fn members(&self) -> &[Transaction] {
        &self.members
    }

    /// Iterate over members
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.members.iter()
    }
}

// ==================== Tests ====================
