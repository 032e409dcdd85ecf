//! Matching predicates for duplicate detection
//!
//! The matcher decides whether two transactions record the same
//! real-world event, ignoring time (the window check is the grouping
//! function's job). The rule is domain-specific, so it sits behind a
//! trait the caller can replace.

use once_cell::sync::Lazy;
use regex::Regex;
use txsweep_config::DedupConfig;

use crate::model::Transaction;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Domain-specific equality rule for "same transaction"
pub trait TransactionMatcher: Send + Sync {
    /// Whether the two records are duplicates of one another
    fn matches(&self, a: &Transaction, b: &Transaction) -> bool;
}

/// Default matcher comparing a configurable set of record fields
///
/// Payee comparison is case-insensitive with whitespace collapsed, and
/// falls back to the narration when the payee is empty. Amounts compare
/// numerically, so `4.50` equals `4.5`.
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    match_payee: bool,
    match_amount: bool,
    match_currency: bool,
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self {
            match_payee: true,
            match_amount: true,
            match_currency: true,
        }
    }
}

impl FieldMatcher {
    /// Build a matcher from the deduplication settings
    pub fn from_config(config: &DedupConfig) -> Self {
        Self {
            match_payee: config.match_payee,
            match_amount: config.match_amount,
            match_currency: config.match_currency,
        }
    }

    fn payee_key(tx: &Transaction) -> String {
        let raw = if tx.payee.is_empty() {
            &tx.narration
        } else {
            &tx.payee
        };
        WHITESPACE
            .replace_all(raw.trim(), " ")
            .to_lowercase()
    }
}

impl TransactionMatcher for FieldMatcher {
    fn matches(&self, a: &Transaction, b: &Transaction) -> bool {
        if self.match_payee && Self::payee_key(a) != Self::payee_key(b) {
            return false;
        }
        if self.match_amount && a.amount != b.amount {
            return false;
        }
        if self.match_currency && a.currency != b.currency {
            return false;
        }
        true
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn record(payee: &str, narration: &str, amount: &str, currency: &str) -> Transaction {
        Transaction {
            id: "t".to_string(),
            date: "2026-01-15".to_string(),
            time: String::new(),
            payee: payee.to_string(),
            narration: narration.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            currency: currency.to_string(),
            category: None,
            tags: Vec::new(),
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_payee_normalization() {
        let matcher = FieldMatcher::default();
        let a = record("Coffee  Shop", "", "-4.50", "USD");
        let b = record("  coffee shop ", "", "-4.5", "USD");
        assert!(matcher.matches(&a, &b));
    }

    #[test]
    fn test_narration_fallback() {
        let matcher = FieldMatcher::default();
        let a = record("", "Monthly rent", "-900", "USD");
        let b = record("", "monthly rent", "-900", "USD");
        assert!(matcher.matches(&a, &b));
    }

    #[test]
    fn test_amount_mismatch() {
        let matcher = FieldMatcher::default();
        let a = record("Coffee Shop", "", "-4.50", "USD");
        let b = record("Coffee Shop", "", "-4.51", "USD");
        assert!(!matcher.matches(&a, &b));
    }

    #[test]
    fn test_currency_mismatch_can_be_disabled() {
        let a = record("Coffee Shop", "", "-4.50", "USD");
        let b = record("Coffee Shop", "", "-4.50", "EUR");
        assert!(!FieldMatcher::default().matches(&a, &b));

        let mut config = DedupConfig::default();
        config.match_currency = false;
        assert!(FieldMatcher::from_config(&config).matches(&a, &b));
    }
}
