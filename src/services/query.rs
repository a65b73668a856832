//! Transaction queries
//!
//! A [`Query`] describes a filter over a ledger without touching it. Every
//! field is optional and an absent field matches everything. Supplied
//! predicates are combined with AND; the free-text search matches the
//! description OR the category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;
use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Case-insensitive substring of the description or category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,

    /// Exact, case-sensitive category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,

    /// Exact, case-sensitive payment method label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Inclusive lower date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,

    /// Inclusive upper date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn from_date(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// True when no predicate is supplied
    pub fn is_empty(&self) -> bool {
        self.search_text.as_deref().map_or(true, str::is_empty)
            && self.category.is_none()
            && self.kind.is_none()
            && self.payment_method.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }

    /// Check a single transaction against every supplied predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        let needle = self.needle();
        self.matches_with(txn, needle.as_deref())
    }

    /// Keep the transactions that satisfy the query, in their original order
    pub fn apply<'a, I>(&self, transactions: I) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let needle = self.needle();
        transactions
            .into_iter()
            .filter(|txn| self.matches_with(txn, needle.as_deref()))
            .collect()
    }

    /// Apply the query to a whole ledger
    pub fn filter<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Transaction> {
        let matched = self.apply(ledger);
        tracing::debug!(
            total = ledger.len(),
            matched = matched.len(),
            "applied query"
        );
        matched
    }

    /// Lowercased search text, or None when the search matches everything
    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_with(&self, txn: &Transaction, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = txn.description().to_lowercase().contains(needle)
                || txn.category().to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if txn.category() != category {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if txn.kind() != kind {
                return false;
            }
        }

        if let Some(ref method) = self.payment_method {
            if txn.payment_method() != Some(method.as_str()) {
                return false;
            }
        }

        if let Some(from) = self.from {
            if txn.date() < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.date() > to {
                return false;
            }
        }

        true
    }
}
