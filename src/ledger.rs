//! Ledger: the ordered collection of transactions for a business
//!
//! Order is insertion order and is never changed here. Queries and
//! aggregates borrow from a ledger; they never modify it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{LedgerError, LedgerResult, TransactionField, ValidationError};
use crate::models::{Transaction, TransactionId, TransactionRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from an ordered list, rejecting reused ids
    pub fn from_transactions(transactions: Vec<Transaction>) -> LedgerResult<Self> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for txn in &transactions {
            if !seen.insert(txn.id()) {
                return Err(LedgerError::duplicate_transaction(txn.id().to_string()));
            }
        }
        Ok(Self { transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// One past the largest id in use
    ///
    /// Fails only when the largest id is `u64::MAX`.
    pub fn next_id(&self) -> LedgerResult<TransactionId> {
        match self.transactions.iter().map(Transaction::id).max() {
            None => Ok(TransactionId::new(1)),
            Some(last) => last.next().ok_or_else(|| {
                ValidationError::invalid(TransactionField::Id, format!("no id left after {}", last))
                    .into()
            }),
        }
    }

    /// Append a newly created transaction
    pub fn push(&mut self, txn: Transaction) -> LedgerResult<()> {
        if self.get(txn.id()).is_some() {
            return Err(LedgerError::duplicate_transaction(txn.id().to_string()));
        }
        self.transactions.push(txn);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// On-disk ledger document: either `{"transactions": [...]}` or a bare array
///
/// Entries are kept as loose records until [`LedgerDocument::into_ledger`]
/// validates them, so a bad entry is reported with its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerDocument {
    Wrapped { transactions: Vec<TransactionRecord> },
    Bare(Vec<TransactionRecord>),
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self::Wrapped {
            transactions: Vec::new(),
        }
    }
}

impl LedgerDocument {
    pub fn into_ledger(self) -> LedgerResult<Ledger> {
        let records = match self {
            Self::Wrapped { transactions } | Self::Bare(transactions) => transactions,
        };
        let transactions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Transaction::try_from(record)
                    .map_err(|source| LedgerError::InvalidRecord { index, source })
            })
            .collect::<LedgerResult<Vec<_>>>()?;
        Ledger::from_transactions(transactions)
    }
}

impl From<&Ledger> for LedgerDocument {
    fn from(ledger: &Ledger) -> Self {
        Self::Wrapped {
            transactions: ledger.iter().map(Transaction::to_record).collect(),
        }
    }
}
