//! CSV ledger file
//!
//! Columns are matched by header name, so their order is free:
//! `id, type, date, category, description, amount, paymentMethod`.
//! Without an `id` column rows are numbered from 1 in file order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::debug;

use super::LedgerSource;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Transaction, TransactionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Id,
    Kind,
    Date,
    Category,
    Description,
    Amount,
    PaymentMethod,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        let normalized: String = header
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "id" => Some(Self::Id),
            "type" | "kind" => Some(Self::Kind),
            "date" => Some(Self::Date),
            "category" => Some(Self::Category),
            "description" => Some(Self::Description),
            "amount" => Some(Self::Amount),
            "paymentmethod" | "payment" => Some(Self::PaymentMethod),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    delimiter: u8,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse ledger rows from any reader
    pub fn parse<R: std::io::Read>(&self, reader: R) -> LedgerResult<Ledger> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns: HashMap<Column, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| Column::from_header(header).map(|c| (c, idx)))
            .collect();

        let mut transactions = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let txn = Transaction::try_from(row_to_record(&row, &columns, index))
                .map_err(|source| LedgerError::InvalidRecord { index, source })?;
            transactions.push(txn);
        }

        Ledger::from_transactions(transactions)
    }
}

fn cell<'r>(
    row: &'r StringRecord,
    columns: &HashMap<Column, usize>,
    column: Column,
) -> Option<&'r str> {
    columns
        .get(&column)
        .and_then(|&idx| row.get(idx))
        .filter(|value| !value.is_empty())
}

/// Cells stay text; ids and amounts are interpreted by the record conversion
fn row_to_record(
    row: &StringRecord,
    columns: &HashMap<Column, usize>,
    index: usize,
) -> TransactionRecord {
    let text = |column| cell(row, columns, column).map(str::to_string);

    let id = if columns.contains_key(&Column::Id) {
        text(Column::Id).map(Value::String)
    } else {
        Some(Value::from(index as u64 + 1))
    };

    TransactionRecord {
        id,
        kind: text(Column::Kind),
        category: text(Column::Category),
        amount: text(Column::Amount).map(Value::String),
        description: text(Column::Description),
        date: text(Column::Date),
        payment_method: text(Column::PaymentMethod),
    }
}

impl LedgerSource for CsvFile {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    fn load(&self) -> LedgerResult<Ledger> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            LedgerError::Source(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        let ledger = self.parse(file)?;
        debug!(path = %self.path.display(), count = ledger.len(), "loaded CSV ledger");
        Ok(ledger)
    }
}
