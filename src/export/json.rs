//! JSON Export functionality
//!
//! Exports a (possibly filtered) ledger with the query that selected it and
//! its summary. The `transactions` array uses the ledger file format, so an
//! export is also a valid JSON ledger file.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::services::{categories, date_range, summarize, Query, Summary};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Where the ledger was loaded from
    pub source: String,

    /// Filter that selected the exported transactions
    #[serde(default, skip_serializing_if = "Query::is_empty")]
    pub query: Query,

    pub summary: Summary,

    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl LedgerExport {
    pub fn new<'a, I>(transactions: I, query: &Query, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let transactions: Vec<Transaction> = transactions.into_iter().cloned().collect();
        let summary = summarize(&transactions);

        let range = date_range(&transactions);

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories(&transactions).len(),
            earliest_transaction: range.map(|(first, _)| first.to_string()),
            latest_transaction: range.map(|(_, last)| last.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.into(),
            query: query.clone(),
            summary,
            transactions,
            metadata,
        }
    }

    /// Check the schema version and that the stored summary matches the
    /// stored transactions
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transactions, found {}",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }

        if summarize(&self.transactions) != self.summary {
            return Err("Summary does not match the exported transactions".to_string());
        }

        Ok(())
    }

    pub fn into_ledger(self) -> LedgerResult<Ledger> {
        Ledger::from_transactions(self.transactions)
    }
}

/// Export transactions to pretty-printed JSON
pub fn export_json<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Read back a JSON export
pub fn import_from_json(json_str: &str) -> LedgerResult<LedgerExport> {
    let export: LedgerExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Source(e.to_string()))?;
    export.validate().map_err(LedgerError::Source)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerDocument;
    use crate::models::{Money, TransactionKind};
    use crate::source::{LedgerSource, SampleData};

    #[test]
    fn test_export_structure() {
        let ledger = SampleData.load().unwrap();
        let export = LedgerExport::new(&ledger, &Query::new(), "sample data");

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 6);
        assert_eq!(export.metadata.category_count, 5);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-08-25"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-08-29"));
        assert_eq!(export.summary.net, Money::from_cents(173460));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_with_query() {
        let ledger = SampleData.load().unwrap();
        let query = Query::new().kind(TransactionKind::Income);
        let export = LedgerExport::new(query.filter(&ledger), &query, "sample data");

        let mut buffer = Vec::new();
        export_json(&export, &mut buffer).unwrap();
        let json = String::from_utf8(buffer).unwrap();
        assert!(json.contains("\"query\""));
        assert!(json.contains("\"type\": \"income\""));

        let imported = import_from_json(&json).unwrap();
        assert_eq!(imported.query, query);
        assert_eq!(imported.transactions.len(), 2);
        assert_eq!(imported.into_ledger().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_query_is_omitted() {
        let export = LedgerExport::new(&Ledger::new(), &Query::new(), "empty");
        let value = serde_json::to_value(&export).unwrap();
        assert!(value.get("query").is_none());
        assert_eq!(value["summary"]["net"], "0.00");
    }

    #[test]
    fn test_export_is_a_ledger_file() {
        let ledger = SampleData.load().unwrap();
        let export = LedgerExport::new(&ledger, &Query::new(), "sample data");
        let json = serde_json::to_string(&export).unwrap();

        let document: LedgerDocument = serde_json::from_str(&json).unwrap();
        let reloaded = document.into_ledger().unwrap();
        assert_eq!(reloaded.transactions(), ledger.transactions());
    }

    #[test]
    fn test_tampered_summary_is_rejected() {
        let ledger = SampleData.load().unwrap();
        let mut export = LedgerExport::new(&ledger, &Query::new(), "sample data");
        export.summary.income = Money::zero();
        let json = serde_json::to_string(&export).unwrap();

        assert!(import_from_json(&json).is_err());
    }
}
