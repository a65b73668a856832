//! JSON ledger file
//!
//! Accepts `{"transactions": [...]}` or a bare array of transaction
//! objects. A file that does not exist yet is an empty ledger.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::file_io::{read_json, write_json_atomic};
use super::LedgerSource;
use crate::error::LedgerResult;
use crate::ledger::{Ledger, LedgerDocument};
use crate::models::Transaction;

#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a transaction to the end of the file
    ///
    /// The whole ledger is re-read and validated first, so the new entry
    /// cannot reuse an id that is already on disk.
    pub fn append(&self, txn: &Transaction) -> LedgerResult<Ledger> {
        let mut ledger = self.load()?;
        ledger.push(txn.clone())?;
        write_json_atomic(&self.path, &LedgerDocument::from(&ledger))?;
        info!(path = %self.path.display(), id = %txn.id(), "appended transaction");
        Ok(ledger)
    }
}

impl LedgerSource for JsonFile {
    fn describe(&self) -> String {
        format!("JSON file {}", self.path.display())
    }

    fn load(&self) -> LedgerResult<Ledger> {
        let document: LedgerDocument = read_json(&self.path)?;
        let ledger = document.into_ledger()?;
        debug!(path = %self.path.display(), count = ledger.len(), "loaded JSON ledger");
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::{Money, NewTransaction, TransactionId, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample(id: u64) -> Transaction {
        Transaction::new(NewTransaction {
            id: TransactionId::new(id),
            kind: TransactionKind::Income,
            category: "Ventas".into(),
            amount: Money::from_cents(50000),
            description: "Factura 12".into(),
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            payment_method: None,
        })
        .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonFile::new(temp_dir.path().join("ledger.json"));
        assert!(source.load().unwrap().is_empty());
    }

    #[test]
    fn test_loads_original_mock_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"[
              {"id": 1, "type": "expense", "category": "Transporte", "amount": -45.50,
               "description": "Gasolina", "date": "2024-08-29", "paymentMethod": "Tarjeta Crédito"},
              {"id": 2, "type": "income", "category": "Ventas", "amount": 1200.00,
               "description": "Cliente ABC", "date": "2024-08-28"}
            ]"#,
        )
        .unwrap();

        let ledger = JsonFile::new(&path).load().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[0].amount(), Money::from_cents(4550));
        assert_eq!(ledger.transactions()[1].payment_method(), None);
    }

    #[test]
    fn test_append_keeps_order_and_rejects_reused_id() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonFile::new(temp_dir.path().join("ledger.json"));

        source.append(&sample(1)).unwrap();
        source.append(&sample(2)).unwrap();

        let ledger = source.load().unwrap();
        let ids: Vec<u64> = ledger.iter().map(|t| t.id().value()).collect();
        assert_eq!(ids, vec![1, 2]);

        let err = source.append(&sample(2)).unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_entry_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"transactions": [{"id": 1, "type": "refund", "category": "Otros",
                "amount": "3.00", "description": "x", "date": "2024-08-01"}]}"#,
        )
        .unwrap();

        let err = JsonFile::new(&path).load().unwrap_err();
        assert!(err.is_validation());
    }
}
