//! Data sources
//!
//! A data source hands the rest of the crate a complete, validated
//! [`Ledger`] snapshot. Queries and reports never read files themselves.

pub mod csv;
pub mod file_io;
pub mod json;
pub mod sample;

pub use self::csv::CsvFile;
pub use file_io::{read_json, write_json_atomic};
pub use json::JsonFile;
pub use sample::SampleData;

use std::path::Path;

use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Anything that can deliver a ledger snapshot
pub trait LedgerSource {
    /// Human readable origin, for messages and logs
    fn describe(&self) -> String;

    /// Load the complete ledger
    fn load(&self) -> LedgerResult<Ledger>;
}

impl<S: LedgerSource + ?Sized> LedgerSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load(&self) -> LedgerResult<Ledger> {
        (**self).load()
    }
}

/// Ledger file formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// `.csv` is CSV, everything else is treated as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Open the data source for a ledger file
pub fn open_source(path: &Path) -> Box<dyn LedgerSource> {
    match SourceFormat::from_path(path) {
        SourceFormat::Csv => Box::new(CsvFile::new(path)),
        SourceFormat::Json => Box::new(JsonFile::new(path)),
    }
}
