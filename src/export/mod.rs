//! Export module for bizledger
//!
//! - CSV: transactions only (spreadsheet-compatible)
//! - JSON: transactions with query, summary and metadata
//! - YAML: same as JSON, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

pub use self::csv::{export_transactions_csv, CSV_HEADER};
pub use json::{export_json, import_from_json, ExportMetadata, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_yaml, import_from_yaml};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown export format '{}' (csv, json, yaml)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert_eq!(ExportFormat::Json.to_string(), "json");
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
