//! User settings for bizledger
//!
//! Display preferences, the default ledger file, and the category and
//! payment method lists offered when entering transactions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryCatalog, DEFAULT_PAYMENT_METHODS};

/// User settings for bizledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for entry input (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Ledger file loaded when `--file` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    #[serde(default)]
    pub categories: CategoryCatalog,

    #[serde(default = "default_payment_methods")]
    pub payment_methods: Vec<String>,

    /// Number of transactions in the overview's recent list
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_payment_methods() -> Vec<String> {
    DEFAULT_PAYMENT_METHODS.iter().map(|s| s.to_string()).collect()
}

fn default_recent_count() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            data_file: None,
            categories: CategoryCatalog::default(),
            payment_methods: default_payment_methods(),
            recent_count: default_recent_count(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
