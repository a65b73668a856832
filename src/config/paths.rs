//! Path management for bizledger
//!
//! ## Path Resolution Order
//!
//! 1. `BIZLEDGER_DATA_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/bizledger`
//! 3. The platform config directory reported by the `directories` crate
//!    (`~/.config/bizledger`, `%APPDATA%\bizledger`, ...)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BIZLEDGER_DATA_DIR";

/// Manages all paths used by bizledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> LedgerResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ledger file created by `init` and used by `add --save` when no
    /// other file is configured
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join("ledger.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }

    /// Check if bizledger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> LedgerResult<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("bizledger"));
    }

    ProjectDirs::from("", "", "bizledger")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine a config directory".into()))
}
