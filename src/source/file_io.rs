//! File helpers shared by the file-backed data sources and settings
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! ledger file is either the old version or the new one, never half written.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Read JSON from a file, returning the default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> LedgerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Source(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LedgerError::Source(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> LedgerResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let settings: Settings = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        write_json_atomic(&path, &settings).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded: Settings = read_json(&path).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_read_malformed_file_is_source_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Settings, _>(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Source(_)));
    }
}
