//! YAML Export functionality
//!
//! Same structure as the JSON export, preceded by a comment header.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::LedgerExport;

fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Export transactions to YAML
pub fn export_yaml<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerResult<()> {
    writeln!(writer, "# bizledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "# Source: {}", export.source).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(export_err)?;

    Ok(())
}

/// Read back a YAML export
pub fn import_from_yaml(yaml_str: &str) -> LedgerResult<LedgerExport> {
    let export: LedgerExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Source(e.to_string()))?;
    export.validate().map_err(LedgerError::Source)?;
    Ok(export)
}
