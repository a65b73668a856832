//! CLI command for data export

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{create_output, LedgerContext, QueryArgs};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_json, export_transactions_csv, export_yaml, ExportFormat, LedgerExport};
use crate::models::Transaction;
use crate::services::Query;

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Export format: csv, json or yaml
    #[arg(short, long, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub query: QueryArgs,
}

/// Export the (filtered) ledger
pub fn handle_export_command(ctx: &LedgerContext, args: ExportArgs) -> LedgerResult<()> {
    let ledger = ctx.load()?;
    let query = args.query.to_query();
    let matched = query.filter(&ledger);
    let count = matched.len();

    match &args.output {
        Some(path) => {
            let mut writer = create_output(path)?;
            write_export(ctx, args.format, &query, matched, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            info!(format = %args.format, count, path = %path.display(), "exported ledger");
            println!(
                "Exported {} transactions ({}) to: {}",
                count,
                args.format,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(ctx, args.format, &query, matched, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    ctx: &LedgerContext,
    format: ExportFormat,
    query: &Query,
    matched: Vec<&Transaction>,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => {
            export_transactions_csv(matched, writer)?;
        }
        ExportFormat::Json => {
            let export = LedgerExport::new(matched, query, ctx.source().describe());
            export_json(&export, writer)?;
        }
        ExportFormat::Yaml => {
            let export = LedgerExport::new(matched, query, ctx.source().describe());
            export_yaml(&export, writer)?;
        }
    }
    Ok(())
}
