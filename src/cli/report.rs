//! CLI commands for reports

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use super::{create_output, LedgerContext, QueryArgs};
use crate::error::{LedgerError, LedgerResult};
use crate::reports::{CategoryReport, OverviewReport, TrendReport};

#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Number of recent transactions to show (default from settings)
    #[arg(short, long)]
    pub recent: Option<usize>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Show top N categories only
    #[arg(long)]
    pub top: Option<usize>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Business overview: totals, profit margin and recent transactions
pub fn handle_summary_command(ctx: &LedgerContext, args: SummaryArgs) -> LedgerResult<()> {
    let ledger = ctx.load()?;
    let matched = args.query.to_query().filter(&ledger);
    let recent = args.recent.unwrap_or(ctx.settings.recent_count);

    let report = OverviewReport::generate(matched, recent).with_currency(ctx.currency());

    match args.output {
        Some(path) => write_csv(&path, |w| report.export_csv(w)),
        None => {
            print!("{}", report.format_terminal());
            Ok(())
        }
    }
}

/// Totals per category, largest first
pub fn handle_categories_command(ctx: &LedgerContext, args: CategoriesArgs) -> LedgerResult<()> {
    let ledger = ctx.load()?;
    let matched = args.query.to_query().filter(&ledger);

    let mut report = CategoryReport::generate(matched).with_currency(ctx.currency());
    if let Some(top) = args.top {
        report = report.top(top);
    }

    match args.output {
        Some(path) => write_csv(&path, |w| report.export_csv(w)),
        None => {
            print!("{}", report.format_terminal());
            Ok(())
        }
    }
}

/// Month by month income, expenses and profit
pub fn handle_trends_command(ctx: &LedgerContext, args: TrendsArgs) -> LedgerResult<()> {
    let ledger = ctx.load()?;
    let matched = args.query.to_query().filter(&ledger);

    let report = TrendReport::generate(matched).with_currency(ctx.currency());

    match args.output {
        Some(path) => write_csv(&path, |w| report.export_csv(w)),
        None => {
            print!("{}", report.format_terminal());
            Ok(())
        }
    }
}

fn write_csv<F>(path: &Path, export: F) -> LedgerResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
{
    let mut writer = create_output(path)?;
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    println!("Report exported to: {}", path.display());
    Ok(())
}
