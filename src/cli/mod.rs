//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print to
//! stdout and return [`LedgerResult`]; the binary turns errors into an exit
//! code.

pub mod config;
pub mod export;
pub mod report;
pub mod transaction;

pub use config::{handle_config_command, handle_init_command};
pub use export::{handle_export_command, ExportArgs};
pub use report::{
    handle_categories_command, handle_summary_command, handle_trends_command, CategoriesArgs,
    SummaryArgs, TrendsArgs,
};
pub use transaction::{
    handle_add_command, handle_list_command, handle_show_command, AddArgs, ListArgs, ShowArgs,
};

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::TransactionKind;
use crate::services::Query;
use crate::source::{open_source, JsonFile, LedgerSource, SampleData, SourceFormat};

/// Filter flags shared by the listing, report and export commands
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Text to look for in descriptions and categories (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category label
    #[arg(short, long)]
    pub category: Option<String>,

    /// Transaction type: expense or income
    #[arg(short = 't', long = "type")]
    pub kind: Option<TransactionKind>,

    /// Exact payment method
    #[arg(short, long)]
    pub payment: Option<String>,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl QueryArgs {
    pub fn to_query(&self) -> Query {
        Query {
            search_text: self.search.clone(),
            category: self.category.clone(),
            kind: self.kind,
            payment_method: self.payment.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

/// Everything a command needs to find and read the ledger
#[derive(Debug, Clone)]
pub struct LedgerContext {
    pub paths: LedgerPaths,
    pub settings: Settings,
    /// `--file`, else the configured data file; `None` means sample data
    pub file: Option<PathBuf>,
}

impl LedgerContext {
    pub fn new(paths: LedgerPaths, settings: Settings, file_override: Option<PathBuf>) -> Self {
        let file = file_override.or_else(|| settings.data_file.clone());
        Self {
            paths,
            settings,
            file,
        }
    }

    pub fn source(&self) -> Box<dyn LedgerSource> {
        match &self.file {
            Some(path) => open_source(path),
            None => Box::new(SampleData),
        }
    }

    pub fn load(&self) -> LedgerResult<Ledger> {
        let source = self.source();
        debug!(source = %source.describe(), "loading ledger");
        source.load()
    }

    /// JSON file that new entries are appended to
    pub fn save_target(&self) -> LedgerResult<JsonFile> {
        match &self.file {
            Some(path) if SourceFormat::from_path(path) == SourceFormat::Json => {
                Ok(JsonFile::new(path))
            }
            Some(path) => Err(LedgerError::Config(format!(
                "Cannot save to {}: only JSON ledger files can be written",
                path.display()
            ))),
            None => Ok(JsonFile::new(self.paths.ledger_file())),
        }
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Open a buffered output file for reports and exports
pub(crate) fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
