use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bizledger::cli::{
    handle_add_command, handle_categories_command, handle_config_command, handle_export_command,
    handle_init_command, handle_list_command, handle_show_command, handle_summary_command,
    handle_trends_command, AddArgs, CategoriesArgs, ExportArgs, LedgerContext, ListArgs, ShowArgs,
    SummaryArgs, TrendsArgs,
};
use bizledger::config::{LedgerPaths, Settings};
use bizledger::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "bizledger",
    author = "Kaylee Beyene",
    version,
    about = "Business expense and income ledger",
    long_about = "bizledger records business expenses and income, filters them, \
                  and summarizes them as totals, category breakdowns and monthly \
                  trends. Without a ledger file it runs on built-in sample data."
)]
struct Cli {
    /// Ledger file (.json or .csv); defaults to the configured data file
    #[arg(long, global = true, env = "BIZLEDGER_FILE")]
    file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one transaction
    Show(ShowArgs),

    /// Validate a new transaction, optionally saving it
    Add(AddArgs),

    /// Totals, profit margin and recent transactions
    #[command(alias = "dashboard")]
    Summary(SummaryArgs),

    /// Totals per category
    Categories(CategoriesArgs),

    /// Monthly income, expenses and profit
    Trends(TrendsArgs),

    /// Export transactions as CSV, JSON or YAML
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,

    /// Create the settings file and an empty ledger
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = LedgerContext::new(paths, settings, cli.file);

    match cli.command {
        Commands::List(args) => handle_list_command(&ctx, args)?,
        Commands::Show(args) => handle_show_command(&ctx, args)?,
        Commands::Add(args) => handle_add_command(&ctx, args)?,
        Commands::Summary(args) => handle_summary_command(&ctx, args)?,
        Commands::Categories(args) => handle_categories_command(&ctx, args)?,
        Commands::Trends(args) => handle_trends_command(&ctx, args)?,
        Commands::Export(args) => handle_export_command(&ctx, args)?,
        Commands::Config => handle_config_command(&ctx)?,
        Commands::Init => handle_init_command(&ctx)?,
    }

    Ok(())
}
