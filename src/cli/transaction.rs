//! CLI commands for listing, showing and adding transactions

use clap::Args;
use tracing::{info, warn};

use super::{LedgerContext, QueryArgs};
use crate::display::{
    format_transaction_details, format_transaction_short, format_transaction_table,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::TransactionId;
use crate::services::{summarize, EntryService, TransactionForm};
use crate::source::LedgerSource;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Show at most this many transactions
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Transaction ID (e.g. 3 or txn-3)
    pub id: TransactionId,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// expense or income
    #[arg(short = 't', long = "type")]
    pub kind: String,

    /// Amount, e.g. 45.50
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: String,

    #[arg(short, long)]
    pub category: String,

    #[arg(short, long)]
    pub description: String,

    /// Date in the configured format (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Payment method
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Append the transaction to the ledger file
    #[arg(long)]
    pub save: bool,
}

impl AddArgs {
    fn to_form(&self) -> TransactionForm {
        TransactionForm {
            kind: self.kind.clone(),
            amount: self.amount.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            payment_method: self.payment.clone(),
        }
    }
}

/// List transactions matching the query flags
pub fn handle_list_command(ctx: &LedgerContext, args: ListArgs) -> LedgerResult<()> {
    let ledger = ctx.load()?;
    let matched = args.query.to_query().filter(&ledger);
    let summary = summarize(matched.iter().copied());

    let shown = match args.limit {
        Some(limit) => &matched[..limit.min(matched.len())],
        None => &matched[..],
    };

    print!("{}", format_transaction_table(shown, ctx.currency()));
    println!();
    println!(
        "Showing {} of {} matching transactions ({} total)",
        shown.len(),
        matched.len(),
        ledger.len()
    );
    println!(
        "Expenses: {}  Income: {}  Net: {}",
        summary.expenses.format_with_symbol(ctx.currency()),
        summary.income.format_with_symbol(ctx.currency()),
        summary.net.format_with_symbol(ctx.currency())
    );

    Ok(())
}

/// Show one transaction in detail
pub fn handle_show_command(ctx: &LedgerContext, args: ShowArgs) -> LedgerResult<()> {
    let ledger = ctx.load()?;
    let txn = ledger
        .get(args.id)
        .ok_or_else(|| LedgerError::transaction_not_found(args.id.to_string()))?;

    print!("{}", format_transaction_details(txn, ctx.currency()));
    Ok(())
}

/// Validate a new transaction and optionally append it to the ledger file
pub fn handle_add_command(ctx: &LedgerContext, args: AddArgs) -> LedgerResult<()> {
    let service = EntryService::new(&ctx.settings);
    let form = args.to_form();

    if !args.save {
        let ledger = ctx.load()?;
        let txn = service.create(&ledger, form)?;
        println!("Valid transaction (not saved, use --save to record it):");
        println!("  {}", format_transaction_short(&txn, ctx.currency()));
        return Ok(());
    }

    let target = ctx.save_target()?;
    let ledger = target.load()?;
    let txn = service.create(&ledger, form)?;
    target.append(&txn)?;
    info!(id = %txn.id(), path = %target.path().display(), "saved transaction");

    println!("Saved to {}:", target.path().display());
    println!("  {}", format_transaction_short(&txn, ctx.currency()));
    if ctx.file.is_none() {
        warn!(path = %target.path().display(), "saved outside the configured data source");
        println!(
            "Note: no ledger file is configured; run 'bizledger init' or pass --file {}",
            target.path().display()
        );
    }

    Ok(())
}
