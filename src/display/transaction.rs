//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency_symbol: &str) -> Self {
        Self {
            id: txn.id().to_string(),
            date: txn.date().format("%Y-%m-%d").to_string(),
            kind: txn.kind().to_string(),
            category: txn.category().to_string(),
            description: super::truncate(txn.description(), 40),
            payment: txn.payment_method().unwrap_or("-").to_string(),
            amount: txn.signed_amount().format_with_symbol(currency_symbol),
        }
    }
}

/// Format transactions as a table; expenses show as negative amounts
pub fn format_transaction_table(transactions: &[&Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, currency_symbol));
    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!("Date:        {}\n", txn.date().format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind()));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount().format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category()));
    output.push_str(&format!("Description: {}\n", txn.description()));

    if let Some(method) = txn.payment_method() {
        output.push_str(&format!("Payment:     {}\n", method));
    }

    output
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, currency_symbol: &str) -> String {
    format!(
        "{} {} {} {} ({})",
        txn.id(),
        txn.date().format("%Y-%m-%d"),
        txn.signed_amount().format_with_symbol(currency_symbol),
        txn.description(),
        txn.category()
    )
}
