//! Overview Report
//!
//! Headline figures for a set of transactions: income, expenses, net,
//! profit margin and the most recent entries.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{Money, Transaction};
use crate::services::{summarize, Summary};

#[derive(Debug, Clone)]
pub struct OverviewReport {
    pub summary: Summary,
    /// Newest first
    pub recent: Vec<Transaction>,
    pub currency_symbol: String,
}

impl OverviewReport {
    /// Build the overview, keeping at most `recent_count` recent transactions
    ///
    /// Recent means latest date first; on equal dates the entry added later
    /// to the ledger comes first.
    pub fn generate<'a, I>(transactions: I, recent_count: usize) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let all: Vec<&Transaction> = transactions.into_iter().collect();
        let summary = summarize(all.iter().copied());

        let mut recent: Vec<&Transaction> = all.into_iter().rev().collect();
        recent.sort_by(|a, b| b.date().cmp(&a.date()));
        let recent = recent.into_iter().take(recent_count).cloned().collect();

        Self {
            summary,
            recent,
            currency_symbol: "$".to_string(),
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Business Overview\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}  ({} entries)\n",
            "Total Income:",
            self.money(self.summary.income),
            self.summary.income_count
        ));
        output.push_str(&format!(
            "{:<20} {:>14}  ({} entries)\n",
            "Total Expenses:",
            self.money(self.summary.expenses),
            self.summary.expense_count
        ));
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "Net Profit:",
            self.money(self.summary.net)
        ));
        match self.summary.profit_margin() {
            Some(margin) => {
                output.push_str(&format!("{:<20} {:>13.1}%\n", "Profit Margin:", margin))
            }
            None => output.push_str(&format!("{:<20} {:>14}\n", "Profit Margin:", "n/a")),
        }

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(80));
        output.push('\n');

        if self.recent.is_empty() {
            output.push_str("No transactions found.\n");
        }
        for txn in &self.recent {
            output.push_str(&format!(
                "{} {:<8} {:<36} {:>14}\n",
                txn.date(),
                txn.kind(),
                crate::display::truncate(txn.description(), 36),
                self.money(txn.signed_amount())
            ));
        }

        output
    }

    /// Export the headline figures to CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Metric", "Value"])?;
        csv.write_record(["Total Income", self.summary.income.to_decimal_string().as_str()])?;
        csv.write_record(["Total Expenses", self.summary.expenses.to_decimal_string().as_str()])?;
        csv.write_record(["Net Profit", self.summary.net.to_decimal_string().as_str()])?;

        let margin = self
            .summary
            .profit_margin()
            .map(|m| format!("{:.2}", m))
            .unwrap_or_default();
        csv.write_record(["Profit Margin", margin.as_str()])?;
        csv.write_record(["Transactions", self.summary.transaction_count.to_string().as_str()])?;
        csv.flush()?;
        Ok(())
    }
}
