//! Category Report
//!
//! Totals per category label, largest first, with each label's share of
//! the grand total.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{Money, Transaction};
use crate::services::by_category;

/// One line of the category report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Percentage of the report total
    pub share: f64,
}

#[derive(Debug, Clone)]
pub struct CategoryReport {
    /// Sorted by total, largest first
    pub rows: Vec<CategoryRow>,
    /// Sum over every category, including rows cut by [`top`](Self::top)
    pub total: Money,
    pub transaction_count: usize,
    pub currency_symbol: String,
}

impl CategoryReport {
    pub fn generate<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let breakdown = by_category(transactions);
        let total = breakdown.total();

        let rows = breakdown
            .sorted_by_total()
            .into_iter()
            .map(|entry| CategoryRow {
                category: entry.category.clone(),
                total: entry.total,
                count: entry.count,
                share: breakdown.share(&entry.category).unwrap_or(0.0),
            })
            .collect::<Vec<_>>();

        Self {
            transaction_count: rows.iter().map(|r| r.count).sum(),
            rows,
            total,
            currency_symbol: "$".to_string(),
        }
    }

    /// Keep only the `limit` largest categories
    pub fn top(mut self, limit: usize) -> Self {
        self.rows.truncate(limit);
        self
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Category Breakdown\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<35} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<35} {:>14} {:>8} {:>7.1}%\n",
                crate::display::truncate(&row.category, 35),
                row.total.format_with_symbol(&self.currency_symbol),
                row.count,
                row.share
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<35} {:>14} {:>8}\n",
            "TOTAL",
            self.total.format_with_symbol(&self.currency_symbol),
            self.transaction_count
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Amount", "Transaction Count", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                row.category.as_str(),
                row.total.to_decimal_string().as_str(),
                row.count.to_string().as_str(),
                format!("{:.2}", row.share).as_str(),
            ])?;
        }

        csv.write_record([
            "TOTAL",
            self.total.to_decimal_string().as_str(),
            self.transaction_count.to_string().as_str(),
            "100.00",
        ])?;
        csv.flush()?;
        Ok(())
    }
}
