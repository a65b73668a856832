//! Trend Report
//!
//! Month by month income, expenses and profit, with the change in expenses
//! against the previous calendar month.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{Money, Transaction, YearMonth};
use crate::services::{monthly_trends, percentage_change};

/// One month of the trend report
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub month: YearMonth,
    pub income: Money,
    pub expenses: Money,
    pub profit: Money,
    pub transaction_count: usize,
    /// Percent change in expenses since the previous calendar month;
    /// `None` when that month has no expenses
    pub expense_change: Option<f64>,
    /// Profit as a percentage of income; `None` without income
    pub profit_margin: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TrendReport {
    /// Oldest month first
    pub rows: Vec<TrendRow>,
    pub currency_symbol: String,
}

impl TrendReport {
    pub fn generate<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let months = monthly_trends(transactions);
        let mut rows: Vec<TrendRow> = Vec::with_capacity(months.len());

        for totals in months {
            let previous = rows
                .last()
                .filter(|row| row.month == totals.month.prev())
                .map(|row| row.expenses)
                .unwrap_or_default();

            rows.push(TrendRow {
                month: totals.month,
                income: totals.income,
                expenses: totals.expenses,
                profit: totals.profit,
                transaction_count: totals.transaction_count,
                expense_change: percentage_change(totals.expenses, previous),
                profit_margin: totals.profit_margin(),
            });
        }

        Self {
            rows,
            currency_symbol: "$".to_string(),
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly Trends\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14} {:>12} {:>10}\n",
            "Month", "Income", "Expenses", "Profit", "Exp. Change", "Margin"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<8} {:>14} {:>14} {:>14} {:>12} {:>10}\n",
                row.month.to_string(),
                row.income.format_with_symbol(&self.currency_symbol),
                row.expenses.format_with_symbol(&self.currency_symbol),
                row.profit.format_with_symbol(&self.currency_symbol),
                format_percent(row.expense_change, true),
                format_percent(row.profit_margin, false),
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Month",
            "Income",
            "Expenses",
            "Profit",
            "Transaction Count",
            "Expense Change",
            "Profit Margin",
        ])?;

        for row in &self.rows {
            let change = row.expense_change.map(|c| format!("{:.2}", c)).unwrap_or_default();
            let margin = row.profit_margin.map(|m| format!("{:.2}", m)).unwrap_or_default();
            csv.write_record([
                row.month.to_string().as_str(),
                row.income.to_decimal_string().as_str(),
                row.expenses.to_decimal_string().as_str(),
                row.profit.to_decimal_string().as_str(),
                row.transaction_count.to_string().as_str(),
                change.as_str(),
                margin.as_str(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

fn format_percent(value: Option<f64>, signed: bool) -> String {
    match value {
        Some(v) if signed => format!("{:+.1}%", v),
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}
