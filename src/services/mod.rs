//! Service layer for bizledger
//!
//! Pure business logic over a loaded [`Ledger`](crate::ledger::Ledger):
//! filtering, aggregation, and turning form input into transactions.

pub mod aggregate;
pub mod entry;
pub mod query;

pub use aggregate::{
    by_category, categories, date_range, monthly_trends, net, percentage_change, summarize,
    total_expenses, total_income, CategoryBreakdown, CategoryTotal, MonthlyTotals, Summary,
};
pub use entry::{EntryService, TransactionForm};
pub use query::Query;
