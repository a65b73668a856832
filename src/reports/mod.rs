//! Reports module for bizledger
//!
//! Each report is generated from any sequence of transactions (usually the
//! output of a query) and can be printed or exported as CSV.

pub mod category;
pub mod overview;
pub mod trends;

pub use category::{CategoryReport, CategoryRow};
pub use overview::OverviewReport;
pub use trends::{TrendReport, TrendRow};
