//! bizledger - business expense and income ledger
//!
//! Records a small business's expenses and income as immutable
//! transactions, filters them with composable queries, and aggregates them
//! into totals, category breakdowns and monthly trends.
//!
//! # Architecture
//!
//! - `models`: money, transaction ids, transactions and the category catalog
//! - `ledger`: the ordered, id-unique collection of transactions
//! - `source`: data sources delivering a ledger (sample data, JSON, CSV)
//! - `services`: queries, aggregation and the entry workflow
//! - `reports`: overview, category and trend reports
//! - `export`: CSV, JSON and YAML export
//! - `config`: path resolution and user settings
//! - `display`, `cli`: terminal formatting and command handlers
//! - `logging`: tracing subscriber setup for the binary
//!
//! # Example
//!
//! ```rust
//! use bizledger::services::{summarize, Query};
//! use bizledger::models::{Money, TransactionKind};
//! use bizledger::source::{LedgerSource, SampleData};
//!
//! let ledger = SampleData.load()?;
//! let expenses = Query::new().kind(TransactionKind::Expense).filter(&ledger);
//! let summary = summarize(expenses);
//! assert_eq!(summary.expenses, Money::from_cents(31540));
//! # Ok::<(), bizledger::error::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod source;

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use ledger::Ledger;
pub use models::{Money, Transaction, TransactionKind};
