//! Core data models for bizledger
//!
//! Transactions, the money type they are measured in, and the small value
//! types used to label and bucket them.

pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{CategoryCatalog, DEFAULT_CATEGORIES, DEFAULT_PAYMENT_METHODS};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::YearMonth;
pub use transaction::{
    NewTransaction, Transaction, TransactionKind, TransactionRecord, MAX_AMOUNT,
};
