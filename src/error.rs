//! Custom error types for bizledger
//!
//! `ValidationError` is the only error a transaction can raise at
//! construction time. `LedgerError` is the wider hierarchy used by data
//! sources, the creation workflow, exports and the CLI.

use std::fmt;

use thiserror::Error;

use crate::models::Money;

/// The transaction field a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionField {
    Id,
    Kind,
    Category,
    Amount,
    Description,
    Date,
    PaymentMethod,
}

impl TransactionField {
    /// Field name as it appears in ledger files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Kind => "type",
            Self::Category => "category",
            Self::Amount => "amount",
            Self::Description => "description",
            Self::Date => "date",
            Self::PaymentMethod => "paymentMethod",
        }
    }
}

impl fmt::Display for TransactionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a transaction could not be constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank
    #[error("{0} is required")]
    Missing(TransactionField),

    /// A money field was zero or negative
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: TransactionField, value: Money },

    /// A field was present but could not be interpreted
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: TransactionField,
        reason: String,
    },
}

impl ValidationError {
    pub fn invalid(field: TransactionField, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// The field that failed validation
    pub fn field(&self) -> TransactionField {
        match self {
            Self::Missing(field) => *field,
            Self::NotPositive { field, .. } => *field,
            Self::Invalid { field, .. } => *field,
        }
    }
}

/// The main error type for bizledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A transaction failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An entry in a ledger file failed validation
    #[error("Invalid record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// A data source could not deliver a ledger
    #[error("Data source error: {0}")]
    Source(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for transactions
    pub fn duplicate_transaction(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidRecord { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for bizledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
