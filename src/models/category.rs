//! Category catalog
//!
//! Category labels on transactions are free-form. A catalog lists the
//! labels a business normally uses and can optionally be closed, in which
//! case new entries must pick one of its labels.

use serde::{Deserialize, Serialize};

use crate::error::{TransactionField, ValidationError};

/// Labels offered by the entry form out of the box
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Transporte",
    "Alimentación",
    "Suministros",
    "Servicios",
    "Alquiler",
    "Ventas",
    "Otros",
];

/// Payment methods offered by the entry form out of the box
pub const DEFAULT_PAYMENT_METHODS: &[&str] = &[
    "Efectivo",
    "Tarjeta Crédito",
    "Tarjeta Débito",
    "Transferencia",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    /// When true, only listed labels are accepted for new entries
    #[serde(default)]
    pub closed: bool,

    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
}

fn default_labels() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self {
            closed: false,
            labels: default_labels(),
        }
    }
}

impl CategoryCatalog {
    /// A catalog that only accepts the given labels
    pub fn closed<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            closed: true,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Check a label for a new entry
    pub fn check(&self, label: &str) -> Result<(), ValidationError> {
        if label.trim().is_empty() {
            return Err(ValidationError::Missing(TransactionField::Category));
        }
        if self.closed && !self.contains(label) {
            return Err(ValidationError::invalid(
                TransactionField::Category,
                format!(
                    "'{}' is not one of: {}",
                    label,
                    self.labels.join(", ")
                ),
            ));
        }
        Ok(())
    }
}
