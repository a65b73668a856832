//! Built-in demonstration dataset
//!
//! Six transactions of a small business in late August 2024, used when no
//! ledger file is configured.

use chrono::NaiveDate;

use super::LedgerSource;
use crate::error::{LedgerResult, TransactionField, ValidationError};
use crate::ledger::Ledger;
use crate::models::{Money, NewTransaction, Transaction, TransactionId, TransactionKind};

/// (id, kind, category, cents, description, day of August 2024, payment method)
const SAMPLE_ROWS: &[(u64, TransactionKind, &str, i64, &str, u32, &str)] = &[
    (
        1,
        TransactionKind::Expense,
        "Transporte",
        4550,
        "Gasolina vehículo empresa",
        29,
        "Tarjeta Crédito",
    ),
    (
        2,
        TransactionKind::Income,
        "Ventas",
        120000,
        "Pago cliente ABC Corp",
        28,
        "Transferencia",
    ),
    (
        3,
        TransactionKind::Expense,
        "Alimentación",
        2890,
        "Almuerzo reunión equipo",
        28,
        "Efectivo",
    ),
    (
        4,
        TransactionKind::Expense,
        "Suministros",
        15600,
        "Material oficina - papelería",
        27,
        "Tarjeta Débito",
    ),
    (
        5,
        TransactionKind::Income,
        "Servicios",
        85000,
        "Consultoría proyecto XYZ",
        26,
        "Transferencia",
    ),
    (
        6,
        TransactionKind::Expense,
        "Transporte",
        8500,
        "Mantenimiento vehículo",
        25,
        "Tarjeta Crédito",
    ),
];

/// Data source serving the demonstration dataset
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl LedgerSource for SampleData {
    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }

    fn load(&self) -> LedgerResult<Ledger> {
        let transactions = SAMPLE_ROWS
            .iter()
            .map(|&(id, kind, category, cents, description, day, payment)| {
                let date = NaiveDate::from_ymd_opt(2024, 8, day).ok_or_else(|| {
                    ValidationError::invalid(TransactionField::Date, format!("2024-08-{}", day))
                })?;
                Transaction::new(NewTransaction {
                    id: TransactionId::new(id),
                    kind,
                    category: category.to_string(),
                    amount: Money::from_cents(cents),
                    description: description.to_string(),
                    date,
                    payment_method: Some(payment.to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ledger::from_transactions(transactions)
    }
}
