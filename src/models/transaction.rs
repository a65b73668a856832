//! Transaction model
//!
//! A transaction is an immutable record of money moving in or out of the
//! business. The stored amount is always a positive magnitude; whether it is
//! money spent or money received is carried by [`TransactionKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{TransactionField, ValidationError};

/// Date format used in ledger files
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount a single transaction may carry (999,999,999.99)
///
/// At this size, `i64` cents can total roughly 92 million transactions
/// before the sums saturate.
pub const MAX_AMOUNT: Money = Money::from_cents(99_999_999_999);

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// Lowercase tag used in files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        })
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "gasto" => Ok(Self::Expense),
            "income" | "ingreso" => Ok(Self::Income),
            "" => Err(ValidationError::Missing(TransactionField::Kind)),
            other => Err(ValidationError::invalid(
                TransactionField::Kind,
                format!("unknown transaction type '{}'", other),
            )),
        }
    }
}

/// Inputs for constructing a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    pub payment_method: Option<String>,
}

/// A validated financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    amount: Money,
    description: String,
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<String>,
}

impl Transaction {
    /// Construct a transaction from already-typed inputs
    ///
    /// Fails when the amount is not strictly positive or above
    /// [`MAX_AMOUNT`], or when the description or category is blank. The
    /// stored fields are exactly the inputs.
    pub fn new(input: NewTransaction) -> Result<Self, ValidationError> {
        if !input.amount.is_positive() {
            return Err(ValidationError::NotPositive {
                field: TransactionField::Amount,
                value: input.amount,
            });
        }
        if input.amount > MAX_AMOUNT {
            return Err(ValidationError::invalid(
                TransactionField::Amount,
                format!("{} exceeds the maximum of {}", input.amount, MAX_AMOUNT),
            ));
        }
        if input.description.trim().is_empty() {
            return Err(ValidationError::Missing(TransactionField::Description));
        }
        if input.category.trim().is_empty() {
            return Err(ValidationError::Missing(TransactionField::Category));
        }

        Ok(Self {
            id: input.id,
            kind: input.kind,
            category: input.category,
            amount: input.amount,
            description: input.description,
            date: input.date,
            payment_method: input.payment_method,
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Positive magnitude of the transaction
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Amount with the direction applied: negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Expense => -self.amount,
            TransactionKind::Income => self.amount,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    /// Loose record form, as written to ledger files
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            id: Some(Value::from(self.id.value())),
            kind: Some(self.kind.as_str().to_string()),
            category: Some(self.category.clone()),
            amount: Some(Value::String(self.amount.to_decimal_string())),
            description: Some(self.description.clone()),
            date: Some(self.date.format(RECORD_DATE_FORMAT).to_string()),
            payment_method: self.payment_method.clone(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ({})",
            self.id, self.date, self.signed_amount(), self.description, self.category
        )
    }
}

/// Untyped transaction shape as found in ledger files
///
/// Every field is optional so that a missing value is reported as a
/// [`ValidationError`] naming that field instead of a parser error. The id
/// and amount are kept as raw values (a number or a string) and are only
/// interpreted on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    /// Records may use the signed convention where expenses are stored as
    /// negative amounts. A negative expense is normalized to its magnitude;
    /// a negative income is rejected.
    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .as_ref()
            .ok_or(ValidationError::Missing(TransactionField::Id))
            .and_then(parse_id)?;

        let kind: TransactionKind = record
            .kind
            .as_deref()
            .ok_or(ValidationError::Missing(TransactionField::Kind))?
            .parse()?;

        let amount = record
            .amount
            .as_ref()
            .ok_or(ValidationError::Missing(TransactionField::Amount))
            .and_then(parse_amount)?;
        let amount = match kind {
            TransactionKind::Expense if amount.is_negative() => {
                tracing::debug!(id = %id, "normalized signed expense amount");
                amount.abs()
            }
            _ => amount,
        };

        let date_str = record
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(ValidationError::Missing(TransactionField::Date))?;
        let date = NaiveDate::parse_from_str(date_str, RECORD_DATE_FORMAT).map_err(|_| {
            ValidationError::invalid(
                TransactionField::Date,
                format!("'{}' is not a YYYY-MM-DD date", date_str),
            )
        })?;

        let payment_method = record.payment_method.filter(|p| !p.trim().is_empty());

        Transaction::new(NewTransaction {
            id,
            kind,
            category: record.category.unwrap_or_default(),
            amount,
            description: record.description.unwrap_or_default(),
            date,
            payment_method,
        })
    }
}

fn parse_id(raw: &Value) -> Result<TransactionId, ValidationError> {
    let parsed = match raw {
        Value::String(s) => s.parse().ok(),
        other => TransactionId::deserialize(other).ok(),
    };
    parsed.ok_or_else(|| {
        ValidationError::invalid(TransactionField::Id, format!("{} is not an id", raw))
    })
}

fn parse_amount(raw: &Value) -> Result<Money, ValidationError> {
    Money::deserialize(raw)
        .map_err(|e| ValidationError::invalid(TransactionField::Amount, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> NewTransaction {
        NewTransaction {
            id: TransactionId::new(1),
            kind: TransactionKind::Expense,
            category: "Transporte".into(),
            amount: Money::from_cents(4550),
            description: "Gasolina".into(),
            date: NaiveDate::from_ymd_opt(2024, 8, 29).unwrap(),
            payment_method: Some("Tarjeta Crédito".into()),
        }
    }

    #[test]
    fn test_new_echoes_inputs() {
        let txn = Transaction::new(input()).unwrap();
        assert_eq!(txn.id(), TransactionId::new(1));
        assert_eq!(txn.kind(), TransactionKind::Expense);
        assert_eq!(txn.category(), "Transporte");
        assert_eq!(txn.amount(), Money::from_cents(4550));
        assert_eq!(txn.description(), "Gasolina");
        assert_eq!(txn.date(), NaiveDate::from_ymd_opt(2024, 8, 29).unwrap());
        assert_eq!(txn.payment_method(), Some("Tarjeta Crédito"));
        assert_eq!(txn.signed_amount(), Money::from_cents(-4550));
    }

    #[test]
    fn test_new_rejects_non_positive_amount() {
        for cents in [0, -100] {
            let mut bad = input();
            bad.amount = Money::from_cents(cents);
            let err = Transaction::new(bad).unwrap_err();
            assert_eq!(err.field(), TransactionField::Amount);
            assert!(matches!(err, ValidationError::NotPositive { .. }));
        }
    }

    #[test]
    fn test_new_rejects_blank_description_and_category() {
        let mut bad = input();
        bad.description = "   ".into();
        assert_eq!(
            Transaction::new(bad).unwrap_err(),
            ValidationError::Missing(TransactionField::Description)
        );

        let mut bad = input();
        bad.category = String::new();
        assert_eq!(
            Transaction::new(bad).unwrap_err(),
            ValidationError::Missing(TransactionField::Category)
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!("gasto".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert_eq!("INGRESO".parse::<TransactionKind>().unwrap(), TransactionKind::Income);

        let err = "transfer".parse::<TransactionKind>().unwrap_err();
        assert_eq!(err.field(), TransactionField::Kind);
    }

    #[test]
    fn test_record_with_signed_expense_is_normalized() {
        let json = r#"{
            "id": 1,
            "type": "expense",
            "category": "Transporte",
            "amount": -45.50,
            "description": "Gasolina vehículo empresa",
            "date": "2024-08-29",
            "paymentMethod": "Tarjeta Crédito"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount(), Money::from_cents(4550));
        assert!(txn.is_expense());
    }

    #[test]
    fn test_record_with_negative_income_is_rejected() {
        let record = TransactionRecord {
            id: Some(Value::from(2)),
            kind: Some("income".into()),
            category: Some("Ventas".into()),
            amount: Some(Value::from(-1200.0)),
            description: Some("Pago cliente".into()),
            date: Some("2024-08-28".into()),
            payment_method: None,
        };
        let err = Transaction::try_from(record).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { .. }));
    }

    #[test]
    fn test_record_reports_missing_and_invalid_fields() {
        let err = Transaction::try_from(TransactionRecord::default()).unwrap_err();
        assert_eq!(err, ValidationError::Missing(TransactionField::Id));

        let record = TransactionRecord {
            id: Some(Value::from(1)),
            kind: Some("expense".into()),
            amount: Some(Value::from("1.00")),
            date: Some("29/08/2024".into()),
            ..Default::default()
        };
        let err = Transaction::try_from(record).unwrap_err();
        assert_eq!(err.field(), TransactionField::Date);
        assert!(matches!(err, ValidationError::Invalid { .. }));
    }

    #[test]
    fn test_new_rejects_amount_above_maximum() {
        let mut at_max = input();
        at_max.amount = MAX_AMOUNT;
        assert!(Transaction::new(at_max).is_ok());

        for amount in [
            Money::from_cents(MAX_AMOUNT.cents() + 1),
            Money::parse("50000000000000000.00").unwrap(),
            Money::from_cents(i64::MAX),
        ] {
            let mut bad = input();
            bad.amount = amount;
            let err = Transaction::new(bad).unwrap_err();
            assert_eq!(err.field(), TransactionField::Amount);
            assert!(matches!(err, ValidationError::Invalid { .. }), "{:?}", amount);
        }
    }

    #[test]
    fn test_record_with_extreme_negative_expense_is_rejected() {
        let record = TransactionRecord {
            id: Some(Value::from(3)),
            kind: Some("expense".into()),
            category: Some("Otros".into()),
            amount: Some(Value::from(i64::MIN as f64 / 100.0)),
            description: Some("Ajuste".into()),
            date: Some("2024-08-28".into()),
            payment_method: None,
        };
        let err = Transaction::try_from(record).unwrap_err();
        assert_eq!(err.field(), TransactionField::Amount);

        let mut record = Transaction::new(input()).unwrap().to_record();
        record.amount = Some(Value::from("-92233720368547758.07"));
        let err = Transaction::try_from(record).unwrap_err();
        assert_eq!(err.field(), TransactionField::Amount);
        assert!(matches!(err, ValidationError::Invalid { .. }));
    }

    #[test]
    fn test_record_with_malformed_amount_or_id_names_the_field() {
        for amount in [json!("12.345"), json!("abc"), json!(true), json!([1])] {
            let mut record = Transaction::new(input()).unwrap().to_record();
            record.amount = Some(amount.clone());
            let err = Transaction::try_from(record).unwrap_err();
            assert_eq!(err.field(), TransactionField::Amount, "amount {}", amount);
            assert!(matches!(err, ValidationError::Invalid { .. }));
        }

        for id in [json!("abc"), json!(-1), json!(1.5)] {
            let mut record = Transaction::new(input()).unwrap().to_record();
            record.id = Some(id.clone());
            let err = Transaction::try_from(record).unwrap_err();
            assert_eq!(err.field(), TransactionField::Id, "id {}", id);
        }

        let mut record = Transaction::new(input()).unwrap().to_record();
        record.id = Some(json!("txn-9"));
        assert_eq!(Transaction::try_from(record).unwrap().id(), TransactionId::new(9));
    }

    #[test]
    fn test_serialization_shape() {
        let txn = Transaction::new(input()).unwrap();
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["amount"], "45.50");
        assert_eq!(value["paymentMethod"], "Tarjeta Crédito");
        assert_eq!(value["date"], "2024-08-29");

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_blank_payment_method_becomes_none() {
        let mut record = Transaction::new(input()).unwrap().to_record();
        record.payment_method = Some("  ".into());
        let txn = Transaction::try_from(record).unwrap();
        assert_eq!(txn.payment_method(), None);
    }
}
