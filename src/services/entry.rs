//! Transaction entry workflow
//!
//! Turns raw form input (strings as typed by a user) into a validated
//! [`Transaction`] with the next free id. The category is checked against
//! the configured catalog; everything else is checked by
//! [`Transaction::new`].

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{LedgerResult, TransactionField, ValidationError};
use crate::ledger::Ledger;
use crate::models::{Money, NewTransaction, Transaction, TransactionKind};

/// Raw input collected by an entry form
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    /// Defaults to today when absent
    pub date: Option<String>,
    pub payment_method: Option<String>,
}

/// Service for creating transactions from form input
pub struct EntryService<'a> {
    settings: &'a Settings,
}

impl<'a> EntryService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Validate a form and build the transaction it describes
    ///
    /// The ledger is only consulted for the next id; it is not modified.
    pub fn create(&self, ledger: &Ledger, form: TransactionForm) -> LedgerResult<Transaction> {
        let today = Local::now().date_naive();
        self.create_on(ledger, form, today)
    }

    /// Same as [`create`](Self::create) with an explicit "today"
    pub fn create_on(
        &self,
        ledger: &Ledger,
        form: TransactionForm,
        today: NaiveDate,
    ) -> LedgerResult<Transaction> {
        let kind: TransactionKind = form.kind.parse()?;

        if form.amount.trim().is_empty() {
            return Err(ValidationError::Missing(TransactionField::Amount).into());
        }
        let amount = Money::parse(&form.amount)
            .map_err(|e| ValidationError::invalid(TransactionField::Amount, e.to_string()))?;

        self.settings.categories.check(&form.category)?;

        let date = match form.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, &self.settings.date_format).map_err(|_| {
                ValidationError::invalid(
                    TransactionField::Date,
                    format!("'{}' does not match {}", raw, self.settings.date_format),
                )
            })?,
            None => today,
        };

        let payment_method = form
            .payment_method
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let txn = Transaction::new(NewTransaction {
            id: ledger.next_id()?,
            kind,
            category: form.category,
            amount,
            description: form.description,
            date,
            payment_method,
        })?;

        debug!(id = %txn.id(), kind = %txn.kind(), amount = %txn.amount(), "validated entry");
        Ok(txn)
    }

    /// Create a transaction and append it to an in-memory ledger
    pub fn record(&self, ledger: &mut Ledger, form: TransactionForm) -> LedgerResult<Transaction> {
        let txn = self.create(ledger, form)?;
        ledger.push(txn.clone())?;
        info!(id = %txn.id(), "recorded {} of {}", txn.kind(), txn.amount());
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::CategoryCatalog;
    use crate::source::{LedgerSource, SampleData};

    fn form() -> TransactionForm {
        TransactionForm {
            kind: "expense".into(),
            amount: "45.50".into(),
            category: "Transporte".into(),
            description: "Gasolina".into(),
            date: Some("2024-08-30".into()),
            payment_method: Some("Efectivo".into()),
        }
    }

    fn validation_field(err: LedgerError) -> TransactionField {
        match err {
            LedgerError::Validation(v) => v.field(),
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_create_assigns_next_id() {
        let settings = Settings::default();
        let ledger = SampleData.load().unwrap();
        let txn = EntryService::new(&settings).create(&ledger, form()).unwrap();

        assert_eq!(txn.id().value(), 7);
        assert_eq!(txn.amount(), Money::from_cents(4550));
        assert_eq!(txn.date(), NaiveDate::from_ymd_opt(2024, 8, 30).unwrap());
        assert_eq!(txn.payment_method(), Some("Efectivo"));
        assert_eq!(ledger.len(), 6);
    }

    #[test]
    fn test_missing_required_fields() {
        let settings = Settings::default();
        let service = EntryService::new(&settings);
        let ledger = Ledger::new();

        let mut f = form();
        f.amount = "".into();
        assert_eq!(
            validation_field(service.create(&ledger, f).unwrap_err()),
            TransactionField::Amount
        );

        let mut f = form();
        f.category = " ".into();
        assert_eq!(
            validation_field(service.create(&ledger, f).unwrap_err()),
            TransactionField::Category
        );

        let mut f = form();
        f.description = "".into();
        assert_eq!(
            validation_field(service.create(&ledger, f).unwrap_err()),
            TransactionField::Description
        );
    }

    #[test]
    fn test_rejects_zero_negative_and_garbage_amounts() {
        let settings = Settings::default();
        let service = EntryService::new(&settings);
        let ledger = Ledger::new();

        for amount in ["0", "-12.00", "12,50", "1.999", "1000000000.00", "92233720368547758.08"] {
            let mut f = form();
            f.amount = amount.into();
            let field = validation_field(service.create(&ledger, f).unwrap_err());
            assert_eq!(field, TransactionField::Amount, "amount {:?}", amount);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let settings = Settings::default();
        let mut f = form();
        f.kind = "transfer".into();
        let err = EntryService::new(&settings).create(&Ledger::new(), f).unwrap_err();
        assert_eq!(validation_field(err), TransactionField::Kind);
    }

    #[test]
    fn test_closed_catalog() {
        let settings = Settings {
            categories: CategoryCatalog::closed(["Ventas"]),
            ..Settings::default()
        };
        let err = EntryService::new(&settings).create(&Ledger::new(), form()).unwrap_err();
        assert_eq!(validation_field(err), TransactionField::Category);
    }

    #[test]
    fn test_date_defaults_to_today_and_uses_configured_format() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let settings = Settings {
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };
        let service = EntryService::new(&settings);

        let mut f = form();
        f.date = None;
        let txn = service.create_on(&Ledger::new(), f, today).unwrap();
        assert_eq!(txn.date(), today);

        let mut f = form();
        f.date = Some("30/08/2024".into());
        let txn = service.create_on(&Ledger::new(), f, today).unwrap();
        assert_eq!(txn.date(), NaiveDate::from_ymd_opt(2024, 8, 30).unwrap());

        let err = service.create_on(&Ledger::new(), form(), today).unwrap_err();
        assert_eq!(validation_field(err), TransactionField::Date);
    }

    #[test]
    fn test_record_appends() {
        let settings = Settings::default();
        let mut ledger = SampleData.load().unwrap();
        let mut income = form();
        income.kind = "ingreso".into();
        income.payment_method = Some("   ".into());

        let txn = EntryService::new(&settings).record(&mut ledger, income).unwrap();
        assert!(txn.is_income());
        assert_eq!(txn.payment_method(), None);
        assert_eq!(ledger.len(), 7);
        assert_eq!(ledger.transactions()[6].id(), txn.id());
    }
}
