//! CSV Export functionality
//!
//! The column set is readable by [`CsvFile`](crate::source::CsvFile), so an
//! export can be loaded back as a ledger.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::Transaction;

pub const CSV_HEADER: [&str; 7] = [
    "ID",
    "Date",
    "Type",
    "Category",
    "Description",
    "Payment Method",
    "Amount",
];

/// Write transactions as CSV, expenses as negative amounts
///
/// Returns the number of rows written.
pub fn export_transactions_csv<'a, I, W>(transactions: I, writer: &mut W) -> LedgerResult<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: Write,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    let mut count = 0;
    for txn in transactions {
        csv.write_record([
            txn.id().value().to_string().as_str(),
            txn.date().format("%Y-%m-%d").to_string().as_str(),
            txn.kind().as_str(),
            txn.category(),
            txn.description(),
            txn.payment_method().unwrap_or(""),
            txn.signed_amount().to_decimal_string().as_str(),
        ])?;
        count += 1;
    }

    csv.flush()?;
    Ok(count)
}
