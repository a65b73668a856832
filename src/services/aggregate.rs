//! Aggregation over transaction sequences
//!
//! Every function here is a single pass over its input and borrows it
//! read-only. Amounts are summed as integer cents, so totals are exact.
//! Each amount is capped at [`MAX_AMOUNT`](crate::models::MAX_AMOUNT), so
//! sums stay exact for any realistic ledger and saturate beyond that.
//! Inputs are anything yielding `&Transaction`: a `&Ledger`, a slice, or
//! the output of [`Query::apply`](super::query::Query::apply).

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Money, Transaction, TransactionKind, YearMonth};

/// Sum of the magnitudes of all expenses
pub fn total_expenses<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    total_of_kind(transactions, TransactionKind::Expense)
}

/// Sum of the magnitudes of all income
pub fn total_income<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    total_of_kind(transactions, TransactionKind::Income)
}

/// Income minus expenses; negative when the business spent more than it earned
pub fn net<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(Transaction::signed_amount).sum()
}

fn total_of_kind<'a, I>(transactions: I, kind: TransactionKind) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind() == kind)
        .map(Transaction::amount)
        .sum()
}

/// Group magnitudes by category label
pub fn by_category<'a, I>(transactions: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut breakdown = CategoryBreakdown::default();
    for txn in transactions {
        breakdown.add(txn);
    }
    breakdown
}

/// Expenses, income, net and counts in one pass
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summary = Summary::default();
    for txn in transactions {
        summary.add(txn);
    }
    summary
}

/// Per-month income, expenses and profit, oldest month first
pub fn monthly_trends<'a, I>(transactions: I) -> Vec<MonthlyTotals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<YearMonth, Summary> = BTreeMap::new();
    for txn in transactions {
        months.entry(YearMonth::of(txn.date())).or_default().add(txn);
    }
    months
        .into_iter()
        .map(|(month, summary)| MonthlyTotals {
            month,
            income: summary.income,
            expenses: summary.expenses,
            profit: summary.net,
            transaction_count: summary.transaction_count,
        })
        .collect()
}

/// Distinct category labels in first-seen order
pub fn categories<'a, I>(transactions: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut seen = HashSet::new();
    transactions
        .into_iter()
        .map(Transaction::category)
        .filter(|c| seen.insert(*c))
        .collect()
}

/// Earliest and latest transaction dates; `None` for an empty sequence
pub fn date_range<'a, I>(transactions: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(Transaction::date)
        .fold(None, |range, date| match range {
            None => Some((date, date)),
            Some((first, last)) => Some((first.min(date), last.max(date))),
        })
}

/// Relative change from `previous` to `current`, in percent
///
/// Returns `None` when `previous` is zero.
pub fn percentage_change(current: Money, previous: Money) -> Option<f64> {
    if previous.is_zero() {
        return None;
    }
    Some((current - previous).cents() as f64 / previous.cents().abs() as f64 * 100.0)
}

fn margin(profit: Money, income: Money) -> Option<f64> {
    if income.is_zero() {
        return None;
    }
    Some(profit.cents() as f64 / income.cents() as f64 * 100.0)
}

/// Totals for a sequence of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub expenses: Money,
    pub income: Money,
    pub net: Money,
    pub transaction_count: usize,
    pub expense_count: usize,
    pub income_count: usize,
}

impl Summary {
    fn add(&mut self, txn: &Transaction) {
        match txn.kind() {
            TransactionKind::Expense => {
                self.expenses += txn.amount();
                self.expense_count += 1;
            }
            TransactionKind::Income => {
                self.income += txn.amount();
                self.income_count += 1;
            }
        }
        self.net += txn.signed_amount();
        self.transaction_count += 1;
    }

    /// Share of income left after expenses, in percent
    ///
    /// Returns `None` when there is no income.
    pub fn profit_margin(&self) -> Option<f64> {
        margin(self.net, self.income)
    }
}

/// Totals for one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Category label to summed magnitude, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    fn add(&mut self, txn: &Transaction) {
        let position = match self.index.get(txn.category()) {
            Some(&position) => position,
            None => {
                self.entries.push(CategoryTotal {
                    category: txn.category().to_string(),
                    total: Money::zero(),
                    count: 0,
                });
                let position = self.entries.len() - 1;
                self.index.insert(txn.category().to_string(), position);
                position
            }
        };
        let entry = &mut self.entries[position];
        entry.total += txn.amount();
        entry.count += 1;
    }

    pub fn get(&self, category: &str) -> Option<Money> {
        self.index.get(category).map(|&i| self.entries[i].total)
    }

    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.total).sum()
    }

    /// Percentage of the breakdown total taken by one category
    pub fn share(&self, category: &str) -> Option<f64> {
        let total = self.total();
        if total.is_zero() {
            return None;
        }
        self.get(category)
            .map(|amount| amount.cents() as f64 / total.cents() as f64 * 100.0)
    }

    /// Entries ordered by total, largest first; ties keep first-seen order
    pub fn sorted_by_total(&self) -> Vec<&CategoryTotal> {
        let mut sorted: Vec<&CategoryTotal> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted
    }
}

impl<'a> IntoIterator for &'a CategoryBreakdown {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: Money,
    pub expenses: Money,
    pub profit: Money,
    pub transaction_count: usize,
}

impl MonthlyTotals {
    /// Profit as a percentage of the month's income; `None` without income
    pub fn profit_margin(&self) -> Option<f64> {
        margin(self.profit, self.income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::models::{NewTransaction, TransactionId, MAX_AMOUNT};
    use crate::services::query::Query;
    use crate::source::{LedgerSource, SampleData};
    use chrono::NaiveDate;

    fn txn(
        id: u64,
        kind: TransactionKind,
        category: &str,
        cents: i64,
        date: (i32, u32, u32),
    ) -> Transaction {
        Transaction::new(NewTransaction {
            id: TransactionId::new(id),
            kind,
            category: category.into(),
            amount: Money::from_cents(cents),
            description: format!("entry {}", id),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            payment_method: None,
        })
        .unwrap()
    }

    fn scenario() -> Ledger {
        Ledger::from_transactions(vec![
            txn(1, TransactionKind::Expense, "Transporte", 4550, (2024, 8, 29)),
            txn(2, TransactionKind::Income, "Ventas", 120000, (2024, 8, 28)),
            txn(3, TransactionKind::Expense, "Alimentación", 2890, (2024, 8, 28)),
        ])
        .unwrap()
    }

    #[test]
    fn test_scenario_totals() {
        let ledger = scenario();
        assert_eq!(total_expenses(&ledger), Money::from_cents(7440));
        assert_eq!(total_income(&ledger), Money::from_cents(120000));
        assert_eq!(net(&ledger), Money::from_cents(112560));
        assert_eq!(net(&ledger).to_decimal_string(), "1125.60");
    }

    #[test]
    fn test_empty_sequence() {
        let ledger = Ledger::new();
        assert_eq!(total_expenses(&ledger), Money::zero());
        assert_eq!(total_income(&ledger), Money::zero());
        assert_eq!(net(&ledger), Money::zero());
        assert!(by_category(&ledger).is_empty());
        assert!(monthly_trends(&ledger).is_empty());
        assert_eq!(summarize(&ledger), Summary::default());
    }

    #[test]
    fn test_net_can_be_negative() {
        let ledger = Ledger::from_transactions(vec![
            txn(1, TransactionKind::Expense, "Alquiler", 90000, (2024, 8, 1)),
            txn(2, TransactionKind::Income, "Ventas", 10000, (2024, 8, 2)),
        ])
        .unwrap();
        assert_eq!(net(&ledger), Money::from_cents(-80000));
        assert_eq!(summarize(&ledger).profit_margin(), Some(-800.0));
    }

    #[test]
    fn test_properties_hold_on_sample() {
        let ledger = SampleData.load().unwrap();
        let queries = [
            Query::new(),
            Query::new().kind(TransactionKind::Expense),
            Query::new().search("cliente"),
            Query::new().category("Nada"),
        ];
        for query in &queries {
            let subset = query.apply(&ledger);
            let expenses = total_expenses(subset.iter().copied());
            let income = total_income(subset.iter().copied());

            assert!(!expenses.is_negative());
            assert!(!income.is_negative());
            assert_eq!(net(subset.iter().copied()), income - expenses);
            assert_eq!(by_category(subset.iter().copied()).total(), expenses + income);

            let summary = summarize(subset.iter().copied());
            assert_eq!(summary.expenses, expenses);
            assert_eq!(summary.income, income);
            assert_eq!(summary.transaction_count, subset.len());
        }
    }

    #[test]
    fn test_by_category_first_seen_order() {
        let ledger = SampleData.load().unwrap();
        let breakdown = by_category(&ledger);
        let labels: Vec<&str> = breakdown.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Transporte", "Ventas", "Alimentación", "Suministros", "Servicios"]
        );
        assert_eq!(breakdown.get("Transporte"), Some(Money::from_cents(13050)));
        assert_eq!(breakdown.entries()[0].count, 2);
        assert_eq!(breakdown.get("Otros"), None);
    }

    #[test]
    fn test_sorted_by_total_leaves_breakdown_alone() {
        let ledger = SampleData.load().unwrap();
        let breakdown = by_category(&ledger);
        let sorted: Vec<&str> = breakdown
            .sorted_by_total()
            .iter()
            .map(|e| e.category.as_str())
            .collect();
        assert_eq!(
            sorted,
            vec!["Ventas", "Servicios", "Suministros", "Transporte", "Alimentación"]
        );
        assert_eq!(breakdown.entries()[0].category, "Transporte");
    }

    #[test]
    fn test_share() {
        let expenses = Query::new().kind(TransactionKind::Expense);
        let ledger = SampleData.load().unwrap();
        let breakdown = by_category(expenses.apply(&ledger));
        let share = breakdown.share("Suministros").unwrap();
        assert!((share - 15600.0 / 31540.0 * 100.0).abs() < 1e-9);
        assert_eq!(CategoryBreakdown::default().share("x"), None);
    }

    #[test]
    fn test_monthly_trends() {
        let ledger = Ledger::from_transactions(vec![
            txn(1, TransactionKind::Income, "Ventas", 1200000, (2024, 2, 3)),
            txn(2, TransactionKind::Expense, "Alquiler", 840000, (2024, 1, 15)),
            txn(3, TransactionKind::Income, "Ventas", 1150000, (2024, 1, 20)),
            txn(4, TransactionKind::Expense, "Otros", 730000, (2024, 2, 10)),
        ])
        .unwrap();

        let trends = monthly_trends(&ledger);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].month, YearMonth::new(2024, 1).unwrap());
        assert_eq!(trends[0].profit, Money::from_cents(310000));
        assert_eq!(trends[1].month, YearMonth::new(2024, 2).unwrap());
        assert_eq!(trends[1].income, Money::from_cents(1200000));
        assert_eq!(trends[1].expenses, Money::from_cents(730000));
        assert_eq!(trends[1].transaction_count, 2);
        assert!((trends[0].profit_margin().unwrap() - 310000.0 / 1150000.0 * 100.0).abs() < 1e-9);
        assert_eq!(trends[1].profit_margin(), Some(470000.0 / 1200000.0 * 100.0));
    }

    #[test]
    fn test_largest_amounts_sum_exactly() {
        let max = MAX_AMOUNT.cents();
        let transactions: Vec<Transaction> = (1..=1000)
            .map(|id| {
                let kind = if id % 2 == 0 {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                };
                txn(id, kind, "Grande", max, (2024, 8, 1))
            })
            .collect();

        assert_eq!(total_expenses(&transactions), Money::from_cents(max * 500));
        assert_eq!(total_income(&transactions), Money::from_cents(max * 500));
        assert_eq!(net(&transactions), Money::zero());
        assert_eq!(by_category(&transactions).total(), Money::from_cents(max * 1000));

        let summary = summarize(&transactions);
        assert_eq!(summary.expenses, Money::from_cents(max * 500));
        assert_eq!(summary.transaction_count, 1000);
        assert_eq!(monthly_trends(&transactions)[0].profit, Money::zero());
    }

    #[test]
    fn test_categories_and_date_range() {
        let ledger = SampleData.load().unwrap();
        assert_eq!(
            categories(&ledger),
            vec!["Transporte", "Ventas", "Alimentación", "Suministros", "Servicios"]
        );
        let (first, last) = date_range(&ledger).unwrap();
        assert!(first <= last);
        assert!(ledger.iter().all(|t| (first..=last).contains(&t.date())));

        let empty: Vec<Transaction> = Vec::new();
        assert!(categories(&empty).is_empty());
        assert_eq!(date_range(&empty), None);
    }

    #[test]
    fn test_percentage_change() {
        let change =
            percentage_change(Money::from_cents(890000), Money::from_cents(810000)).unwrap();
        assert!((change - 9.876543209876543).abs() < 1e-9);
        assert_eq!(percentage_change(Money::from_cents(100), Money::zero()), None);
        assert_eq!(
            percentage_change(Money::from_cents(50), Money::from_cents(100)),
            Some(-50.0)
        );
    }

    #[test]
    fn test_profit_margin() {
        let summary = summarize(&scenario());
        let margin = summary.profit_margin().unwrap();
        assert!((margin - 93.8).abs() < 1e-9);
        assert_eq!(Summary::default().profit_margin(), None);
    }
}
