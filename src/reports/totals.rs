//! Order-independent money sums
//!
//! Amounts are accumulated as decimals, so a set of transactions always
//! produces the same totals whatever order it is walked in. The expense
//! total is the sum of the per-category totals in category id order, which
//! makes the breakdown add up to it exactly.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{CategoryId, Transaction, TransactionType};

/// Running income and per-category expense sums
#[derive(Debug, Clone, Default)]
pub(crate) struct Totals {
    income: Decimal,
    expenses: BTreeMap<CategoryId, Decimal>,
}

impl Totals {
    pub fn add(&mut self, txn: &Transaction) {
        let amount = to_decimal(txn.amount);
        match txn.kind {
            TransactionType::Income => self.income = self.income.saturating_add(amount),
            TransactionType::Expense => {
                let entry = self
                    .expenses
                    .entry(txn.category_id.clone())
                    .or_insert(Decimal::ZERO);
                *entry = entry.saturating_add(amount);
            }
        }
    }

    pub fn income(&self) -> f64 {
        to_f64(self.income)
    }

    pub fn expense(&self) -> f64 {
        self.expenses.values().map(|d| to_f64(*d)).sum()
    }

    pub fn expenses_by_category(&self) -> BTreeMap<CategoryId, f64> {
        self.expenses
            .iter()
            .map(|(id, d)| (id.clone(), to_f64(*d)))
            .collect()
    }
}

/// Decimal value of a validated amount
///
/// Amounts beyond the decimal range saturate.
pub(crate) fn to_decimal(amount: f64) -> Decimal {
    Decimal::try_from(amount).unwrap_or(if amount < 0.0 {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
