//! Stats aggregator
//!
//! Reduces a set of transactions to income/expense/balance totals and the
//! expense total per category. Sums go through [`Totals`], so they do not
//! depend on input order and the breakdown adds up to the expense total.

use serde::Serialize;
use std::collections::BTreeMap;

use super::totals::Totals;
use crate::models::{CategoryId, Transaction, TransactionType};

/// Totals for one set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_income: f64,
    pub total_expense: f64,
    /// `total_income - total_expense`, may be negative
    pub balance: f64,
    /// Expense total per category; categories without expenses are absent
    pub expenses_by_category: BTreeMap<CategoryId, f64>,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
}

impl Stats {
    /// Aggregate the given transactions
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut totals = Totals::default();
        let mut stats = Self::default();

        for txn in transactions {
            totals.add(txn);
            match txn.kind {
                TransactionType::Income => stats.income_count += 1,
                TransactionType::Expense => stats.expense_count += 1,
            }
        }

        stats.total_income = totals.income();
        stats.total_expense = totals.expense();
        stats.balance = stats.total_income - stats.total_expense;
        stats.expenses_by_category = totals.expenses_by_category();
        stats.transaction_count = transactions.len();
        stats
    }

    /// Expense total for one category (0 if it has none)
    pub fn expense_for(&self, category_id: &CategoryId) -> f64 {
        self.expenses_by_category
            .get(category_id)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
