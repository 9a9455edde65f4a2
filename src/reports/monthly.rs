//! Monthly totals
//!
//! Income, expense and balance per calendar month (UTC), oldest first.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use super::totals::Totals;
use crate::models::{ReportPeriod, Transaction};

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub transaction_count: usize,
}

impl MonthlyTotal {
    pub fn period(&self) -> Option<ReportPeriod> {
        ReportPeriod::new(self.year, self.month).ok()
    }
}

/// Group transactions by month; months without transactions are omitted
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), (Totals, usize)> = BTreeMap::new();

    for txn in transactions {
        let entry = months
            .entry((txn.date.year(), txn.date.month()))
            .or_default();
        entry.0.add(txn);
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (totals, transaction_count))| {
            let total_income = totals.income();
            let total_expense = totals.expense();
            MonthlyTotal {
                year,
                month,
                total_income,
                total_expense,
                balance: total_income - total_expense,
                transaction_count,
            }
        })
        .collect()
}
