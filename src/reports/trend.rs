//! Trend series builder
//!
//! Turns an unordered set of transactions into cumulative income, expense
//! and balance points in date order, for charting.
//!
//! Running totals use the same accumulation as [`Stats`](super::Stats), so
//! the last point always equals the stats of the same transactions.
//!
//! Building sorts once. The series records the extremes of each line while
//! walking, so the chart range for any combination of visible lines is read
//! without touching the points again.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::totals::Totals;
use crate::models::Transaction;

/// One sample of the running totals, inclusive of its transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub cumulative_income: f64,
    pub cumulative_expense: f64,
    pub cumulative_balance: f64,
}

/// Which lines the chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrendDisplay {
    pub income: bool,
    pub expense: bool,
    pub balance: bool,
}

impl Default for TrendDisplay {
    fn default() -> Self {
        Self {
            income: true,
            expense: true,
            balance: true,
        }
    }
}

impl TrendDisplay {
    /// Parse a comma-separated list such as `income,balance`
    pub fn parse_list(s: &str) -> Result<Self, String> {
        let mut display = Self {
            income: false,
            expense: false,
            balance: false,
        };
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "income" => display.income = true,
                "expense" => display.expense = true,
                "balance" => display.balance = true,
                other => return Err(format!("Unknown trend series '{}'", other)),
            }
        }
        Ok(display)
    }
}

/// Vertical range of the visible lines; always contains 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendBounds {
    pub min_value: f64,
    pub max_value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Extremes {
    min: f64,
    max: f64,
}

impl Extremes {
    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Cumulative series for one set of transactions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
    income: Extremes,
    expense: Extremes,
    balance: Extremes,
}

impl TrendSeries {
    /// Build the series; transactions on the same instant keep input order
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|t| t.date);

        let mut series = Self {
            points: Vec::with_capacity(sorted.len()),
            ..Default::default()
        };
        let mut totals = Totals::default();

        for txn in sorted {
            totals.add(txn);
            let running_income = totals.income();
            let running_expense = totals.expense();
            let running_balance = running_income - running_expense;

            series.income.include(running_income);
            series.expense.include(running_expense);
            series.balance.include(running_balance);
            series.points.push(TrendPoint {
                date: txn.date,
                cumulative_income: running_income,
                cumulative_expense: running_expense,
                cumulative_balance: running_balance,
            });
        }

        series
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&TrendPoint> {
        self.points.last()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Range across the visible lines
    pub fn bounds(&self, display: TrendDisplay) -> TrendBounds {
        let mut range = Extremes::default();
        for (visible, extremes) in [
            (display.income, self.income),
            (display.expense, self.expense),
            (display.balance, self.balance),
        ] {
            if visible {
                range.include(extremes.min);
                range.include(extremes.max);
            }
        }
        TrendBounds {
            min_value: range.min,
            max_value: range.max,
        }
    }
}

/// Keeps the last built series and rebuilds only when the input changes
#[derive(Debug, Default)]
pub struct TrendCache {
    key: Option<u64>,
    series: TrendSeries,
    builds: usize,
}

impl TrendCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The series for `transactions`, reusing the previous one if the input is unchanged
    pub fn get_or_build(&mut self, transactions: &[Transaction]) -> &TrendSeries {
        let key = fingerprint(transactions);
        if self.key != Some(key) {
            self.series = TrendSeries::build(transactions);
            self.key = Some(key);
            self.builds += 1;
        }
        &self.series
    }

    /// Number of times a series was actually built
    pub fn builds(&self) -> usize {
        self.builds
    }
}

fn fingerprint(transactions: &[Transaction]) -> u64 {
    let mut hasher = DefaultHasher::new();
    transactions.len().hash(&mut hasher);
    for txn in transactions {
        txn.id.hash(&mut hasher);
        txn.kind.hash(&mut hasher);
        txn.amount.to_bits().hash(&mut hasher);
        txn.date.hash(&mut hasher);
    }
    hasher.finish()
}
