//! Budget model
//!
//! A budget caps spending in one category over a dated window. Several
//! budgets may exist for the same category; only the current ones are
//! normally evaluated for alerts.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::timestamp::{day_end, day_start};

/// How long a budget window runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriodKind {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriodKind {
    /// The natural window of this kind that contains `date`
    ///
    /// Weeks run Monday through Sunday, months and years follow the calendar.
    pub fn window_containing(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Weekly => {
                let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(6))
            }
            Self::Monthly => {
                let start = date.with_day(1).unwrap_or(date);
                let next = if start.month() == 12 {
                    NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
                };
                let end = next.map(|n| n - Duration::days(1)).unwrap_or(date);
                (start, end)
            }
            Self::Yearly => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
                let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
                (start, end)
            }
        }
    }
}

impl fmt::Display for BudgetPeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A spending cap for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category being capped
    pub category_id: CategoryId,

    /// Spending cap for the window
    pub amount: f64,

    pub period: BudgetPeriodKind,

    /// Window start (inclusive)
    pub start_date: DateTime<Utc>,

    /// Window end (inclusive)
    pub end_date: DateTime<Utc>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Budget {
    /// Create an active budget over an explicit window
    pub fn new(
        id: impl Into<BudgetId>,
        category_id: impl Into<CategoryId>,
        amount: f64,
        period: BudgetPeriodKind,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            amount,
            period,
            start_date,
            end_date,
            is_active: true,
        }
    }

    /// Create an active budget spanning the window of `period` that contains `date`
    pub fn for_period(
        id: impl Into<BudgetId>,
        category_id: impl Into<CategoryId>,
        amount: f64,
        period: BudgetPeriodKind,
        date: NaiveDate,
    ) -> Self {
        let (start, end) = period.window_containing(date);
        Self::new(id, category_id, amount, period, day_start(start), day_end(end))
    }

    /// Whether `instant` falls inside the budget window
    pub fn covers(&self, instant: DateTime<Utc>) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }

    /// Active and covering `now`
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.covers(now)
    }

    /// Active and overlapping the UTC calendar day `day`
    pub fn is_current_on(&self, day: NaiveDate) -> bool {
        self.is_active && self.start_date <= day_end(day) && day_start(day) <= self.end_date
    }

    /// Check the amount and window invariants
    ///
    /// A zero amount is accepted; alert evaluation treats it as 0% consumed.
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(BudgetValidationError::InvalidAmount(self.amount));
        }
        if self.start_date >= self.end_date {
            return Err(BudgetValidationError::EmptyWindow);
        }
        Ok(())
    }
}

/// Budgets that are active and whose window contains `now`, in input order
pub fn current_budgets(budgets: &[Budget], now: DateTime<Utc>) -> Vec<Budget> {
    budgets
        .iter()
        .filter(|b| b.is_current(now))
        .cloned()
        .collect()
}

/// Budgets that are active at some point of the UTC day `day`, in input order
pub fn budgets_current_on(budgets: &[Budget], day: NaiveDate) -> Vec<Budget> {
    budgets
        .iter()
        .filter(|b| b.is_current_on(day))
        .cloned()
        .collect()
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    InvalidAmount(f64),
    EmptyWindow,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "Budget amount must be a non-negative number (got {})", amount)
            }
            Self::EmptyWindow => write!(f, "Budget start date must be before its end date"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
