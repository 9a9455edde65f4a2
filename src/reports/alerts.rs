//! Budget alert evaluator
//!
//! Compares what was spent in each budget's category against the budget
//! amount and raises a warning or danger alert when a threshold is crossed.
//!
//! Spend is taken from the snapshot exactly as passed in: expense
//! transactions in the budget's category. The budget's own date window is
//! not applied here, so callers scope the snapshot to the period first
//! (usually the current month, alongside [`crate::models::current_budgets`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::stats::Stats;
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{Budget, BudgetId, CategoryDirectory, CategoryId, Transaction};

/// Percent-consumed levels at which alerts fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    #[serde(default = "default_warning")]
    pub warning: f64,
    #[serde(default = "default_danger")]
    pub danger: f64,
}

fn default_warning() -> f64 {
    80.0
}

fn default_danger() -> f64 {
    100.0
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            warning: default_warning(),
            danger: default_danger(),
        }
    }
}

impl AlertThresholds {
    /// Both finite, non-negative, and warning not above danger
    pub fn validate(&self) -> FinTrackResult<()> {
        let valid = self.warning.is_finite()
            && self.danger.is_finite()
            && self.warning >= 0.0
            && self.warning <= self.danger;
        if valid {
            Ok(())
        } else {
            Err(FinTrackError::Validation(format!(
                "Alert thresholds must satisfy 0 <= warning <= danger (got {} / {})",
                self.warning, self.danger
            )))
        }
    }
}

/// Severity of a budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Danger,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A budget that crossed a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub category_name: String,
    /// Rounded for display; thresholds are checked on the exact value
    pub percentage: u64,
    pub spent: f64,
    pub budget_amount: f64,
    pub message: String,
}

/// Spend against one active budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub spent: f64,
    pub budget_amount: f64,
    /// Exact percent consumed; 0 when the budget amount is 0
    pub percentage: f64,
}

impl BudgetProgress {
    /// Remaining amount, negative once overspent
    pub fn remaining(&self) -> f64 {
        self.budget_amount - self.spent
    }
}

/// Percent of `amount` consumed by `spent`; a zero or invalid amount yields 0
pub fn percent_consumed(spent: f64, amount: f64) -> f64 {
    if amount > 0.0 && amount.is_finite() {
        spent / amount * 100.0
    } else {
        0.0
    }
}

/// Evaluates budgets against a transaction snapshot
#[derive(Debug, Clone)]
pub struct BudgetAlertEvaluator<'a> {
    categories: &'a CategoryDirectory,
    thresholds: AlertThresholds,
    unknown_category: &'a str,
}

impl<'a> BudgetAlertEvaluator<'a> {
    pub fn new(categories: &'a CategoryDirectory) -> Self {
        Self {
            categories,
            thresholds: AlertThresholds::default(),
            unknown_category: "Unknown category",
        }
    }

    pub fn with_thresholds(mut self, thresholds: AlertThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Name used when a budget points at a missing category
    pub fn with_unknown_category_label(mut self, label: &'a str) -> Self {
        self.unknown_category = label;
        self
    }

    /// Spend for every active budget, in input order
    pub fn progress(&self, budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetProgress> {
        let stats = Stats::compute(transactions);

        budgets
            .iter()
            .filter(|b| b.is_active)
            .map(|budget| {
                let spent = stats.expense_for(&budget.category_id);
                BudgetProgress {
                    budget_id: budget.id.clone(),
                    category_id: budget.category_id.clone(),
                    spent,
                    budget_amount: budget.amount,
                    percentage: percent_consumed(spent, budget.amount),
                }
            })
            .collect()
    }

    /// One alert per active budget at or above the warning threshold, in input order
    pub fn evaluate(&self, budgets: &[Budget], transactions: &[Transaction]) -> Vec<Alert> {
        let alerts: Vec<Alert> = self
            .progress(budgets, transactions)
            .into_iter()
            .filter_map(|progress| self.alert_for(progress))
            .collect();

        debug!(budgets = budgets.len(), alerts = alerts.len(), "budgets evaluated");
        alerts
    }

    fn alert_for(&self, progress: BudgetProgress) -> Option<Alert> {
        let level = if progress.percentage >= self.thresholds.danger {
            AlertLevel::Danger
        } else if progress.percentage >= self.thresholds.warning {
            AlertLevel::Warning
        } else {
            return None;
        };

        let category_name = self
            .categories
            .name_or(&progress.category_id, self.unknown_category)
            .to_string();
        let message = match level {
            AlertLevel::Danger => format!("Budget exceeded for {}", category_name),
            AlertLevel::Warning => format!("Budget nearly exhausted for {}", category_name),
        };

        Some(Alert {
            level,
            budget_id: progress.budget_id,
            category_id: progress.category_id,
            category_name,
            percentage: progress.percentage.round() as u64,
            spent: progress.spent,
            budget_amount: progress.budget_amount,
            message,
        })
    }
}

/// Evaluate with the default thresholds
pub fn evaluate_budgets(
    budgets: &[Budget],
    transactions: &[Transaction],
    categories: &CategoryDirectory,
) -> Vec<Alert> {
    BudgetAlertEvaluator::new(categories).evaluate(budgets, transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriodKind, Category, TransactionType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn directory() -> CategoryDirectory {
        CategoryDirectory::new(vec![
            Category::new("food", "Food", TransactionType::Expense),
            Category::new("transport", "Transport", TransactionType::Expense),
        ])
    }

    fn budget(id: &str, category: &str, amount: f64) -> Budget {
        Budget::for_period(
            id,
            category,
            amount,
            BudgetPeriodKind::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    fn spend(category: &str, amount: f64) -> Transaction {
        Transaction::new(
            format!("{}-{}", category, amount),
            TransactionType::Expense,
            amount,
            Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
            category,
        )
    }

    #[test]
    fn test_threshold_boundaries() {
        let dir = directory();
        let budgets = vec![budget("b", "food", 100000.0)];

        assert!(evaluate_budgets(&budgets, &[spend("food", 79999.0)], &dir).is_empty());

        let warning = evaluate_budgets(&budgets, &[spend("food", 80000.0)], &dir);
        assert_eq!(warning.len(), 1);
        assert_eq!(warning[0].level, AlertLevel::Warning);
        assert_eq!(warning[0].percentage, 80);

        let danger = evaluate_budgets(&budgets, &[spend("food", 100000.0)], &dir);
        assert_eq!(danger[0].level, AlertLevel::Danger);
        assert_eq!(danger[0].percentage, 100);
        assert_eq!(danger[0].message, "Budget exceeded for Food");
    }

    #[test]
    fn test_threshold_uses_unrounded_value() {
        let dir = directory();
        let budgets = vec![budget("b", "food", 100000.0)];

        // 79.9995% rounds to 80 but stays below the threshold
        assert!(evaluate_budgets(&budgets, &[spend("food", 79999.5)], &dir).is_empty());

        // 99.6% displays as 100 but is still only a warning
        let alerts = evaluate_budgets(&budgets, &[spend("food", 99600.0)], &dir);
        assert_eq!(alerts[0].level, AlertLevel::Warning);
        assert_eq!(alerts[0].percentage, 100);
    }

    #[test]
    fn test_zero_amount_budget() {
        let dir = directory();
        let budgets = vec![budget("b", "food", 0.0)];
        let evaluator = BudgetAlertEvaluator::new(&dir);

        assert!(evaluator.evaluate(&budgets, &[spend("food", 5000.0)]).is_empty());
        let progress = evaluator.progress(&budgets, &[spend("food", 5000.0)]);
        assert_eq!(progress[0].percentage, 0.0);
    }

    #[test]
    fn test_only_expenses_in_category_count() {
        let dir = directory();
        let budgets = vec![budget("b", "food", 100.0)];
        let mut income = spend("food", 500.0);
        income.kind = TransactionType::Income;

        let txns = vec![income, spend("transport", 500.0), spend("food", 50.0)];
        let progress = BudgetAlertEvaluator::new(&dir).progress(&budgets, &txns);
        assert_eq!(progress[0].spent, 50.0);
        assert_eq!(progress[0].remaining(), 50.0);
    }

    #[test]
    fn test_budget_window_is_not_applied() {
        let dir = directory();
        let budgets = vec![budget("b", "food", 100.0)];
        let mut outside = spend("food", 90.0);
        outside.date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();

        let alerts = evaluate_budgets(&budgets, &[outside], &dir);
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_inactive_budgets_are_skipped() {
        let dir = directory();
        let mut inactive = budget("b", "food", 100.0);
        inactive.is_active = false;

        assert!(evaluate_budgets(&[inactive], &[spend("food", 500.0)], &dir).is_empty());
    }

    #[test]
    fn test_output_follows_budget_order() {
        let dir = directory();
        let budgets = vec![
            budget("warn", "transport", 100.0),
            budget("quiet", "food", 1000.0),
            budget("over", "food", 100.0),
        ];
        let txns = vec![spend("food", 150.0), spend("transport", 85.0)];

        let alerts = evaluate_budgets(&budgets, &txns, &dir);
        let ids: Vec<_> = alerts.iter().map(|a| a.budget_id.as_str()).collect();
        assert_eq!(ids, vec!["warn", "over"]);
        assert_eq!(alerts[0].level, AlertLevel::Warning);
        assert_eq!(alerts[1].level, AlertLevel::Danger);
        assert_eq!(alerts[1].percentage, 150);
    }

    #[test]
    fn test_missing_category_uses_fallback() {
        let dir = directory();
        let budgets = vec![budget("b", "gone", 10.0)];
        let alerts = BudgetAlertEvaluator::new(&dir)
            .with_unknown_category_label("Deleted")
            .evaluate(&budgets, &[spend("gone", 10.0)]);
        assert_eq!(alerts[0].category_name, "Deleted");
    }

    #[test]
    fn test_custom_thresholds() {
        let dir = directory();
        let budgets = vec![budget("b", "food", 100.0)];
        let alerts = BudgetAlertEvaluator::new(&dir)
            .with_thresholds(AlertThresholds {
                warning: 50.0,
                danger: 90.0,
            })
            .evaluate(&budgets, &[spend("food", 60.0)]);
        assert_eq!(alerts[0].level, AlertLevel::Warning);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(AlertThresholds::default().validate().is_ok());
        let inverted = AlertThresholds {
            warning: 100.0,
            danger: 80.0,
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_alert_serializes_level_as_type() {
        let dir = directory();
        let alerts = evaluate_budgets(&[budget("b", "food", 10.0)], &[spend("food", 10.0)], &dir);
        let json = serde_json::to_value(&alerts[0]).unwrap();
        assert_eq!(json["type"], "danger");
        assert_eq!(json["percentage"], 100);
    }
}
