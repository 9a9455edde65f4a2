//! Export dataset preparation
//!
//! Builds the report object handed to spreadsheet and document writers:
//! a period summary, the expense breakdown by category and one formatted
//! row per transaction. All labels and number formatting come from the
//! settings so writers only lay the rows out.

use serde::Serialize;

use crate::config::Settings;
use crate::display::format::{format_amount, format_date, format_percentage};
use crate::models::{CategoryDirectory, CategoryId, ReportPeriod, Transaction, TransactionType};
use crate::reports::{percent_consumed, Stats};

/// Period totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub period_label: String,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub total_transactions: usize,
    pub income_transactions: usize,
    pub expense_transactions: usize,
}

/// Share of one category in the period's expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownRow {
    pub category_id: CategoryId,
    pub category_name: String,
    pub amount: f64,
    /// 0 when there are no expenses at all
    pub percentage: f64,
    pub formatted_amount: String,
    pub formatted_percentage: String,
}

/// One transaction, ready to print
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailRow {
    pub date: String,
    pub description: String,
    pub category_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub formatted_amount: String,
}

/// Everything an export writer needs for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDataset {
    pub summary: ExportSummary,
    pub category_breakdown: Vec<CategoryBreakdownRow>,
    pub transaction_details: Vec<TransactionDetailRow>,
}

impl ExportDataset {
    /// Assemble the dataset
    ///
    /// `stats` and `transactions` are expected to describe the same
    /// period; they are used as given.
    pub fn prepare(
        stats: &Stats,
        transactions: &[Transaction],
        categories: &CategoryDirectory,
        period: ReportPeriod,
        settings: &Settings,
    ) -> Self {
        let labels = &settings.labels;
        let number_format = &settings.number_format;

        let summary = ExportSummary {
            period_label: period.label(),
            total_income: stats.total_income,
            total_expense: stats.total_expense,
            balance: stats.balance,
            total_transactions: stats.transaction_count,
            income_transactions: stats.income_count,
            expense_transactions: stats.expense_count,
        };

        let mut category_breakdown: Vec<CategoryBreakdownRow> = stats
            .expenses_by_category
            .iter()
            .map(|(category_id, &amount)| {
                let percentage = percent_consumed(amount, stats.total_expense);
                CategoryBreakdownRow {
                    category_id: category_id.clone(),
                    category_name: categories
                        .name_or(category_id, &labels.unknown_category)
                        .to_string(),
                    amount,
                    percentage,
                    formatted_amount: format_amount(amount, number_format),
                    formatted_percentage: format_percentage(percentage),
                }
            })
            .collect();
        category_breakdown.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });

        let transaction_details = transactions
            .iter()
            .map(|txn| {
                let description = if txn.description.trim().is_empty() {
                    labels.no_description.clone()
                } else {
                    txn.description.clone()
                };
                let kind = match txn.kind {
                    TransactionType::Income => labels.income.clone(),
                    TransactionType::Expense => labels.expense.clone(),
                };
                TransactionDetailRow {
                    date: format_date(&txn.date, &settings.date_format),
                    description,
                    category_name: categories
                        .name_or(&txn.category_id, &labels.unknown_category)
                        .to_string(),
                    kind,
                    amount: txn.amount,
                    formatted_amount: format_amount(txn.amount, number_format),
                }
            })
            .collect();

        Self {
            summary,
            category_breakdown,
            transaction_details,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_details.is_empty()
    }
}
