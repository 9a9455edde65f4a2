//! Report formatting for terminal output
//!
//! Renders stats, monthly totals, trend points and budget alerts as tables.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_amount, format_bar, format_date, format_percentage};
use crate::config::Settings;
use crate::models::CategoryDirectory;
use crate::reports::{percent_consumed, Alert, MonthlyTotal, Stats, TrendDisplay, TrendSeries};
use crate::storage::RejectedRecord;

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Spent")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Progress")]
    bar: String,
}

/// Totals plus the expense breakdown
pub fn format_stats(stats: &Stats, categories: &CategoryDirectory, settings: &Settings) -> String {
    let number_format = &settings.number_format;
    let mut output = String::new();

    output.push_str(&format!(
        "Income:   {} ({} transactions)\n",
        format_amount(stats.total_income, number_format),
        stats.income_count
    ));
    output.push_str(&format!(
        "Expense:  {} ({} transactions)\n",
        format_amount(stats.total_expense, number_format),
        stats.expense_count
    ));
    output.push_str(&format!(
        "Balance:  {}\n",
        format_amount(stats.balance, number_format)
    ));

    if stats.expenses_by_category.is_empty() {
        return output;
    }

    let mut breakdown: Vec<_> = stats.expenses_by_category.iter().collect();
    breakdown.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let rows = breakdown.into_iter().map(|(id, &amount)| CategoryRow {
        name: categories
            .name_or(id, &settings.labels.unknown_category)
            .to_string(),
        amount: format_amount(amount, number_format),
        share: format_percentage(percent_consumed(amount, stats.total_expense)),
    });

    output.push('\n');
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output
}

/// One row per month, oldest first
pub fn format_monthly(totals: &[MonthlyTotal], settings: &Settings) -> String {
    if totals.is_empty() {
        return "No transactions found.".to_string();
    }

    let number_format = &settings.number_format;
    let rows = totals.iter().map(|total| MonthRow {
        month: total
            .period()
            .map(|p| p.label())
            .unwrap_or_else(|| format!("{}-{:02}", total.year, total.month)),
        income: format_amount(total.total_income, number_format),
        expense: format_amount(total.total_expense, number_format),
        balance: format_amount(total.balance, number_format),
        count: total.transaction_count,
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Cumulative points for the visible lines, with the chart range underneath
pub fn format_trend(series: &TrendSeries, display: TrendDisplay, settings: &Settings) -> String {
    if series.is_empty() {
        return "No transactions found.".to_string();
    }

    let number_format = &settings.number_format;
    let mut builder = tabled::builder::Builder::default();

    let mut header = vec!["Date".to_string()];
    if display.income {
        header.push(settings.labels.income.clone());
    }
    if display.expense {
        header.push(settings.labels.expense.clone());
    }
    if display.balance {
        header.push("Balance".to_string());
    }
    builder.push_record(header);

    for point in series.points() {
        let mut record = vec![format_date(&point.date, &settings.date_format)];
        if display.income {
            record.push(format_amount(point.cumulative_income, number_format));
        }
        if display.expense {
            record.push(format_amount(point.cumulative_expense, number_format));
        }
        if display.balance {
            record.push(format_amount(point.cumulative_balance, number_format));
        }
        builder.push_record(record);
    }

    let bounds = series.bounds(display);
    let mut table = builder.build();
    table.with(Style::rounded());

    format!(
        "{}\nRange: {} .. {}\n",
        table,
        format_amount(bounds.min_value, number_format),
        format_amount(bounds.max_value, number_format)
    )
}

/// Alert table with a usage bar per budget
pub fn format_alerts(alerts: &[Alert], settings: &Settings) -> String {
    if alerts.is_empty() {
        return "All budgets are within limits.".to_string();
    }

    let number_format = &settings.number_format;
    let rows = alerts.iter().map(|alert| AlertRow {
        level: alert.level.to_string().to_uppercase(),
        category: alert.category_name.clone(),
        spent: format_amount(alert.spent, number_format),
        budget: format_amount(alert.budget_amount, number_format),
        used: format!("{}%", alert.percentage),
        bar: format_bar(alert.spent, alert.budget_amount, BAR_WIDTH),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    for alert in alerts {
        output.push_str(&format!("{}\n", alert.message));
    }
    output
}

/// Summary line for records skipped at load time
pub fn format_rejected(rejected: &[RejectedRecord]) -> Option<String> {
    if rejected.is_empty() {
        return None;
    }
    Some(format!(
        "Skipped {} malformed record{} (set FINTRACK_LOG=warn for details)",
        rejected.len(),
        if rejected.len() == 1 { "" } else { "s" }
    ))
}
