//! CLI commands for reports
//!
//! `stats`, `monthly`, `trend` and `alerts`. Each command narrows the loaded
//! snapshot, runs one computation and prints a table, or JSON with `--json`.

use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::display::{format_alerts, format_monthly, format_stats, format_trend};
use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{budgets_current_on, ReportPeriod, TransactionType};
use crate::reports::{
    monthly_totals, BudgetAlertEvaluator, Stats, TransactionFilter, TrendDisplay, TrendSeries,
};
use crate::storage::Snapshot;

/// Transaction selection shared by the report commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First day included (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last day included (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Calendar month (YYYY-MM), alternative to --start/--end
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub month: Option<String>,

    /// Category id or name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only income or only expense transactions
    #[arg(short = 't', long = "type")]
    pub kind: Option<TransactionType>,
}

impl FilterArgs {
    /// Build the filter, resolving the category against the snapshot
    pub fn to_filter(&self, snapshot: &Snapshot) -> FinTrackResult<TransactionFilter> {
        let mut filter = match &self.month {
            Some(month) => TransactionFilter::for_month(parse_month(month)?),
            None => TransactionFilter {
                start_date: self.start.as_deref().map(|s| parse_day(s, "start")).transpose()?,
                end_date: self.end.as_deref().map(|s| parse_day(s, "end")).transpose()?,
                ..Default::default()
            },
        };

        if let Some(query) = &self.category {
            filter.category_id = Some(resolve_category(snapshot, query)?);
        }
        filter.kind = self.kind;

        Ok(filter)
    }
}

/// Arguments for `stats` and `monthly`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `trend`
#[derive(Args, Debug, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Lines to include in the range, comma-separated
    #[arg(long, default_value = "income,expense,balance", value_parser = TrendDisplay::parse_list)]
    pub series: TrendDisplay,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `alerts`
#[derive(Args, Debug, Clone, Default)]
pub struct AlertsArgs {
    /// Evaluate budgets current on this day (YYYY-MM-DD, default today)
    #[arg(long)]
    pub at: Option<String>,

    /// First day of spending counted (default: first day of the month of --at)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last day of spending counted (default: last day of the month of --at)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Handle `stats`
pub fn handle_stats_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: &ReportArgs,
) -> FinTrackResult<()> {
    let selected = args.filter.to_filter(snapshot)?.apply(&snapshot.transactions);
    let stats = Stats::compute(&selected);
    info!(transactions = selected.len(), "stats computed");

    if args.json {
        print_json(&stats)
    } else {
        println!("{}", format_stats(&stats, &snapshot.categories, settings));
        Ok(())
    }
}

/// Handle `monthly`
pub fn handle_monthly_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: &ReportArgs,
) -> FinTrackResult<()> {
    let selected = args.filter.to_filter(snapshot)?.apply(&snapshot.transactions);
    let totals = monthly_totals(&selected);

    if args.json {
        print_json(&totals)
    } else {
        println!("{}", format_monthly(&totals, settings));
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendOutput<'a> {
    points: &'a [crate::reports::TrendPoint],
    min_value: f64,
    max_value: f64,
}

/// Handle `trend`
pub fn handle_trend_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: &TrendArgs,
) -> FinTrackResult<()> {
    let selected = args.filter.to_filter(snapshot)?.apply(&snapshot.transactions);
    let series = TrendSeries::build(&selected);

    if args.json {
        let bounds = series.bounds(args.series);
        print_json(&TrendOutput {
            points: series.points(),
            min_value: bounds.min_value,
            max_value: bounds.max_value,
        })
    } else {
        println!("{}", format_trend(&series, args.series, settings));
        Ok(())
    }
}

/// Handle `alerts`
pub fn handle_alerts_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: &AlertsArgs,
) -> FinTrackResult<()> {
    let today = match &args.at {
        Some(at) => parse_day(at, "at")?,
        None => Utc::now().date_naive(),
    };

    let month = ReportPeriod::containing(today);
    let start = match &args.start {
        Some(s) => parse_day(s, "start")?,
        None => month.start_date(),
    };
    let end = match &args.end {
        Some(e) => parse_day(e, "end")?,
        None => month.end_date(),
    };

    let selected = TransactionFilter::between(start, end).apply(&snapshot.transactions);
    let budgets = budgets_current_on(&snapshot.budgets, today);
    info!(
        budgets = budgets.len(),
        transactions = selected.len(),
        %start,
        %end,
        "evaluating budgets"
    );

    let alerts = BudgetAlertEvaluator::new(&snapshot.categories)
        .with_thresholds(settings.alert_thresholds)
        .with_unknown_category_label(&settings.labels.unknown_category)
        .evaluate(&budgets, &selected);

    if args.json {
        print_json(&alerts)
    } else {
        println!("{}", format_alerts(&alerts, settings));
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_day(value: &str, what: &str) -> FinTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        FinTrackError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            what, value
        ))
    })
}

/// Parse a `YYYY-MM` argument
pub(crate) fn parse_month(value: &str) -> FinTrackResult<ReportPeriod> {
    ReportPeriod::parse(value).map_err(|e| {
        FinTrackError::Validation(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2024-01)",
            e
        ))
    })
}

fn resolve_category(
    snapshot: &Snapshot,
    query: &str,
) -> FinTrackResult<crate::models::CategoryId> {
    if let Some(category) = snapshot.categories.find(query) {
        return Ok(category.id.clone());
    }
    // Transactions may still point at a category that was deleted
    snapshot
        .transactions
        .iter()
        .find(|t| t.category_id.as_str() == query)
        .map(|t| t.category_id.clone())
        .ok_or_else(|| FinTrackError::category_not_found(query))
}

fn print_json<T: Serialize>(value: &T) -> FinTrackResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryDirectory, Transaction};
    use chrono::TimeZone;

    fn snapshot() -> Snapshot {
        Snapshot {
            categories: CategoryDirectory::new(vec![Category::new(
                "food",
                "Food",
                TransactionType::Expense,
            )]),
            transactions: vec![Transaction::new(
                "t1",
                TransactionType::Expense,
                10.0,
                Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
                "old-category",
            )],
            ..Default::default()
        }
    }

    #[test]
    fn test_month_filter() {
        let args = FilterArgs {
            month: Some("2024-02".into()),
            ..Default::default()
        };
        let filter = args.to_filter(&snapshot()).unwrap();
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_category_resolution() {
        let snap = snapshot();
        let by_name = FilterArgs {
            category: Some("food".into()),
            ..Default::default()
        };
        assert_eq!(
            by_name.to_filter(&snap).unwrap().category_id,
            Some("food".into())
        );

        let orphaned = FilterArgs {
            category: Some("old-category".into()),
            ..Default::default()
        };
        assert!(orphaned.to_filter(&snap).is_ok());

        let unknown = FilterArgs {
            category: Some("rent".into()),
            ..Default::default()
        };
        assert!(unknown.to_filter(&snap).unwrap_err().is_not_found());
    }

    #[test]
    fn test_bad_dates_are_validation_errors() {
        let args = FilterArgs {
            start: Some("01/02/2024".into()),
            ..Default::default()
        };
        assert!(args.to_filter(&snapshot()).unwrap_err().is_validation());
        assert!(parse_month("2024-13").unwrap_err().is_validation());
    }
}
