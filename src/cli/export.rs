//! CLI command for report export
//!
//! Prepares the dataset for one month and writes it as CSV, JSON or YAML.

use clap::{Args, ValueEnum};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use super::report::parse_month;
use crate::config::{FinTrackPaths, Settings};
use crate::error::{FinTrackError, FinTrackResult};
use crate::export::{export_dataset_csv, export_dataset_json, export_dataset_yaml, ExportDataset};
use crate::models::ReportPeriod;
use crate::reports::{Stats, TransactionFilter};
use crate::storage::Snapshot;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV sheet with summary, breakdown and details
    Csv,
    /// JSON document with schema metadata
    Json,
    /// YAML document, human-readable
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Arguments for `export`
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Month to export (YYYY-MM, default current month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file (default: exports/fintrack-YYYY-MM.<ext> under the base directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle `export`
pub fn handle_export_command(
    paths: &FinTrackPaths,
    snapshot: &Snapshot,
    settings: &Settings,
    args: &ExportArgs,
) -> FinTrackResult<()> {
    let period = match &args.month {
        Some(month) => parse_month(month)?,
        None => ReportPeriod::current_month(),
    };

    let selected = TransactionFilter::for_month(period).apply(&snapshot.transactions);
    let stats = Stats::compute(&selected);
    let dataset = ExportDataset::prepare(&stats, &selected, &snapshot.categories, period, settings);

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output(paths, period, args.format)?,
    };

    let file = File::create(&output).map_err(|e| {
        FinTrackError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => export_dataset_csv(&dataset, &mut writer)?,
        ExportFormat::Json => export_dataset_json(&dataset, &mut writer, args.pretty)?,
        ExportFormat::Yaml => export_dataset_yaml(&dataset, &mut writer)?,
    }
    writer.flush()?;

    info!(
        period = %period,
        transactions = dataset.transaction_details.len(),
        path = %output.display(),
        "report exported"
    );
    println!(
        "Exported {} ({} transactions) to: {}",
        dataset.summary.period_label,
        dataset.transaction_details.len(),
        output.display()
    );

    Ok(())
}

fn default_output(
    paths: &FinTrackPaths,
    period: ReportPeriod,
    format: ExportFormat,
) -> FinTrackResult<PathBuf> {
    let dir = paths.export_dir();
    fs::create_dir_all(&dir).map_err(|e| {
        FinTrackError::Export(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    Ok(dir.join(format!("fintrack-{}.{}", period, format.extension())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryDirectory, Transaction, TransactionType};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn snapshot() -> Snapshot {
        Snapshot {
            categories: CategoryDirectory::new(vec![Category::new(
                "food",
                "Food",
                TransactionType::Expense,
            )]),
            transactions: vec![
                Transaction::new(
                    "t1",
                    TransactionType::Expense,
                    40.0,
                    Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
                    "food",
                ),
                Transaction::new(
                    "t2",
                    TransactionType::Expense,
                    99.0,
                    Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                    "food",
                ),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_output_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let args = ExportArgs {
            month: Some("2024-01".into()),
            format: ExportFormat::Json,
            output: None,
            pretty: true,
        };

        handle_export_command(&paths, &snapshot(), &Settings::default(), &args).unwrap();

        let written = paths.export_dir().join("fintrack-2024-01.json");
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(value["summary"]["totalExpense"], 40.0);
        assert_eq!(value["transactionDetails"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_explicit_output_csv() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let output = temp_dir.path().join("report.csv");
        let args = ExportArgs {
            month: Some("2024-02".into()),
            format: ExportFormat::Csv,
            output: Some(output.clone()),
            pretty: false,
        };

        handle_export_command(&paths, &snapshot(), &Settings::default(), &args).unwrap();

        let text = fs::read_to_string(output).unwrap();
        assert!(text.starts_with("Period,February 2024"));
        assert!(text.contains("Food,$99.00,100.0%"));
    }
}
