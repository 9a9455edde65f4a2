//! User settings for fintrack
//!
//! Manages formatting preferences (currency, separators, date format,
//! display labels) and the budget alert thresholds.

use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::error::FinTrackError;
use crate::reports::alerts::AlertThresholds;
use crate::storage::file_io::write_json_atomic;

/// How monetary amounts are rendered in reports and exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Currency symbol placed before the amount
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Separator between groups of three integer digits
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    /// Separator between the integer and fractional part
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,

    /// Number of fractional digits
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            decimal_places: default_decimal_places(),
        }
    }
}

/// Localized labels used in report rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayLabels {
    #[serde(default = "default_income_label")]
    pub income: String,

    #[serde(default = "default_expense_label")]
    pub expense: String,

    /// Shown when a transaction references a category that no longer exists
    #[serde(default = "default_unknown_category_label")]
    pub unknown_category: String,

    /// Shown when a transaction description is blank
    #[serde(default = "default_no_description_label")]
    pub no_description: String,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            income: default_income_label(),
            expense: default_expense_label(),
            unknown_category: default_unknown_category_label(),
            no_description: default_no_description_label(),
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Amount formatting
    #[serde(default)]
    pub number_format: NumberFormat,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Labels for transaction types and fallbacks
    #[serde(default)]
    pub labels: DisplayLabels,

    /// Budget alert thresholds in percent
    #[serde(default)]
    pub alert_thresholds: AlertThresholds,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_decimal_places() -> usize {
    2
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_income_label() -> String {
    "Income".to_string()
}

fn default_expense_label() -> String {
    "Expense".to_string()
}

fn default_unknown_category_label() -> String {
    "Unknown category".to_string()
}

fn default_no_description_label() -> String {
    "(no description)".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            number_format: NumberFormat::default(),
            date_format: default_date_format(),
            labels: DisplayLabels::default(),
            alert_thresholds: AlertThresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinTrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinTrackError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinTrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.alert_thresholds.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinTrackError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }
}
