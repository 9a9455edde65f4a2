//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report layer.

pub mod export;
pub mod report;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use report::{
    handle_alerts_command, handle_monthly_command, handle_stats_command, handle_trend_command,
    AlertsArgs, FilterArgs, ReportArgs, TrendArgs,
};
