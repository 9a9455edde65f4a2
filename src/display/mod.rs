//! Display formatting for terminal output
//!
//! Value formatting shared with the export dataset, and table renderers
//! for the CLI reports.

pub mod format;
pub mod report;

pub use format::{format_amount, format_bar, format_date, format_percentage};
pub use report::{format_alerts, format_monthly, format_rejected, format_stats, format_trend};
