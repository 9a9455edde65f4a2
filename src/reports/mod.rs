//! Reports module for FinTrack
//!
//! Pure computations over an in-memory snapshot: transaction filtering,
//! statistics, monthly totals, cumulative trend series and budget alerts.
//! Nothing here touches storage or fails; malformed input is dropped
//! earlier, at ingestion.

pub mod alerts;
pub mod filter;
pub mod monthly;
pub mod stats;
pub mod trend;

mod totals;

pub use alerts::{
    evaluate_budgets, percent_consumed, Alert, AlertLevel, AlertThresholds, BudgetAlertEvaluator,
    BudgetProgress,
};
pub use filter::TransactionFilter;
pub use monthly::{monthly_totals, MonthlyTotal};
pub use stats::Stats;
pub use trend::{TrendBounds, TrendCache, TrendDisplay, TrendPoint, TrendSeries};
