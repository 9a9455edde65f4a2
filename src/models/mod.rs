//! Core data models for fintrack
//!
//! Strict record shapes for categories, transactions and budgets. Loosely
//! typed store records are converted into these in `storage::snapshot`.

pub mod budget;
pub mod category;
pub mod ids;
pub mod period;
pub mod timestamp;
pub mod transaction;

pub use budget::{
    budgets_current_on, current_budgets, Budget, BudgetPeriodKind, BudgetValidationError,
};
pub use category::{Category, CategoryDirectory, CategoryIcon, CategoryValidationError};
pub use ids::{BudgetId, CategoryId, TransactionId, UserId};
pub use period::{PeriodParseError, ReportPeriod};
pub use timestamp::{day_end, day_start, RawDate, TimestampError};
pub use transaction::{Transaction, TransactionType, TransactionValidationError};
