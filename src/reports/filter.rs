//! Transaction filter
//!
//! Narrows a snapshot by day range, category and type. Every criterion that
//! is set must match; an empty filter returns the input unchanged.

use chrono::NaiveDate;

use crate::models::{day_end, day_start, CategoryId, ReportPeriod, Transaction, TransactionType};

/// Filter options for selecting transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// First day included (from 00:00:00.000 UTC)
    pub start_date: Option<NaiveDate>,
    /// Last day included (through 23:59:59.999 UTC)
    pub end_date: Option<NaiveDate>,
    /// Exact category match
    pub category_id: Option<CategoryId>,
    /// Exact type match
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    /// Filter covering both days inclusively
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    /// Filter covering one calendar month
    pub fn for_month(period: ReportPeriod) -> Self {
        Self::between(period.start_date(), period.end_date())
    }

    pub fn with_category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.category_id.is_none()
            && self.kind.is_none()
    }

    /// Check if a transaction matches this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if txn.date < day_start(start) {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if txn.date > day_end(end) {
                return false;
            }
        }

        if let Some(ref category_id) = self.category_id {
            if &txn.category_id != category_id {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        true
    }

    /// The matching transactions, in input order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        if self.is_empty() {
            return transactions.to_vec();
        }
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
