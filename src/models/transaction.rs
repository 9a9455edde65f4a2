//! Transaction model
//!
//! Transactions are created and edited by the store; everything in this
//! crate only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId, UserId};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owner of the transaction
    pub user_id: UserId,

    /// Income or expense
    pub kind: TransactionType,

    /// Always positive; the direction is carried by `kind`
    pub amount: f64,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    /// The category this transaction is filed under
    pub category_id: CategoryId,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// Create a transaction with an empty description
    pub fn new(
        id: impl Into<TransactionId>,
        kind: TransactionType,
        amount: f64,
        date: DateTime<Utc>,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: UserId::default(),
            kind,
            amount,
            date,
            category_id: category_id.into(),
            description: String::new(),
            note: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Check the amount invariant
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_finite() {
            return Err(TransactionValidationError::NonFiniteAmount);
        }
        if self.amount <= 0.0 {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NonFiniteAmount,
    NonPositiveAmount(f64),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteAmount => write!(f, "Amount must be a finite number"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive (got {})", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
