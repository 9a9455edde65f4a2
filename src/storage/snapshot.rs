//! Snapshot ingestion
//!
//! Store records arrive loosely typed: amounts may be numbers or numeric
//! strings and dates come in several shapes. This is the single place where
//! they are validated and converted into the strict models. A record that
//! cannot be converted is dropped with a warning and listed in
//! [`Snapshot::rejected`]; it never fails the whole load. That includes
//! elements whose fields have the wrong JSON type or that are not objects.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::file_io::read_json;
use crate::config::FinTrackPaths;
use crate::error::FinTrackResult;
use crate::models::{
    Budget, BudgetPeriodKind, Category, CategoryDirectory, CategoryIcon, RawDate, Transaction,
    TransactionType,
};

/// A category as stored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A transaction as stored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A budget as stored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBudget {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub start_date: Value,
    #[serde(default)]
    pub end_date: Value,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Which collection a rejected record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Category,
    Transaction,
    Budget,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Transaction => write!(f, "transaction"),
            Self::Budget => write!(f, "budget"),
        }
    }
}

/// A record left out of the snapshot and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub collection: RecordKind,
    pub id: String,
    pub reason: String,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = if self.id.is_empty() { "<no id>" } else { &self.id };
        write!(f, "{} {}: {}", self.collection, id, self.reason)
    }
}

/// Everything one computation reads, already validated
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: CategoryDirectory,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub rejected: Vec<RejectedRecord>,
}

impl Snapshot {
    /// Convert raw store records, keeping the input order of the valid ones
    pub fn from_raw(
        categories: Vec<RawCategory>,
        transactions: Vec<RawTransaction>,
        budgets: Vec<RawBudget>,
    ) -> Self {
        Self::build(categories, transactions, budgets, Vec::new())
    }

    /// Convert untyped store records
    ///
    /// Elements that do not decode into a record are rejected like any
    /// other malformed record.
    pub fn from_values(
        categories: Vec<Value>,
        transactions: Vec<Value>,
        budgets: Vec<Value>,
    ) -> Self {
        let mut rejected = Vec::new();
        let categories = decode(categories, RecordKind::Category, &mut rejected);
        let transactions = decode(transactions, RecordKind::Transaction, &mut rejected);
        let budgets = decode(budgets, RecordKind::Budget, &mut rejected);
        Self::build(categories, transactions, budgets, rejected)
    }

    fn build(
        categories: Vec<RawCategory>,
        transactions: Vec<RawTransaction>,
        budgets: Vec<RawBudget>,
        mut rejected: Vec<RejectedRecord>,
    ) -> Self {
        let categories = collect(categories, RecordKind::Category, &mut rejected, |r| {
            (r.id.clone(), convert_category(r))
        });
        let transactions = collect(transactions, RecordKind::Transaction, &mut rejected, |r| {
            (r.id.clone(), convert_transaction(r))
        });
        let budgets = collect(budgets, RecordKind::Budget, &mut rejected, |r| {
            (r.id.clone(), convert_budget(r))
        });

        debug!(
            categories = categories.len(),
            transactions = transactions.len(),
            budgets = budgets.len(),
            rejected = rejected.len(),
            "snapshot ingested"
        );

        Self {
            categories: CategoryDirectory::new(categories),
            transactions,
            budgets,
            rejected,
        }
    }

    /// Load the snapshot files from the data directory
    ///
    /// Missing files are treated as empty collections.
    pub fn load(paths: &FinTrackPaths) -> FinTrackResult<Self> {
        let categories: Vec<Value> = read_json(paths.categories_file())?;
        let transactions: Vec<Value> = read_json(paths.transactions_file())?;
        let budgets: Vec<Value> = read_json(paths.budgets_file())?;

        Ok(Self::from_values(categories, transactions, budgets))
    }
}

fn decode<R: DeserializeOwned>(
    values: Vec<Value>,
    kind: RecordKind,
    rejected: &mut Vec<RejectedRecord>,
) -> Vec<R> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        let id = record_id(&value);
        match serde_json::from_value(value) {
            Ok(record) => out.push(record),
            Err(e) => {
                let reason = e.to_string();
                warn!(collection = %kind, id = %id, %reason, "skipping undecodable record");
                rejected.push(RejectedRecord {
                    collection: kind,
                    id,
                    reason,
                });
            }
        }
    }
    out
}

fn record_id(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

fn collect<R, T>(
    raw: Vec<R>,
    kind: RecordKind,
    rejected: &mut Vec<RejectedRecord>,
    convert: impl Fn(&R) -> (String, Result<T, String>),
) -> Vec<T> {
    let mut out = Vec::with_capacity(raw.len());
    for record in &raw {
        match convert(record) {
            (_, Ok(value)) => out.push(value),
            (id, Err(reason)) => {
                warn!(collection = %kind, id = %id, %reason, "skipping malformed record");
                rejected.push(RejectedRecord {
                    collection: kind,
                    id,
                    reason,
                });
            }
        }
    }
    out
}

fn require_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        Err("missing id".to_string())
    } else {
        Ok(())
    }
}

fn parse_kind(kind: &str) -> Result<TransactionType, String> {
    kind.parse()
}

fn parse_amount(value: &Value) -> Result<f64, String> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a.is_finite() => Ok(a),
        _ => Err(format!("non-numeric amount: {}", value)),
    }
}

fn parse_date(value: &Value) -> Result<DateTime<Utc>, String> {
    let raw: RawDate = serde_json::from_value(value.clone())
        .map_err(|_| format!("unrecognized date: {}", value))?;
    raw.normalize().map_err(|e| e.to_string())
}

fn parse_period(period: &str) -> Result<BudgetPeriodKind, String> {
    match period.trim().to_ascii_lowercase().as_str() {
        "weekly" => Ok(BudgetPeriodKind::Weekly),
        "monthly" => Ok(BudgetPeriodKind::Monthly),
        "yearly" => Ok(BudgetPeriodKind::Yearly),
        other => Err(format!("unknown budget period '{}'", other)),
    }
}

fn convert_category(raw: &RawCategory) -> Result<Category, String> {
    require_id(&raw.id)?;
    let category = Category {
        id: raw.id.as_str().into(),
        name: raw.name.trim().to_string(),
        kind: parse_kind(&raw.kind)?,
        icon: raw.icon.as_deref().map(CategoryIcon::from_key),
        is_default: raw.is_default,
    };
    category.validate_required().map_err(|e| e.to_string())?;
    Ok(category)
}

fn convert_transaction(raw: &RawTransaction) -> Result<Transaction, String> {
    require_id(&raw.id)?;
    let transaction = Transaction {
        id: raw.id.as_str().into(),
        user_id: raw.user_id.as_str().into(),
        kind: parse_kind(&raw.kind)?,
        amount: parse_amount(&raw.amount)?,
        date: parse_date(&raw.date)?,
        category_id: raw.category_id.as_str().into(),
        description: raw.description.clone().unwrap_or_default(),
        note: raw.note.clone(),
    };
    transaction.validate().map_err(|e| e.to_string())?;
    Ok(transaction)
}

fn convert_budget(raw: &RawBudget) -> Result<Budget, String> {
    require_id(&raw.id)?;
    let budget = Budget {
        id: raw.id.as_str().into(),
        category_id: raw.category_id.as_str().into(),
        amount: parse_amount(&raw.amount)?,
        period: parse_period(&raw.period)?,
        start_date: parse_date(&raw.start_date)?,
        end_date: parse_date(&raw.end_date)?,
        is_active: raw.is_active.unwrap_or(true),
    };
    budget.validate().map_err(|e| e.to_string())?;
    Ok(budget)
}
