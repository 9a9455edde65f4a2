//! fintrack - personal finance aggregation and budget alerts
//!
//! This library reads a snapshot of categories, transactions and budgets
//! and derives everything a finance dashboard shows from it: filtered
//! selections, income/expense statistics, cumulative trend series, budget
//! alerts and export-ready report datasets.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Strict data models (categories, transactions, budgets, periods)
//! - `storage`: Snapshot files and validation of raw records
//! - `reports`: Filter, stats, monthly totals, trend series and budget alerts
//! - `export`: Export dataset and its CSV/JSON/YAML writers
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::FinTrackPaths;
//! use fintrack::reports::{Stats, TransactionFilter};
//! use fintrack::storage::Snapshot;
//!
//! let paths = FinTrackPaths::new()?;
//! let snapshot = Snapshot::load(&paths)?;
//! let january = TransactionFilter::between(start, end).apply(&snapshot.transactions);
//! let stats = Stats::compute(&january);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{FinTrackError, FinTrackResult};
