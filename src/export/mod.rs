//! Export module for fintrack
//!
//! [`ExportDataset`] is the normalized report for one period. The writers
//! render it as:
//! - CSV: one sheet with summary, breakdown and detail sections
//! - JSON: machine-readable, with schema metadata
//! - YAML: the same document, human-readable

pub mod csv;
pub mod dataset;
pub mod json;
pub mod yaml;

pub use self::csv::export_dataset_csv;
pub use dataset::{CategoryBreakdownRow, ExportDataset, ExportSummary, TransactionDetailRow};
pub use json::{export_dataset_json, DatasetExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_dataset_yaml;
