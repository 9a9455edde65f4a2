//! JSON export
//!
//! Writes an [`ExportDataset`] wrapped with schema and generation metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use super::dataset::ExportDataset;
use crate::error::FinTrackResult;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A dataset as written to disk
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    #[serde(flatten)]
    pub dataset: &'a ExportDataset,
}

impl<'a> DatasetExport<'a> {
    pub fn new(dataset: &'a ExportDataset) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            dataset,
        }
    }
}

/// Export the dataset as JSON
pub fn export_dataset_json<W: Write>(
    dataset: &ExportDataset,
    writer: &mut W,
    pretty: bool,
) -> FinTrackResult<()> {
    let export = DatasetExport::new(dataset);
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer)?;
    Ok(())
}
