//! YAML export
//!
//! Same document as the JSON export, for reading by hand.

use std::io::Write;

use super::dataset::ExportDataset;
use super::json::DatasetExport;
use crate::error::{FinTrackError, FinTrackResult};

/// Export the dataset as YAML with a short comment header
pub fn export_dataset_yaml<W: Write>(dataset: &ExportDataset, writer: &mut W) -> FinTrackResult<()> {
    let export = DatasetExport::new(dataset);

    writeln!(writer, "# fintrack report: {}", dataset.summary.period_label)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinTrackError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::january_dataset;

    #[test]
    fn test_yaml_export() {
        let dataset = january_dataset();
        let mut buffer = Vec::new();
        export_dataset_yaml(&dataset, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# fintrack report: January 2024"));
        assert!(text.contains("periodLabel: January 2024"));
        assert!(text.contains("categoryBreakdown:"));

        let body: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(body["summary"]["totalExpense"].as_f64(), Some(60000.0));
    }
}
