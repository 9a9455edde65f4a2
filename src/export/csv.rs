//! CSV export
//!
//! Lays the dataset out as one spreadsheet-style sheet: the summary as
//! label/value pairs, then the category breakdown, then the transaction
//! details, each section separated by an empty line.

use std::io::Write;

use super::dataset::ExportDataset;
use crate::error::FinTrackResult;

/// Export the dataset to CSV
pub fn export_dataset_csv<W: Write>(dataset: &ExportDataset, writer: &mut W) -> FinTrackResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(&mut *writer);

    let summary = &dataset.summary;
    let summary_rows = [
        ("Period", summary.period_label.clone()),
        ("Total Income", summary.total_income.to_string()),
        ("Total Expense", summary.total_expense.to_string()),
        ("Balance", summary.balance.to_string()),
        ("Transactions", summary.total_transactions.to_string()),
        ("Income Transactions", summary.income_transactions.to_string()),
        ("Expense Transactions", summary.expense_transactions.to_string()),
    ];
    for (label, value) in &summary_rows {
        csv.write_record([*label, value.as_str()])?;
    }
    csv.write_record([""])?;

    csv.write_record(["Category", "Amount", "Percentage"])?;
    for row in &dataset.category_breakdown {
        csv.write_record([
            row.category_name.as_str(),
            row.formatted_amount.as_str(),
            row.formatted_percentage.as_str(),
        ])?;
    }
    csv.write_record([""])?;

    csv.write_record(["Date", "Description", "Category", "Type", "Amount"])?;
    for row in &dataset.transaction_details {
        csv.write_record([
            row.date.as_str(),
            row.description.as_str(),
            row.category_name.as_str(),
            row.kind.as_str(),
            row.formatted_amount.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
