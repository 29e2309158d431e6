//! JSON export of processed datasets.
//!
//! Non-finite floats have no JSON representation and are written as `null`.

use crate::export::types::ExportError;
use crate::processing::batch::{Dataset, OutputRow};

/// Export a dataset as a pretty-printed JSON array of rows.
pub fn export_json(dataset: &Dataset) -> Result<String, ExportError> {
    let rows: Vec<OutputRow<'_>> = dataset.rows().collect();
    serde_json::to_string_pretty(&rows).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Export a dataset to JSON and write it to a file.
pub fn export_json_to_file(dataset: &Dataset, path: &std::path::Path) -> Result<(), ExportError> {
    let content = export_json(dataset)?;
    std::fs::write(path, content)?;
    Ok(())
}
