//! Loading the input table of test bouts.
//!
//! The table is a JSON array of row objects keyed by the host column names.

use crate::flywheel::types::RawAttemptRecord;
use crate::storage::config::StorageError;
use std::path::Path;

/// Parse an input table from JSON text.
pub fn parse_records(json: &str) -> Result<Vec<RawAttemptRecord>, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::ParseError(e.to_string()))
}

/// Load an input table from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<RawAttemptRecord>, StorageError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| StorageError::IoError(format!("{}: {}", path.display(), e)))?;
    let records = parse_records(&content)?;

    tracing::info!("Loaded {} attempts from {}", records.len(), path.display());

    Ok(records)
}
