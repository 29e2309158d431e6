//! Export types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values, one row per sample
    #[default]
    Csv,
    /// JSON array of row objects
    Json,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Generate a default filename for a dataset processed at `processed_at`.
pub fn generate_filename(format: ExportFormat, processed_at: chrono::DateTime<chrono::Utc>) -> String {
    format!("Monark_{}.{}", processed_at.format("%Y%m%d_%H%M%S"), format)
}

/// Formatting options for exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output format
    pub format: ExportFormat,
    /// Write the column header line (CSV only)
    pub include_header: bool,
    /// Fixed number of decimals for floats; shortest exact form if unset (CSV only)
    pub float_precision: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_header: true,
            float_precision: None,
        }
    }
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),

    /// Unsupported export format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
