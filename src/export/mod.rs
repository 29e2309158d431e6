//! Export of processed datasets.

pub mod exporter_csv;
pub mod exporter_json;
pub mod types;

pub use exporter_csv::{export_csv, export_csv_to_file};
pub use exporter_json::{export_json, export_json_to_file};
pub use types::{generate_filename, ExportError, ExportFormat, ExportOptions};
