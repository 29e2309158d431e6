//! CSV export of processed datasets.

use crate::export::types::{ExportError, ExportOptions};
use crate::processing::batch::{Dataset, OutputRow};
use std::io::Write;

/// Output table columns, in order.
pub const CSV_COLUMNS: [&str; 20] = [
    "timer",
    "hex",
    "Attempt",
    "Created",
    "LastName",
    "FirstName",
    "Weight",
    "Inertia",
    "Magnets",
    "BrakeWeight",
    "time_elapsed",
    "time_test",
    "time_diff",
    "rpm",
    "time_test_diff",
    "power_brake",
    "power_kinetic",
    "time_recorded",
    "power_centered",
    "rpm_centered",
];

fn format_float(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) if value.is_finite() => format!("{:.*}", digits, value),
        _ => value.to_string(),
    }
}

/// Quote a text field if it contains a separator, quote or newline.
fn escape_text(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn format_row(row: &OutputRow<'_>, precision: Option<usize>) -> String {
    let meta = row.meta;
    let sample = row.sample;
    let float = |value: f64| format_float(value, precision);

    [
        sample.timer.to_string(),
        escape_text(&sample.hex),
        meta.attempt.to_string(),
        meta.created.to_rfc3339(),
        escape_text(&meta.last_name),
        escape_text(&meta.first_name),
        float(meta.weight),
        float(meta.inertia),
        meta.magnets.to_string(),
        float(meta.brake_weight),
        float(sample.time_elapsed),
        float(sample.time_test),
        float(sample.time_diff),
        float(sample.rpm),
        float(sample.time_test_diff),
        float(sample.power_brake),
        float(sample.power_kinetic),
        float(sample.time_recorded),
        float(sample.power_centered),
        float(sample.rpm_centered),
    ]
    .join(",")
}

/// Export a dataset to CSV.
///
/// An empty dataset yields the header line alone.
pub fn export_csv(dataset: &Dataset, options: &ExportOptions) -> Result<String, ExportError> {
    let mut output = Vec::new();

    if options.include_header {
        writeln!(output, "{}", CSV_COLUMNS.join(","))
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    for row in dataset.rows() {
        writeln!(output, "{}", format_row(&row, options.float_precision))
            .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Export a dataset to CSV and write it to a file.
pub fn export_csv_to_file(
    dataset: &Dataset,
    options: &ExportOptions,
    path: &std::path::Path,
) -> Result<(), ExportError> {
    let content = export_csv(dataset, options)?;
    std::fs::write(path, content)?;
    Ok(())
}
