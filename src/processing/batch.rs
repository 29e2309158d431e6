//! Batch aggregation over all attempts of an input table.
//!
//! Each attempt is processed independently (decode, kinematics, smoothing)
//! and the resulting series are concatenated in input order. The first
//! failing attempt aborts the batch.

use crate::flywheel::builder::build_attempt;
use crate::flywheel::types::{AttemptMeta, RawAttemptRecord};
use crate::metrics::kinematics::{derive_series, AttemptSeries, ProcessedSample};
use crate::metrics::smoothing::smooth_series;
use crate::processing::error::ProcessingResult;
use crate::processing::progress::{ProgressSink, Stage};
use serde::Serialize;

/// Processed output of a whole batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Series in input order
    pub series: Vec<AttemptSeries>,
}

/// One row of the output table: a sample with its attempt metadata.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutputRow<'a> {
    #[serde(flatten)]
    pub meta: &'a AttemptMeta,
    #[serde(flatten)]
    pub sample: &'a ProcessedSample,
}

impl Dataset {
    /// Total number of output rows.
    pub fn len(&self) -> usize {
        self.series.iter().map(AttemptSeries::len).sum()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output rows in attempt order, then sample order.
    pub fn rows(&self) -> impl Iterator<Item = OutputRow<'_>> {
        self.series.iter().flat_map(|series| {
            series.samples.iter().map(move |sample| OutputRow {
                meta: &series.meta,
                sample,
            })
        })
    }
}

/// Run one attempt through decoding, kinematics and smoothing.
///
/// `row` is the record's position in the input table, reported in errors.
pub fn process_attempt(row: usize, record: &RawAttemptRecord) -> ProcessingResult<AttemptSeries> {
    let attempt = build_attempt(row, record)?;
    let mut series = derive_series(&attempt);
    smooth_series(&mut series);

    let non_finite = series.non_finite_count();
    if non_finite > 0 {
        tracing::warn!(
            "Attempt {}: {} samples carry non-finite cadence or power",
            series.meta.attempt,
            non_finite
        );
    }

    Ok(series)
}

/// Process every attempt of the input table.
///
/// Notifies `progress` on entry and on successful completion. Any decode or
/// configuration error aborts the batch without output.
pub fn process_batch<P>(records: &[RawAttemptRecord], progress: &mut P) -> ProcessingResult<Dataset>
where
    P: ProgressSink + ?Sized,
{
    progress.log_progress("Start monark_process command", None);

    let series = records
        .iter()
        .enumerate()
        .map(|(row, record)| process_attempt(row, record))
        .collect::<ProcessingResult<Vec<_>>>()?;
    let dataset = Dataset { series };

    tracing::info!(
        "Processed {} attempts into {} samples",
        records.len(),
        dataset.len()
    );
    progress.log_progress("Monark dataset has been processed", Some(Stage::new(1, 1)));

    Ok(dataset)
}
