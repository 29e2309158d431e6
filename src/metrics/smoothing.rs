//! Centered time-window smoothing of power and cadence.
//!
//! Every sample gets the mean power and cadence of all samples of the same
//! attempt whose `time_test` lies strictly within ±0.5 s of its own.

use crate::flywheel::types::ConfigError;
use crate::metrics::kinematics::{round_half_even, AttemptSeries, ProcessedSample};
use std::str::FromStr;

/// Half width of the centered window in seconds.
pub const WINDOW_HALF_WIDTH_S: f64 = 0.5;

/// Quantity averaged over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    /// Brake plus kinetic power
    Power,
    /// Cadence
    Rpm,
}

impl MeasurementKind {
    fn value(self, sample: &ProcessedSample) -> f64 {
        match self {
            MeasurementKind::Power => sample.power(),
            MeasurementKind::Rpm => sample.rpm,
        }
    }
}

impl FromStr for MeasurementKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power" => Ok(MeasurementKind::Power),
            "rpm" => Ok(MeasurementKind::Rpm),
            other => Err(ConfigError::UnknownMeasurement(other.to_string())),
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementKind::Power => write!(f, "power"),
            MeasurementKind::Rpm => write!(f, "rpm"),
        }
    }
}

/// Mean of the selected samples rounded to 2 decimals.
///
/// NaN terms are left out of the sum but still counted. An empty selection
/// gives NaN.
fn window_mean<'a>(
    selected: impl Iterator<Item = &'a ProcessedSample>,
    kind: MeasurementKind,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for sample in selected {
        let value = kind.value(sample);
        if !value.is_nan() {
            sum += value;
        }
        count += 1;
    }
    round_half_even(sum / count as f64, 2)
}

/// Centered mean by scanning the whole series.
pub fn centered_mean(samples: &[ProcessedSample], kind: MeasurementKind, center: f64) -> f64 {
    let lower = center - WINDOW_HALF_WIDTH_S;
    let upper = center + WINDOW_HALF_WIDTH_S;
    window_mean(
        samples
            .iter()
            .filter(|s| s.time_test > lower && s.time_test < upper),
        kind,
    )
}

/// Centered mean for a measurement given by name (`"power"` or `"rpm"`).
pub fn smooth(samples: &[ProcessedSample], kind: &str, center: f64) -> Result<f64, ConfigError> {
    let kind = kind.parse::<MeasurementKind>()?;
    Ok(centered_mean(samples, kind, center))
}

/// Sliding window over a series sorted by `time_test`.
///
/// Both bounds only move forward, so a pass over the series visits each
/// sample at most twice to locate the windows.
#[derive(Debug)]
pub struct SlidingWindow<'a> {
    samples: &'a [ProcessedSample],
    lo: usize,
    hi: usize,
}

impl<'a> SlidingWindow<'a> {
    /// Create a window over `samples`, which must be sorted by `time_test`.
    pub fn new(samples: &'a [ProcessedSample]) -> Self {
        Self { samples, lo: 0, hi: 0 }
    }

    /// Advance to `center` and return the samples inside the window.
    ///
    /// Centers must be passed in non-decreasing order.
    pub fn advance(&mut self, center: f64) -> &'a [ProcessedSample] {
        let lower = center - WINDOW_HALF_WIDTH_S;
        let upper = center + WINDOW_HALF_WIDTH_S;
        let n = self.samples.len();

        while self.lo < n && self.samples[self.lo].time_test <= lower {
            self.lo += 1;
        }
        self.hi = self.hi.max(self.lo);
        while self.hi < n && self.samples[self.hi].time_test < upper {
            self.hi += 1;
        }

        &self.samples[self.lo..self.hi]
    }
}

/// Check if `time_test` is non-decreasing across the samples.
pub fn is_time_sorted(samples: &[ProcessedSample]) -> bool {
    samples
        .windows(2)
        .all(|pair| pair[0].time_test <= pair[1].time_test)
}

/// Fill `power_centered` and `rpm_centered` for every sample of a series.
///
/// Uses the sliding window when the series is time-sorted and falls back to
/// a full scan per sample otherwise. Both sum the same samples in series
/// order, so they produce identical values.
pub fn smooth_series(series: &mut AttemptSeries) {
    let samples = &series.samples;

    let centered: Vec<(f64, f64)> = if is_time_sorted(samples) {
        let mut window = SlidingWindow::new(samples);
        samples
            .iter()
            .map(|sample| {
                let selected = window.advance(sample.time_test);
                (
                    window_mean(selected.iter(), MeasurementKind::Power),
                    window_mean(selected.iter(), MeasurementKind::Rpm),
                )
            })
            .collect()
    } else {
        tracing::warn!(
            "Attempt {}: time_test not sorted, smoothing by full scan",
            series.meta.attempt
        );
        samples
            .iter()
            .map(|sample| {
                (
                    centered_mean(samples, MeasurementKind::Power, sample.time_test),
                    centered_mean(samples, MeasurementKind::Rpm, sample.time_test),
                )
            })
            .collect()
    };

    for (sample, (power, rpm)) in series.samples.iter_mut().zip(centered) {
        sample.power_centered = power;
        sample.rpm_centered = rpm;
    }
}
