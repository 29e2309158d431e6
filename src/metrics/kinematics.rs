//! Kinematics derived from flywheel clock ticks.
//!
//! Converts the tick sequence of one attempt into elapsed time, cadence and
//! the two power components (brake friction and flywheel acceleration) by
//! finite differences over consecutive ticks.

use crate::flywheel::builder::{DecodedAttempt, CHAINRING_TEETH, SPROCKET_TEETH};
use crate::flywheel::types::AttemptMeta;
use serde::Serialize;
use std::f64::consts::PI;

/// Hardware clock frequency in ticks per second.
pub const CLOCK_HZ: f64 = 57600.0;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Effective flywheel radius used for the brake power term.
pub const FLYWHEEL_RADIUS: f64 = 0.514;

/// One derived sample of an attempt.
///
/// Window-smoothed fields are NaN until the series is smoothed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedSample {
    /// Raw clock value
    pub timer: u32,
    /// Raw tick chunk text
    pub hex: String,
    /// Seconds since the first tick
    pub time_elapsed: f64,
    /// Midpoint between this and the previous tick
    pub time_test: f64,
    /// Clock ticks since the previous tick
    pub time_diff: f64,
    /// Cadence in revolutions per minute
    pub rpm: f64,
    /// Change of `time_test` since the previous sample
    pub time_test_diff: f64,
    /// Power dissipated by the brake (W)
    pub power_brake: f64,
    /// Power absorbed by flywheel acceleration (W)
    pub power_kinetic: f64,
    /// Time on the test clock, counted back from the recorded duration
    pub time_recorded: f64,
    /// Mean total power over a ±0.5 s window
    pub power_centered: f64,
    /// Mean cadence over a ±0.5 s window
    pub rpm_centered: f64,
}

impl ProcessedSample {
    /// Total mechanical power.
    pub fn power(&self) -> f64 {
        self.power_brake + self.power_kinetic
    }

    fn has_nan(&self) -> bool {
        [
            self.time_elapsed,
            self.time_test,
            self.time_diff,
            self.rpm,
            self.time_test_diff,
            self.power_brake,
            self.power_kinetic,
            self.time_recorded,
        ]
        .iter()
        .any(|v| v.is_nan())
    }

    fn has_non_finite(&self) -> bool {
        [self.rpm, self.power_brake, self.power_kinetic]
            .iter()
            .any(|v| !v.is_finite())
    }
}

/// Ordered samples of one attempt plus the metadata broadcast to each.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSeries {
    pub meta: AttemptMeta,
    pub samples: Vec<ProcessedSample>,
}

impl AttemptSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples carrying an infinite or NaN cadence/power value.
    pub fn non_finite_count(&self) -> usize {
        self.samples.iter().filter(|s| s.has_non_finite()).count()
    }
}

/// Round half to even at the given number of decimals.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    if decimals == 0 {
        return value.round_ties_even();
    }
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Derive the kinematic series of one attempt.
///
/// Rows relying on tick history that does not exist (the first two) and any
/// row holding a NaN are removed, then the first surviving row is dropped as
/// well. For a well-formed log of N ticks this leaves N - 3 samples starting
/// at tick index 3. Infinite values are kept.
pub fn derive_series(attempt: &DecodedAttempt) -> AttemptSeries {
    let meta = attempt.meta.clone();
    let ticks = &attempt.ticks;

    let Some(first) = ticks.first() else {
        return AttemptSeries {
            meta,
            samples: Vec::new(),
        };
    };

    let t: Vec<f64> = ticks.iter().map(|tick| tick.value as f64).collect();
    let t0 = first.value as f64;
    let elapsed: Vec<f64> = t.iter().map(|&v| (v - t0) / CLOCK_HZ).collect();
    let last_elapsed = elapsed[elapsed.len() - 1];

    let magnets = meta.magnets as f64;
    let rpm_numerator = SPROCKET_TEETH * 60.0 * CLOCK_HZ;
    let rpm_gearing = meta.magnets.saturating_mul(CHAINRING_TEETH as i64) as f64;
    let brake_force = meta.brake_weight * GRAVITY * PI * FLYWHEEL_RADIUS;
    let kinetic_coefficient = 4.0 * (PI * PI) * CLOCK_HZ.powi(3) * meta.inertia;

    let time_test = |i: usize| -> f64 {
        if i == 0 {
            f64::NAN
        } else {
            (elapsed[i] + elapsed[i - 1]) / 2.0
        }
    };

    let mut samples = Vec::with_capacity(ticks.len().saturating_sub(3));
    for (i, tick) in ticks.iter().enumerate() {
        let time_diff = if i >= 1 { t[i] - t[i - 1] } else { f64::NAN };
        let time_test_diff = if i >= 1 {
            time_test(i) - time_test(i - 1)
        } else {
            f64::NAN
        };

        let power_kinetic = if i >= 2 {
            let span = t[i] - t[i - 2];
            let current = t[i] - t[i - 1];
            let previous = t[i - 1] - t[i - 2];
            kinetic_coefficient / (magnets * magnets * span)
                * (1.0 / (current * current) - 1.0 / (previous * previous))
        } else {
            f64::NAN
        };

        samples.push(ProcessedSample {
            timer: tick.value,
            hex: tick.hex.clone(),
            time_elapsed: elapsed[i],
            time_test: time_test(i),
            time_diff,
            rpm: round_half_even(rpm_numerator / (rpm_gearing * time_diff), 0),
            time_test_diff,
            power_brake: brake_force / (magnets * time_test_diff),
            power_kinetic,
            time_recorded: round_half_even(elapsed[i] - last_elapsed + attempt.duration, 2),
            power_centered: f64::NAN,
            rpm_centered: f64::NAN,
        });
    }

    let samples: Vec<ProcessedSample> = if meta.has_nan() {
        Vec::new()
    } else {
        samples
            .into_iter()
            .filter(|sample| !sample.has_nan())
            .skip(1)
            .collect()
    };

    tracing::debug!(
        "Attempt {}: {} ticks -> {} samples",
        meta.attempt,
        ticks.len(),
        samples.len()
    );

    AttemptSeries { meta, samples }
}
