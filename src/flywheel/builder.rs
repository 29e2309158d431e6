//! Per-attempt series building.
//!
//! Decodes every tick of one attempt's log and derives the attempt-level
//! gearing constant.

use crate::flywheel::tick::{decode_tick, split_ticks};
use crate::flywheel::types::{
    AttemptMeta, ConfigError, RawAttemptRecord, TimerTick, FLYWHEEL_INERTIA,
};
use crate::processing::error::ProcessingError;

/// Teeth on the front chainring.
pub const CHAINRING_TEETH: f64 = 52.0;

/// Teeth on the flywheel sprocket.
pub const SPROCKET_TEETH: f64 = 14.0;

/// Decoded ticks of one attempt together with its broadcast metadata.
#[derive(Debug, Clone)]
pub struct DecodedAttempt {
    /// Metadata shared by every sample
    pub meta: AttemptMeta,
    /// Ticks in log order
    pub ticks: Vec<TimerTick>,
    /// Total test duration in seconds
    pub duration: f64,
}

impl DecodedAttempt {
    /// Number of decoded ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Check if the log held no complete tick.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

/// Derive the gearing constant `Magnets` from the sampling configuration.
///
/// Magnets = round(14 / (52 * sampling / 10000)), rounding half to even.
pub fn magnets_from_sampling(sampling_magnets: f64) -> Result<i64, ConfigError> {
    if !sampling_magnets.is_finite() {
        return Err(ConfigError::NonFiniteSamplingMagnets(sampling_magnets));
    }
    if sampling_magnets == 0.0 {
        return Err(ConfigError::ZeroSamplingMagnets);
    }

    let ratio = SPROCKET_TEETH / (CHAINRING_TEETH * sampling_magnets / 10000.0);
    if !ratio.is_finite() {
        return Err(ConfigError::NonFiniteSamplingMagnets(sampling_magnets));
    }

    Ok(ratio.round_ties_even() as i64)
}

/// Decode one attempt's log and attach its metadata.
///
/// `row` is the record's position in the input table and is only used to
/// locate errors.
pub fn build_attempt(
    row: usize,
    record: &RawAttemptRecord,
) -> Result<DecodedAttempt, ProcessingError> {
    let magnets =
        magnets_from_sampling(record.sampling_magnets).map_err(|source| ProcessingError::Config {
            row,
            attempt: record.attempt,
            field: "SamplingMagnets",
            source,
        })?;

    let ticks = split_ticks(&record.flywheel_log)
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            decode_tick(chunk)
                .map(|value| TimerTick {
                    index,
                    hex: chunk.to_string(),
                    value,
                })
                .map_err(|source| ProcessingError::Decode {
                    row,
                    attempt: record.attempt,
                    field: "FlyWheelLog",
                    index,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Attempt {}: decoded {} ticks, magnets {}",
        record.attempt,
        ticks.len(),
        magnets
    );

    Ok(DecodedAttempt {
        meta: AttemptMeta {
            attempt: record.attempt,
            created: record.created,
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            weight: record.weight,
            inertia: FLYWHEEL_INERTIA,
            magnets,
            brake_weight: record.brake_weight,
        },
        ticks,
        duration: record.duration,
    })
}
