//! Types shared by the flywheel decoding stages.
//!
//! Defines the input row, decoded ticks, the metadata broadcast to every
//! sample of an attempt, and the decode/config error kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flywheel inertia of the ergometer (kg·m²).
pub const FLYWHEEL_INERTIA: f64 = 0.91;

/// One row of the input table: the result of a single test bout.
///
/// Field names follow the column names of the host table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttemptRecord {
    /// Hex-encoded flywheel log, 8 characters per tick
    #[serde(rename = "FlyWheelLog")]
    pub flywheel_log: String,
    /// Attempt (bout) identifier
    #[serde(rename = "BoutNumber")]
    pub attempt: i64,
    /// Row creation time
    #[serde(rename = "_time", with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
    /// Athlete first name
    #[serde(rename = "FirstName")]
    pub first_name: String,
    /// Athlete last name
    #[serde(rename = "LastName")]
    pub last_name: String,
    /// Athlete weight in kilograms
    #[serde(rename = "PersonWeight")]
    pub weight: f64,
    /// Magnet sampling configuration of the ergometer (must be nonzero)
    #[serde(rename = "SamplingMagnets")]
    pub sampling_magnets: f64,
    /// Brake weight applied to the flywheel
    #[serde(rename = "BrakeWeight")]
    pub brake_weight: f64,
    /// Total test duration in seconds
    #[serde(rename = "Duration")]
    pub duration: f64,
}

/// One decoded hardware clock tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerTick {
    /// Position of the tick within the attempt log
    pub index: usize,
    /// Raw 8-character chunk as found in the log
    pub hex: String,
    /// Decoded clock value
    pub value: u32,
}

/// Attempt-level values copied onto every sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptMeta {
    #[serde(rename = "Attempt")]
    pub attempt: i64,
    #[serde(rename = "Created")]
    pub created: DateTime<Utc>,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Inertia")]
    pub inertia: f64,
    /// Gearing constant derived from the sampling configuration
    #[serde(rename = "Magnets")]
    pub magnets: i64,
    #[serde(rename = "BrakeWeight")]
    pub brake_weight: f64,
}

impl AttemptMeta {
    /// Whether any numeric metadata is NaN.
    ///
    /// Such an attempt contributes no samples: every row would carry the NaN.
    pub fn has_nan(&self) -> bool {
        self.weight.is_nan() || self.inertia.is_nan() || self.brake_weight.is_nan()
    }
}

/// Errors decoding a single tick chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Chunk is not exactly 8 characters long.
    #[error("tick chunk must be 8 hex characters, got {len}")]
    InvalidLength { len: usize },

    /// Chunk contains a character that is not a hex digit.
    #[error("tick chunk {chunk:?} contains non-hex characters")]
    InvalidDigit { chunk: String },
}

/// A configuration value that makes the computation undefined.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Sampling magnets of zero leaves the gearing constant undefined.
    #[error("sampling magnets must be nonzero")]
    ZeroSamplingMagnets,

    /// Sampling magnets is NaN or infinite.
    #[error("sampling magnets must be finite, got {0}")]
    NonFiniteSamplingMagnets(f64),

    /// Requested smoothing measurement is not supported.
    #[error("unknown measurement {0:?}, expected \"power\" or \"rpm\"")]
    UnknownMeasurement(String),
}
