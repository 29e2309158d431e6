//! Metrics derived from decoded flywheel ticks.

pub mod kinematics;
pub mod smoothing;

pub use kinematics::{derive_series, round_half_even, AttemptSeries, ProcessedSample};
pub use smoothing::{centered_mean, smooth, smooth_series, MeasurementKind, SlidingWindow};
