//! Monark Processing - ergometer flywheel log decoding
//!
//! Decodes the raw hex flywheel log of Monark ergometer test bouts into a
//! time series of elapsed time, cadence and power, then smooths power and
//! cadence over a centered ±0.5 s window.

pub mod export;
pub mod flywheel;
pub mod metrics;
pub mod processing;
pub mod storage;

// Re-export commonly used types
pub use flywheel::types::{ConfigError, DecodeError, RawAttemptRecord};
pub use metrics::kinematics::{AttemptSeries, ProcessedSample};
pub use processing::batch::{process_batch, Dataset};
pub use processing::error::ProcessingError;
pub use processing::progress::{ProgressSink, TracingProgress};
pub use storage::config::AppConfig;
