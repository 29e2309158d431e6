//! Batch processing of test-bout tables.

pub mod batch;
pub mod error;
pub mod progress;

pub use batch::{process_attempt, process_batch, Dataset, OutputRow};
pub use error::{ProcessingError, ProcessingResult};
pub use progress::{NullProgress, ProgressSink, Stage, TracingProgress};
