//! Batch processing error types.

use crate::flywheel::types::{ConfigError, DecodeError};
use thiserror::Error;

/// A failure that aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// A tick chunk of the attempt log could not be decoded.
    #[error("row {row}, attempt {attempt}: {field} tick {index}: {source}")]
    Decode {
        row: usize,
        attempt: i64,
        field: &'static str,
        index: usize,
        #[source]
        source: DecodeError,
    },

    /// An attempt configuration value makes the computation undefined.
    #[error("row {row}, attempt {attempt}: {field}: {source}")]
    Config {
        row: usize,
        attempt: i64,
        field: &'static str,
        #[source]
        source: ConfigError,
    },
}

impl ProcessingError {
    /// Position of the failing record in the input table.
    pub fn row(&self) -> usize {
        match self {
            ProcessingError::Decode { row, .. } | ProcessingError::Config { row, .. } => *row,
        }
    }

    /// Attempt the error originated from.
    pub fn attempt(&self) -> i64 {
        match self {
            ProcessingError::Decode { attempt, .. } | ProcessingError::Config { attempt, .. } => {
                *attempt
            }
        }
    }

    /// Input field the error originated from.
    pub fn field(&self) -> &'static str {
        match self {
            ProcessingError::Decode { field, .. } | ProcessingError::Config { field, .. } => field,
        }
    }
}

/// Result type for batch processing.
pub type ProcessingResult<T> = Result<T, ProcessingError>;
