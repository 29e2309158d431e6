//! Storage module for input tables and configuration.

pub mod config;
pub mod input;

pub use config::{AppConfig, LoggingSettings, StorageError};
pub use input::{load_records, parse_records};
