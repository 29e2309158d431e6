//! Flywheel log decoding.
//!
//! Turns the hex-encoded `FlyWheelLog` of a test bout into clock ticks and
//! attaches the per-attempt metadata needed by the kinematics stage.

pub mod builder;
pub mod tick;
pub mod types;

pub use builder::{build_attempt, magnets_from_sampling, DecodedAttempt};
pub use tick::{decode_tick, split_ticks, TICK_HEX_LEN};
pub use types::{AttemptMeta, ConfigError, DecodeError, RawAttemptRecord, TimerTick};
