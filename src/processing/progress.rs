//! Progress notifications for batch runs.
//!
//! The host passes a sink into the batch call; the batch reports once when
//! it starts and once when it completes successfully.

/// Position of a notification within the batch stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub stage: u32,
    pub total_stages: u32,
}

impl Stage {
    pub fn new(stage: u32, total_stages: u32) -> Self {
        Self {
            stage,
            total_stages,
        }
    }
}

/// Receiver of batch progress notifications.
pub trait ProgressSink {
    /// Report progress with an optional stage position.
    fn log_progress(&mut self, message: &str, stage: Option<Stage>);
}

/// Forwards progress to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn log_progress(&mut self, message: &str, stage: Option<Stage>) {
        match stage {
            Some(stage) => {
                tracing::info!("[{}/{}] {}", stage.stage, stage.total_stages, message)
            }
            None => tracing::info!("{}", message),
        }
    }
}

/// Discards progress notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn log_progress(&mut self, _message: &str, _stage: Option<Stage>) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&str, Option<Stage>),
{
    fn log_progress(&mut self, message: &str, stage: Option<Stage>) {
        self(message, stage)
    }
}
