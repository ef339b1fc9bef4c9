//! Tunables for a pipeline run

use crate::pipeline::collaborators::{PrefixTransform, SentinelExit};
use crate::pipeline::error::{PipelineError, PipelineResult};
use std::time::Duration;

/// Messages put to the output queue after cancellation in a default run
pub const DEFAULT_LATE_MESSAGES: [&str; 2] = ["Might be printed", "Probably won't be printed "];

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Pause between generated messages
    pub generator_interval: Duration,
    /// Simulated duration of one sink write
    pub sink_delay: Duration,
    /// Input message that ends the orchestrator loop
    pub sentinel: String,
    /// Prefix the reference transform adds
    pub transform_prefix: String,
    /// Best-effort messages put after cancellation, in order
    pub late_messages: Vec<String>,
    /// Pause between consecutive late puts
    pub late_put_gap: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            generator_interval: Duration::from_millis(250),
            sink_delay: Duration::from_millis(500),
            sentinel: SentinelExit::DEFAULT_SENTINEL.to_string(),
            transform_prefix: PrefixTransform::DEFAULT_PREFIX.to_string(),
            late_messages: DEFAULT_LATE_MESSAGES.iter().map(|m| m.to_string()).collect(),
            late_put_gap: Duration::from_millis(1),
        }
    }
}

impl PipelineSettings {
    /// Reject settings that would make a run meaningless
    ///
    /// An empty sentinel can never be produced by the counter source, and a
    /// zero generator interval would spin the generator without yielding to
    /// the timer.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.sentinel.is_empty() {
            return Err(PipelineError::Configuration {
                message: "sentinel must not be empty".to_string(),
            });
        }
        if self.generator_interval.is_zero() {
            return Err(PipelineError::Configuration {
                message: "generator interval must be greater than 0 ms".to_string(),
            });
        }
        Ok(())
    }
}
