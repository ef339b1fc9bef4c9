//! Public API for the pipeline
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::pipeline::collaborators::{
    CounterSource, MemorySink, PrefixTransform, SentinelExit, StdoutSink,
};
pub use crate::pipeline::consumer::{spawn_consumer, ConsumerHandle};
pub use crate::pipeline::error::{PipelineError, PipelineResult};
pub use crate::pipeline::generator::{spawn_generator, Generator};
pub use crate::pipeline::orchestrator::Orchestrator;
pub use crate::pipeline::runner::Pipeline;
pub use crate::pipeline::settings::{PipelineSettings, DEFAULT_LATE_MESSAGES};
pub use crate::pipeline::traits::{ExitCondition, MessageSink, MessageSource, Transform};
pub use crate::pipeline::types::{
    ConsumerReport, ConsumerState, OrchestratorReport, PipelineReport, StopReason,
};
