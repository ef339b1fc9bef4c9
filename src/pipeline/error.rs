//! Pipeline Error Types

use crate::core::error_handling::ContextualError;
use crate::queue::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// The sink could not perform its output; fatal for the consumer
    #[error("Sink failed for message '{data}': {message}")]
    Sink { data: String, message: String },

    /// A spawned execution unit panicked or was aborted
    #[error("Task '{task}' failed: {message}")]
    TaskFailed { task: String, message: String },

    /// `run` was called on a pipeline that has already started once
    #[error("Pipeline already started; its generator and consumer cannot be restarted")]
    AlreadyStarted,

    #[error("Invalid pipeline configuration: {message}")]
    Configuration { message: String },
}

impl ContextualError for PipelineError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, PipelineError::Configuration { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            PipelineError::Configuration { message } => Some(message),
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
