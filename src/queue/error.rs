//! Queue Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// A blocked `take` was woken by cancellation instead of a message
    #[error("Take on queue '{queue_id}' interrupted by cancellation")]
    Interrupted { queue_id: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },
}

impl QueueError {
    /// True for the cancellation-delivery condition
    pub fn is_interrupted(&self) -> bool {
        matches!(self, QueueError::Interrupted { .. })
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
