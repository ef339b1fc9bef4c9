//! Pluggable collaborators of the pipeline
//!
//! The pipeline itself only moves messages and coordinates shutdown. What a
//! message becomes, when the run ends, where messages come from and where
//! they end up are supplied through these traits.

use crate::pipeline::error::PipelineResult;
use crate::queue::Message;
use async_trait::async_trait;

/// Pure message-to-message mapping applied by the orchestrator
///
/// Must not block. Any `Fn(&Message) -> Message` closure qualifies.
pub trait Transform: Send + Sync {
    fn apply(&self, message: &Message) -> Message;
}

/// Termination policy evaluated on every message the orchestrator takes
///
/// Any `Fn(&Message) -> bool` closure qualifies.
pub trait ExitCondition: Send + Sync {
    fn should_exit(&self, message: &Message) -> bool;
}

/// Supplies the generator with its next message
pub trait MessageSource: Send {
    fn next_message(&mut self) -> Message;
}

/// Externally observable output for one message
///
/// Called at most once per message, in queue order. May be slow. An error
/// is fatal to the consumer that called it.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn write(&self, message: &Message) -> PipelineResult<()>;
}

impl<F> Transform for F
where
    F: Fn(&Message) -> Message + Send + Sync,
{
    fn apply(&self, message: &Message) -> Message {
        self(message)
    }
}

impl<F> ExitCondition for F
where
    F: Fn(&Message) -> bool + Send + Sync,
{
    fn should_exit(&self, message: &Message) -> bool {
        self(message)
    }
}

#[async_trait]
impl<S: MessageSink + ?Sized> MessageSink for std::sync::Arc<S> {
    async fn write(&self, message: &Message) -> PipelineResult<()> {
        (**self).write(message).await
    }
}
