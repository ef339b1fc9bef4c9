//! Consumer - sinks output messages and drains on cancellation
//!
//! The consumer takes one message at a time from the output queue and hands
//! it to the sink. Once cancellation is observed, either before a take or by
//! an interrupted take, it snapshots the queue with a single `drain_all`,
//! sinks every snapshotted message in order and terminates. Nothing put after
//! the snapshot is sunk.

use crate::core::shutdown::CancellationSignal;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::traits::MessageSink;
use crate::pipeline::types::{ConsumerReport, ConsumerState};
use crate::queue::{HandoffQueue, Message, QueueError};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Shared, lock-free view of the consumer's lifecycle state
#[derive(Debug)]
struct StateCell(AtomicU8);

impl StateCell {
    fn new() -> Self {
        Self(AtomicU8::new(ConsumerState::Running.as_u8()))
    }

    fn get(&self) -> ConsumerState {
        ConsumerState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: ConsumerState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

/// The consumer's own task body
struct Consumer<S: MessageSink> {
    queue: Arc<HandoffQueue>,
    sink: S,
    cancel: CancellationSignal,
    state: Arc<StateCell>,
}

impl<S: MessageSink> Consumer<S> {
    async fn run(self) -> PipelineResult<ConsumerReport> {
        let result = self.consume().await;
        self.state.set(ConsumerState::Terminated);

        match &result {
            Ok(_) => log::info!("----- consumer done -----"),
            Err(e) => log::error!("consumer stopped: {}", e),
        }
        result
    }

    async fn consume(&self) -> PipelineResult<ConsumerReport> {
        let mut report = ConsumerReport::default();

        loop {
            if self.cancel.is_cancelled() {
                log::debug!("cancellation already pending; skipping take");
                break;
            }

            match self.queue.take(&self.cancel).await {
                Ok(message) => {
                    self.sink.write(&message).await?;
                    report.taken += 1;
                }
                Err(QueueError::Interrupted { .. }) => {
                    log::debug!("take interrupted by cancellation");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        // The signal is left set: any later check still sees the request.
        self.state.set(ConsumerState::Draining);
        report.drained = self.drain().await?;
        Ok(report)
    }

    async fn drain(&self) -> PipelineResult<usize> {
        let remaining = self.queue.drain_all()?;
        log::info!("----- output queue drained - new messages will be ignored -----");
        log::info!("----- remaining messages: {}", join_data(&remaining));

        for message in &remaining {
            self.sink.write(message).await?;
        }
        Ok(remaining.len())
    }
}

fn join_data(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::data)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Handle to a running consumer task
///
/// The handle is the only way to deliver cancellation to the consumer and
/// the only way to wait for it to terminate.
#[derive(Debug)]
pub struct ConsumerHandle {
    cancel: CancellationSignal,
    state: Arc<StateCell>,
    join: JoinHandle<PipelineResult<ConsumerReport>>,
}

impl ConsumerHandle {
    /// Ask the consumer to stop taking and drain
    ///
    /// Returns `true` for the request that actually took effect; repeated
    /// requests are ignored.
    pub fn cancel(&self) -> bool {
        let first = self.cancel.cancel();
        if first {
            log::debug!("cancellation requested for consumer");
        }
        first
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConsumerState {
        self.state.get()
    }

    /// Wait for the consumer to terminate
    ///
    /// Returns the sink error if a write failed, or
    /// [`PipelineError::TaskFailed`] if the task panicked.
    pub async fn join(self) -> PipelineResult<ConsumerReport> {
        self.join.await.map_err(|e| PipelineError::TaskFailed {
            task: "consumer".to_string(),
            message: e.to_string(),
        })?
    }
}

/// Start a consumer on `queue` writing to `sink`
pub fn spawn_consumer<S>(queue: Arc<HandoffQueue>, sink: S) -> ConsumerHandle
where
    S: MessageSink + 'static,
{
    let cancel = CancellationSignal::new();
    let state = Arc::new(StateCell::new());

    let consumer = Consumer {
        queue,
        sink,
        cancel: cancel.clone(),
        state: state.clone(),
    };
    let join = tokio::spawn(consumer.run());

    ConsumerHandle {
        cancel,
        state,
        join,
    }
}
