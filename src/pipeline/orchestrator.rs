//! Orchestrator - bridges input to output and decides when to stop
//!
//! The orchestrator is the only reader of the input queue and the only
//! writer of the output queue. It stops after the first message its exit
//! condition accepts (that message is still forwarded), or earlier if the
//! host asks for shutdown, and then issues exactly one cancellation to the
//! consumer. It never waits for or signals the generator.

use crate::core::shutdown::CancellationSignal;
use crate::pipeline::consumer::ConsumerHandle;
use crate::pipeline::error::PipelineResult;
use crate::pipeline::traits::{ExitCondition, Transform};
use crate::pipeline::types::{OrchestratorReport, StopReason};
use crate::queue::{HandoffQueue, Message, QueueError};
use std::sync::Arc;
use std::time::Duration;

pub struct Orchestrator<T: Transform, E: ExitCondition> {
    input: Arc<HandoffQueue>,
    output: Arc<HandoffQueue>,
    transform: T,
    exit_condition: E,
}

impl<T: Transform, E: ExitCondition> Orchestrator<T, E> {
    pub fn new(
        input: Arc<HandoffQueue>,
        output: Arc<HandoffQueue>,
        transform: T,
        exit_condition: E,
    ) -> Self {
        Self {
            input,
            output,
            transform,
            exit_condition,
        }
    }

    /// Forward messages until the exit condition holds, then cancel `consumer`
    ///
    /// `host_shutdown` only interrupts the wait on the input queue; a
    /// message already taken is always forwarded. If the generator stops
    /// early (its `put` failed), this waits on the empty input queue until
    /// `host_shutdown` fires.
    pub async fn run(
        &self,
        consumer: &ConsumerHandle,
        host_shutdown: &CancellationSignal,
    ) -> PipelineResult<OrchestratorReport> {
        let mut processed = 0;

        let stop_reason = loop {
            let message = match self.input.take(host_shutdown).await {
                Ok(message) => message,
                Err(QueueError::Interrupted { .. }) => {
                    log::warn!("host shutdown requested; stopping before exit condition");
                    break StopReason::HostShutdown;
                }
                Err(e) => return Err(e.into()),
            };

            let exit = self.exit_condition.should_exit(&message);
            self.output.put(self.transform.apply(&message))?;
            processed += 1;

            if exit {
                log::debug!("exit condition met by \"{}\"", message);
                break StopReason::ExitCondition;
            }
        };

        consumer.cancel();

        Ok(OrchestratorReport {
            processed,
            stop_reason,
        })
    }

    /// Best-effort puts after cancellation has been requested
    ///
    /// Whether any of these reach the sink depends on whether the consumer
    /// has already taken its drain snapshot. Returns the number of puts made.
    pub async fn put_after_cancellation(
        &self,
        messages: &[String],
        gap: Duration,
    ) -> PipelineResult<usize> {
        for (index, data) in messages.iter().enumerate() {
            if index > 0 && !gap.is_zero() {
                tokio::time::sleep(gap).await;
            }
            self.output.put(Message::new(data.clone()))?;
        }
        Ok(messages.len())
    }
}
