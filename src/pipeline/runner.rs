//! Pipeline wiring
//!
//! Owns both queues, starts the generator (detached) and the consumer,
//! drives the orchestrator, and waits for the consumer, and only the
//! consumer, before returning. A pipeline runs at most once: its generator
//! would otherwise keep feeding the same input queue into the next run.

use crate::core::error_handling::log_error_with_context;
use crate::core::shutdown::CancellationSignal;
use crate::pipeline::collaborators::{CounterSource, PrefixTransform, SentinelExit};
use crate::pipeline::consumer::spawn_consumer;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::generator::spawn_generator;
use crate::pipeline::orchestrator::Orchestrator;
use crate::pipeline::settings::PipelineSettings;
use crate::pipeline::traits::{ExitCondition, MessageSink, MessageSource, Transform};
use crate::pipeline::types::PipelineReport;
use crate::queue::HandoffQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Pipeline {
    settings: PipelineSettings,
    input: Arc<HandoffQueue>,
    output: Arc<HandoffQueue>,
    started: AtomicBool,
}

impl Pipeline {
    /// Create the pipeline and its two queues
    pub fn new(settings: PipelineSettings) -> PipelineResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            input: Arc::new(HandoffQueue::new("input")),
            output: Arc::new(HandoffQueue::new("output")),
            started: AtomicBool::new(false),
        })
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn input_queue(&self) -> &Arc<HandoffQueue> {
        &self.input
    }

    pub fn output_queue(&self) -> &Arc<HandoffQueue> {
        &self.output
    }

    /// Run with the reference counter source, prefix transform and sentinel
    pub async fn run<K>(
        &self,
        sink: K,
        host_shutdown: &CancellationSignal,
    ) -> PipelineResult<PipelineReport>
    where
        K: MessageSink + 'static,
    {
        self.run_with(
            CounterSource::new(),
            PrefixTransform::new(self.settings.transform_prefix.clone()),
            SentinelExit::new(self.settings.sentinel.clone()),
            sink,
            host_shutdown,
        )
        .await
    }

    /// Run one complete cycle with caller-supplied collaborators
    ///
    /// Fails with [`PipelineError::AlreadyStarted`] on every call after the
    /// first; nothing is spawned in that case.
    pub async fn run_with<S, T, E, K>(
        &self,
        source: S,
        transform: T,
        exit_condition: E,
        sink: K,
        host_shutdown: &CancellationSignal,
    ) -> PipelineResult<PipelineReport>
    where
        S: MessageSource + 'static,
        T: Transform,
        E: ExitCondition,
        K: MessageSink + 'static,
    {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(PipelineError::AlreadyStarted);
        }

        spawn_generator(source, self.input.clone(), self.settings.generator_interval);
        let consumer = spawn_consumer(self.output.clone(), sink);

        let orchestrator = Orchestrator::new(
            self.input.clone(),
            self.output.clone(),
            transform,
            exit_condition,
        );

        let orchestrated = match orchestrator.run(&consumer, host_shutdown).await {
            Ok(report) => report,
            Err(e) => {
                // Still let the consumer flush what it already has.
                consumer.cancel();
                if let Err(consumer_error) = consumer.join().await {
                    log_error_with_context(&consumer_error, "Consumer failed while stopping");
                }
                return Err(e);
            }
        };

        let late_puts = orchestrator
            .put_after_cancellation(&self.settings.late_messages, self.settings.late_put_gap)
            .await;
        log::info!("----- main done -----");

        let consumed = consumer.join().await?;
        let late_puts = late_puts?;

        let report = PipelineReport {
            processed: orchestrated.processed,
            taken: consumed.taken,
            drained: consumed.drained,
            late_puts,
            stop_reason: orchestrated.stop_reason,
        };
        match serde_json::to_string(&report) {
            Ok(json) => log::debug!("run report: {}", json),
            Err(e) => log::debug!("run report not serialisable: {}", e),
        }
        Ok(report)
    }
}
