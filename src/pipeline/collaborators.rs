//! Reference collaborators used by the binary

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::traits::{ExitCondition, MessageSink, MessageSource, Transform};
use crate::queue::Message;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Prepends a fixed prefix: `"3"` becomes `"Transformed 3"` by default
#[derive(Debug, Clone)]
pub struct PrefixTransform {
    prefix: String,
}

impl PrefixTransform {
    pub const DEFAULT_PREFIX: &'static str = "Transformed ";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for PrefixTransform {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl Transform for PrefixTransform {
    fn apply(&self, message: &Message) -> Message {
        Message::new(format!("{}{}", self.prefix, message.data()))
    }
}

/// Stops the run when a message equals the sentinel
#[derive(Debug, Clone)]
pub struct SentinelExit {
    sentinel: Message,
}

impl SentinelExit {
    pub const DEFAULT_SENTINEL: &'static str = "5";

    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: Message::new(sentinel.into()),
        }
    }

    pub fn sentinel(&self) -> &Message {
        &self.sentinel
    }
}

impl Default for SentinelExit {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SENTINEL)
    }
}

impl ExitCondition for SentinelExit {
    fn should_exit(&self, message: &Message) -> bool {
        *message == self.sentinel
    }
}

/// Produces `"0"`, `"1"`, `"2"`, ...
///
/// The counter is owned by the source; nothing else can advance it.
#[derive(Debug, Default)]
pub struct CounterSource {
    counter: u64,
}

impl CounterSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `first` instead of zero
    pub fn starting_at(first: u64) -> Self {
        Self { counter: first }
    }
}

impl MessageSource for CounterSource {
    fn next_message(&mut self) -> Message {
        let message = Message::new(self.counter.to_string());
        self.counter += 1;
        message
    }
}

/// Slow write to standard output
///
/// Sleeps for `delay` to stand in for a lengthy write, then prints
/// `Received Message: "<data>"`.
#[derive(Debug, Clone)]
pub struct StdoutSink {
    delay: Duration,
}

impl StdoutSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MessageSink for StdoutSink {
    async fn write(&self, message: &Message) -> PipelineResult<()> {
        tokio::time::sleep(self.delay).await;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "Received Message: \"{}\"", message)
            .and_then(|_| stdout.flush())
            .map_err(|e| PipelineError::Sink {
                data: message.data().to_string(),
                message: e.to_string(),
            })
    }
}

/// Records every written message in order
///
/// Useful for embedding the pipeline and for tests. An optional delay
/// simulates a slow sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    delay: Duration,
    written: Mutex<Vec<Message>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            written: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything written so far
    pub fn written(&self) -> Vec<Message> {
        self.written
            .lock()
            .map(|written| written.clone())
            .unwrap_or_default()
    }

    /// Written payloads as plain strings
    pub fn written_data(&self) -> Vec<String> {
        self.written()
            .into_iter()
            .map(Message::into_data)
            .collect()
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn write(&self, message: &Message) -> PipelineResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        crate::core::sync::handle_mutex_poison(self.written.lock(), |e| PipelineError::Sink {
            data: message.data().to_string(),
            message: e,
        })?
        .push(message.clone());
        Ok(())
    }
}
