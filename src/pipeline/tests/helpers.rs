//! Shared test doubles

use crate::pipeline::api::{MessageSink, MessageSource, PipelineError, PipelineResult};
use crate::queue::{HandoffQueue, Message};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

/// Sink that fails on a given payload and records everything else
#[derive(Debug)]
pub struct FailingSink {
    pub fail_on: String,
    pub inner: crate::pipeline::api::MemorySink,
}

impl FailingSink {
    pub fn new(fail_on: &str) -> Self {
        Self {
            fail_on: fail_on.to_string(),
            inner: crate::pipeline::api::MemorySink::new(),
        }
    }
}

#[async_trait]
impl MessageSink for FailingSink {
    async fn write(&self, message: &Message) -> PipelineResult<()> {
        if message.data() == self.fail_on {
            return Err(PipelineError::Sink {
                data: message.data().to_string(),
                message: "disk full".to_string(),
            });
        }
        self.inner.write(message).await
    }
}

/// Source that replays a fixed script and then repeats its last entry
pub struct ScriptedSource {
    script: VecDeque<String>,
    last: String,
}

impl ScriptedSource {
    pub fn new(script: &[&str]) -> Self {
        Self {
            script: script.iter().map(|s| s.to_string()).collect(),
            last: script.last().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

impl MessageSource for ScriptedSource {
    fn next_message(&mut self) -> Message {
        Message::new(self.script.pop_front().unwrap_or_else(|| self.last.clone()))
    }
}

pub fn fill(queue: &HandoffQueue, data: &[&str]) {
    for d in data {
        queue.put(Message::from(*d)).unwrap();
    }
}

/// Let every ready task run without advancing the paused clock
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

pub const SINK_DELAY: Duration = Duration::from_millis(500);

pub fn count(written: &[String], data: &str) -> usize {
    written.iter().filter(|w| w.as_str() == data).count()
}
