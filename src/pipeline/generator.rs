//! Generator - endless producer feeding the input queue
//!
//! The generator has no stop protocol. It is spawned as a detached task and
//! keeps producing until the runtime that owns it is torn down.

use crate::pipeline::traits::MessageSource;
use crate::queue::HandoffQueue;
use std::sync::Arc;
use std::time::Duration;

/// Puts one message from its source every `interval`
pub struct Generator<S: MessageSource> {
    source: S,
    queue: Arc<HandoffQueue>,
    interval: Duration,
}

impl<S: MessageSource> Generator<S> {
    pub fn new(source: S, queue: Arc<HandoffQueue>, interval: Duration) -> Self {
        Self {
            source,
            queue,
            interval,
        }
    }

    /// Produce until the task is dropped
    ///
    /// Each cycle puts the next message and then sleeps. Returns only if the
    /// queue itself fails, which leaves nothing further to do.
    pub async fn run(mut self) {
        loop {
            let message = self.source.next_message();
            log::info!("Generated message: \"{}\"", message);

            if let Err(e) = self.queue.put(message) {
                log::error!(
                    "generator stopping: put to '{}' failed: {}",
                    self.queue.queue_id(),
                    e
                );
                return;
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Start a generator as a detached task
///
/// No handle is returned: nobody joins or cancels the generator.
pub fn spawn_generator<S>(source: S, queue: Arc<HandoffQueue>, interval: Duration)
where
    S: MessageSource + 'static,
{
    log::debug!(
        "starting generator on '{}' every {:?}",
        queue.queue_id(),
        interval
    );
    tokio::spawn(Generator::new(source, queue, interval).run());
}
