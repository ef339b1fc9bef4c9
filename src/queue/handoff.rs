//! Unbounded FIFO hand-off queue with cancellable take
//!
//! The queue is the only synchronisation point between two execution units:
//! - `put` appends and never waits
//! - `take` waits for the head message, or fails with
//!   [`QueueError::Interrupted`] when the taker's cancellation signal fires
//! - `drain_all` removes every queued message in one locked step
//!
//! A message leaves the queue only when it is handed to a caller, so an
//! interrupted `take` never swallows a message that arrived at the same time.

use crate::core::shutdown::CancellationSignal;
use crate::core::sync::handle_mutex_poison;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::Message;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

/// Thread-safe unbounded FIFO of [`Message`]s
#[derive(Debug)]
pub struct HandoffQueue {
    queue_id: String,
    messages: Mutex<VecDeque<Message>>,
    available: Notify,
}

impl HandoffQueue {
    pub fn new(queue_id: impl Into<String>) -> Self {
        Self {
            queue_id: queue_id.into(),
            messages: Mutex::new(VecDeque::new()),
            available: Notify::new(),
        }
    }

    /// Get the queue identifier
    pub fn queue_id(&self) -> &str {
        &self.queue_id
    }

    /// Number of messages currently queued
    ///
    /// Reads through a poisoned lock: the count is still accurate, and the
    /// poisoning is reported by the next `put`, `take` or `drain_all`.
    pub fn len(&self) -> usize {
        match self.messages.lock() {
            Ok(messages) => messages.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a message to the tail
    pub fn put(&self, message: Message) -> QueueResult<()> {
        self.lock()?.push_back(message);
        self.available.notify_one();
        Ok(())
    }

    /// Remove and return the head message, waiting for one if necessary
    ///
    /// Fails with [`QueueError::Interrupted`] if `cancel` is already set on
    /// entry or becomes set while waiting. Queued messages are left in place
    /// in that case.
    pub async fn take(&self, cancel: &CancellationSignal) -> QueueResult<Message> {
        loop {
            // Register interest before looking at the queue so a put between
            // the check and the wait still wakes us.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if cancel.is_cancelled() {
                return Err(self.interrupted());
            }
            if let Some(message) = self.lock()?.pop_front() {
                return Ok(message);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.interrupted()),
                _ = &mut notified => {}
            }
        }
    }

    /// Remove the head message without waiting
    pub fn try_take(&self) -> QueueResult<Option<Message>> {
        Ok(self.lock()?.pop_front())
    }

    /// Atomically remove every queued message, oldest first
    ///
    /// Messages put after the snapshot stay in the queue.
    pub fn drain_all(&self) -> QueueResult<Vec<Message>> {
        Ok(self.lock()?.drain(..).collect())
    }

    fn lock(&self) -> QueueResult<MutexGuard<'_, VecDeque<Message>>> {
        handle_mutex_poison(self.messages.lock(), |message| {
            QueueError::OperationFailed { message }
        })
    }

    fn interrupted(&self) -> QueueError {
        QueueError::Interrupted {
            queue_id: self.queue_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn poison(queue: &Arc<HandoffQueue>) {
        let queue = queue.clone();
        let result = std::thread::spawn(move || {
            let _guard = queue.messages.lock().unwrap();
            panic!("poisoning the queue lock");
        })
        .join();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_poisoned_queue_reports_real_length_and_fails_operations() {
        let queue = Arc::new(HandoffQueue::new("output"));
        queue.put(Message::from("a")).unwrap();
        queue.put(Message::from("b")).unwrap();
        poison(&queue);

        assert_eq!(queue.len(), 2);
        assert!(!queue.is_empty());

        assert!(matches!(
            queue.put(Message::from("c")),
            Err(QueueError::OperationFailed { .. })
        ));
        assert!(matches!(
            queue.take(&CancellationSignal::new()).await,
            Err(QueueError::OperationFailed { .. })
        ));
        assert!(matches!(
            queue.drain_all(),
            Err(QueueError::OperationFailed { .. })
        ));
        assert_eq!(queue.len(), 2);
    }
}
