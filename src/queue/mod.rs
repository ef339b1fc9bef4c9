//! Hand-off Queue Component
//!
//! An unbounded, thread-safe FIFO used to pass [`Message`]s between two
//! execution units. The pipeline owns two of them: the input queue between
//! the generator and the orchestrator, and the output queue between the
//! orchestrator and the consumer.
//!
//! ```text
//!  Generator ──put──▶ [ input queue ] ──take──▶ Orchestrator
//!                                                   │ put
//!                                                   ▼
//!                     Consumer ◀──take/drain_all── [ output queue ]
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use drainpipe::core::shutdown::CancellationSignal;
//! use drainpipe::queue::{HandoffQueue, Message, QueueError};
//!
//! # async fn example() -> Result<(), QueueError> {
//! let queue = HandoffQueue::new("output");
//! let cancel = CancellationSignal::new();
//!
//! queue.put(Message::from("Transformed 0"))?;
//! queue.put(Message::from("Transformed 1"))?;
//!
//! let first = queue.take(&cancel).await?;
//! assert_eq!(first.data(), "Transformed 0");
//!
//! cancel.cancel();
//! assert!(queue.take(&cancel).await.unwrap_err().is_interrupted());
//! assert_eq!(queue.drain_all()?, vec![Message::from("Transformed 1")]);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod error;
mod handoff;
mod message;

pub use error::{QueueError, QueueResult};
pub use handoff::HandoffQueue;
pub use message::Message;

#[cfg(test)]
mod tests;
