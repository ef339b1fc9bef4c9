//! Public API for the queue system
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::queue::error::{QueueError, QueueResult};
pub use crate::queue::handoff::HandoffQueue;
pub use crate::queue::message::Message;
