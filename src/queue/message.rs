//! Message payload passed between pipeline stages

use std::fmt;

/// Opaque text payload
///
/// Messages are immutable once produced and carry no identity beyond
/// their content: two messages are equal when their text is equal.
///
/// # Example
///
/// ```rust
/// use drainpipe::queue::Message;
///
/// let message = Message::from("5");
/// assert_eq!(message.data(), "5");
/// assert_eq!(message, Message::new("5".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    data: String,
}

impl Message {
    pub fn new(data: String) -> Self {
        Self { data }
    }

    /// The text payload
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Consume the message and return its payload
    pub fn into_data(self) -> String {
        self.data
    }
}

impl From<&str> for Message {
    fn from(data: &str) -> Self {
        Self::new(data.to_string())
    }
}

impl From<String> for Message {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
