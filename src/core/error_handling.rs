//! Fatal error reporting
//!
//! Errors that reach the top of the binary are logged once, with a level of
//! detail that depends on whether the user can do something about them.

/// Errors that know whether they are user-actionable
///
/// When `is_user_actionable()` returns `true`, `user_message()` returns
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True for errors with a message the user can act on directly
    /// (bad configuration values, missing config file).
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error
///
/// User-actionable errors are logged with their own message. System errors
/// are logged with `operation_context` only; the error itself goes to debug.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
