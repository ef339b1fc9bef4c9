//! Lock poisoning helpers
//!
//! A poisoned lock means some task panicked while holding it. The queue and
//! the consumer state are still structurally valid in that case, but callers
//! are told about it through their own error type instead of a panic.

use std::sync::LockResult;

/// Map a poisoned lock result into an application error
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use drainpipe::core::sync::handle_mutex_poison;
/// use drainpipe::queue::QueueError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(mutex.lock(), |message| QueueError::OperationFailed {
///     message,
/// })
/// .unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). A task panicked while holding the lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
