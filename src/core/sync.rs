//! Synchronization utilities for robust lock handling
//!
//! A panic while a lock is held poisons it. The primitives in
//! [`crate::sync`] keep their protected state consistent at every point where
//! caller code can panic, so a poisoned lock is recovered rather than turned
//! into an error that every queue operation would have to surface.

use std::sync::LockResult;

/// Recover the guard from a possibly poisoned lock result
///
/// # Arguments
/// * `result` - The result of a lock, wait or timed wait operation
/// * `context` - Human-readable name of the operation, used in the warning
///
/// # Returns
/// The guard (or guard tuple) whether or not the lock was poisoned
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use blockqueue::core::sync::recover_poison;
///
/// let mutex = Mutex::new(42);
/// let guard = recover_poison(mutex.lock(), "example lock");
/// assert_eq!(*guard, 42);
/// ```
pub fn recover_poison<G>(result: LockResult<G>, context: &str) -> G {
    result.unwrap_or_else(|poison_err| {
        log::warn!(
            "{}: lock poisoned by a panic in another thread, recovering guard",
            context
        );
        poison_err.into_inner()
    })
}
