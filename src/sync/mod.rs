//! Blocking synchronization primitives
//!
//! Thin, typed wrappers over the standard library primitives that give the
//! queue the three building blocks it is composed from:
//!
//! - [`Mutex`]: exclusive access to a value, released when its
//!   [`MutexGuard`] is dropped (or explicitly via [`MutexGuard::release`])
//! - [`ConditionVariable`]: wait/notify coordination tied to a held guard,
//!   with an absolute-deadline wait measured on the monotonic clock
//! - [`CountingSemaphore`]: a counting gate built from the two above
//!
//! None of the wrappers support re-entrant acquisition. Lock poisoning is
//! recovered (see [`crate::core::sync::recover_poison`]).

mod condition_variable;
mod mutex;
mod semaphore;

pub use condition_variable::{ConditionVariable, WaitOutcome};
pub use mutex::{Mutex, MutexGuard};
pub use semaphore::CountingSemaphore;
