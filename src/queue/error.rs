//! Queue Error Types

use crate::core::error_handling::ContextualError;
use std::fmt;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid queue capacity: {capacity} (must be greater than 0)")]
    InvalidCapacity { capacity: i64 },

    #[error("Failed to initialise queue resources: {message}")]
    ResourceInit { message: String },

    #[error("Queue is full (capacity: {capacity})")]
    Full { capacity: usize },

    #[error("Timed out after {timeout:?} waiting for an item")]
    Timeout { timeout: Duration },

    #[error("Queue is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, QueueError::InvalidCapacity { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::InvalidCapacity { .. } => Some("Queue capacity must be greater than 0"),
            _ => None,
        }
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// A rejected enqueue; the item is handed back to the producer
///
/// Converts into [`QueueError`] (dropping the item) so `?` still works where
/// the caller has no use for it.
pub enum PushError<T> {
    /// The queue already holds `capacity` items
    Full { capacity: usize, item: T },
    /// The queue was closed
    Closed { item: T },
}

impl<T> PushError<T> {
    /// Take back the item that was not enqueued
    pub fn into_inner(self) -> T {
        match self {
            PushError::Full { item, .. } | PushError::Closed { item } => item,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, PushError::Full { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PushError::Closed { .. })
    }

    /// Convert the carried item, keeping the rejection reason
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> PushError<U> {
        match self {
            PushError::Full { capacity, item } => PushError::Full {
                capacity,
                item: f(item),
            },
            PushError::Closed { item } => PushError::Closed { item: f(item) },
        }
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Full { capacity, .. } => f
                .debug_struct("Full")
                .field("capacity", capacity)
                .finish_non_exhaustive(),
            PushError::Closed { .. } => f.debug_struct("Closed").finish_non_exhaustive(),
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&QueueError::from_rejection(self), f)
    }
}

impl<T> std::error::Error for PushError<T> {}

impl<T> From<PushError<T>> for QueueError {
    fn from(err: PushError<T>) -> Self {
        QueueError::from_rejection(&err)
    }
}

impl QueueError {
    fn from_rejection<T>(err: &PushError<T>) -> Self {
        match err {
            PushError::Full { capacity, .. } => QueueError::Full {
                capacity: *capacity,
            },
            PushError::Closed { .. } => QueueError::Closed,
        }
    }
}

/// Result type for enqueue operations
pub type PushResult<T> = Result<(), PushError<T>>;
