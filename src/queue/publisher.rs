//! Line Publisher for feeding an AsyncWriter
//!
//! Publishers are cheap, cloneable producer handles. Each submit is a single
//! non-blocking push; a full queue hands the line back as
//! [`PushError::Full`](crate::queue::PushError::Full) and counts a rejection.

use crate::queue::error::{PushResult, QueueError, QueueResult};
use crate::queue::writer::{Entry, WriterShared};
use crate::sync::{CountingSemaphore, WaitOutcome};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Producer handle for an [`AsyncWriter`](crate::queue::AsyncWriter)
///
/// Handles stay valid after the writer shuts down; submits then fail with
/// [`PushError::Closed`](crate::queue::PushError::Closed).
#[derive(Debug, Clone)]
pub struct LinePublisher {
    shared: Arc<WriterShared>,
}

impl LinePublisher {
    pub(crate) fn new(shared: Arc<WriterShared>) -> Self {
        Self { shared }
    }

    /// Queue one line for writing
    ///
    /// A rejected line is returned inside the error so it can be resubmitted.
    pub fn submit(&self, line: impl Into<String>) -> PushResult<String> {
        match self.shared.queue.push(Entry::Line(line.into())) {
            Ok(()) => {
                self.shared.counters.accepted.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(rejected) => {
                if rejected.is_full() {
                    self.shared.counters.rejected.fetch_add(1, Ordering::AcqRel);
                    log::trace!("Rejected line: {}", rejected);
                }
                Err(rejected.map(Entry::into_line))
            }
        }
    }

    /// Ask the writer thread to flush and wait up to `timeout` for it
    ///
    /// Lines accepted before this call are written before the flush. Each
    /// request waits on its own confirmation, so an earlier request that
    /// timed out cannot satisfy this one.
    ///
    /// # Errors
    /// * [`QueueError::Full`] if the flush request itself cannot be queued
    /// * [`QueueError::Closed`] if the writer has shut down
    /// * [`QueueError::Timeout`] if the flush is not confirmed in time
    pub fn flush(&self, timeout: Duration) -> QueueResult<()> {
        let confirmed = Arc::new(CountingSemaphore::new(0));
        self.shared.queue.push(Entry::Flush(Arc::clone(&confirmed)))?;
        match confirmed.wait_timeout(timeout) {
            WaitOutcome::Woken => Ok(()),
            WaitOutcome::TimedOut => Err(QueueError::Timeout { timeout }),
        }
    }

    /// Whether the writer has stopped accepting lines
    pub fn is_closed(&self) -> bool {
        self.shared.queue.is_closed()
    }
}
