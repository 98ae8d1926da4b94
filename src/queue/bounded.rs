//! Bounded blocking FIFO queue
//!
//! The hand-off buffer between any number of producer threads and a consumer.
//! Enqueue never blocks: a full queue hands the item back so the producer can
//! decide whether to drop, retry or escalate. Dequeue blocks on a condition
//! variable until an item arrives, the queue is closed, or a deadline measured
//! from the call start on the monotonic clock passes.

use crate::queue::error::{PushError, PushResult, QueueError, QueueResult};
use crate::queue::ring::RingBuffer;
use crate::sync::{ConditionVariable, Mutex};
use std::time::{Duration, Instant};

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1000;

/// Everything guarded by the queue lock
#[derive(Debug)]
struct QueueState<T> {
    ring: RingBuffer<T>,
    closed: bool,
}

/// Thread-safe fixed-capacity FIFO with timed blocking dequeue
///
/// Every operation is one critical section on the internal lock. The only
/// place the lock is given up mid-operation is the condition variable wait
/// inside [`pop`](Self::pop), which re-acquires it before re-checking.
///
/// Items are delivered exactly once. With a single consumer they come out in
/// the order they were accepted.
///
/// # Example
///
/// ```
/// use blockqueue::queue::{BoundedBlockingQueue, PushError};
/// use std::time::Duration;
///
/// let queue = BoundedBlockingQueue::new(2).unwrap();
/// queue.push("a").unwrap();
/// queue.push("b").unwrap();
/// let rejected = queue.push("c").unwrap_err();
/// assert!(matches!(rejected, PushError::Full { capacity: 2, .. }));
///
/// assert_eq!(queue.pop(Duration::ZERO).unwrap(), "a");
/// queue.push(rejected.into_inner()).unwrap();
/// assert_eq!(queue.back(), Some("c"));
/// ```
#[derive(Debug)]
pub struct BoundedBlockingQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: ConditionVariable,
    capacity: usize,
}

impl<T> BoundedBlockingQueue<T> {
    /// Create an empty queue holding at most `capacity` items
    ///
    /// # Errors
    /// * [`QueueError::InvalidCapacity`] if `capacity` is 0
    /// * [`QueueError::ResourceInit`] if the backing storage cannot be allocated
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity { capacity: 0 });
        }
        let ring = RingBuffer::new(capacity).map_err(|e| QueueError::ResourceInit {
            message: format!("cannot reserve storage for {} items: {}", capacity, e),
        })?;

        log::debug!("Created bounded blocking queue (capacity: {})", capacity);

        Ok(Self {
            state: Mutex::new(QueueState {
                ring,
                closed: false,
            }),
            not_empty: ConditionVariable::new(),
            capacity,
        })
    }

    /// Create an empty queue with [`DEFAULT_CAPACITY`]
    pub fn with_default_capacity() -> QueueResult<Self> {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Enqueue `item` at the back without blocking
    ///
    /// Wakes every blocked consumer on success.
    ///
    /// # Errors
    /// The item comes back inside the error and the queue is unchanged:
    /// * [`PushError::Full`] if the queue holds `capacity` items
    /// * [`PushError::Closed`] after [`close`](Self::close)
    pub fn push(&self, item: T) -> PushResult<T> {
        let mut state = self.state.acquire();
        if state.closed {
            return Err(PushError::Closed { item });
        }
        if let Err(item) = state.ring.push_back(item) {
            return Err(PushError::Full {
                capacity: self.capacity,
                item,
            });
        }
        self.not_empty.broadcast();
        Ok(())
    }

    /// Dequeue the front item, waiting up to `timeout` for one to arrive
    ///
    /// A zero timeout polls. Items accepted before [`close`](Self::close) are
    /// still handed out after it.
    ///
    /// # Errors
    /// * [`QueueError::Timeout`] if the queue stayed empty for the whole window
    /// * [`QueueError::Closed`] if the queue is closed and empty
    pub fn pop(&self, timeout: Duration) -> QueueResult<T> {
        // No representable deadline means the caller is willing to wait forever
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.acquire();

        loop {
            if let Some(item) = state.ring.pop_front() {
                return Ok(item);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }

            match deadline {
                Some(deadline) => {
                    let (guard, outcome) = self.not_empty.wait_until(state, deadline);
                    state = guard;
                    if outcome.is_timed_out() && state.ring.is_empty() && !state.closed {
                        log::trace!("pop timed out after {:?}", timeout);
                        return Err(QueueError::Timeout { timeout });
                    }
                }
                None => state = self.not_empty.wait(state),
            }
        }
    }

    /// [`pop`](Self::pop) with the timeout given in milliseconds
    pub fn pop_millis(&self, timeout_ms: u64) -> QueueResult<T> {
        self.pop(Duration::from_millis(timeout_ms))
    }

    /// Number of items currently queued
    pub fn len(&self) -> usize {
        self.state.acquire().ring.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.state.acquire().ring.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.state.acquire().ring.is_full()
    }

    /// Drop every queued item without blocking
    pub fn clear(&self) {
        self.state.acquire().ring.clear();
    }

    /// Stop accepting items and wake every blocked consumer
    ///
    /// Idempotent. Consumers drain what is left and then get
    /// [`QueueError::Closed`].
    pub fn close(&self) {
        let mut state = self.state.acquire();
        if !state.closed {
            state.closed = true;
            log::debug!(
                "Closed bounded blocking queue with {} item(s) pending",
                state.ring.len()
            );
        }
        self.not_empty.broadcast();
    }

    pub fn is_closed(&self) -> bool {
        self.state.acquire().closed
    }
}

impl<T: Clone> BoundedBlockingQueue<T> {
    /// Copy of the item that the next [`pop`](Self::pop) would return
    pub fn front(&self) -> Option<T> {
        self.state.acquire().ring.front().cloned()
    }

    /// Copy of the most recently accepted item
    pub fn back(&self) -> Option<T> {
        self.state.acquire().ring.back().cloned()
    }
}
