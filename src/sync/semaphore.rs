//! Counting semaphore
//!
//! Built from a [`Mutex`] protecting the count and a [`ConditionVariable`]
//! that blocked waiters sleep on. A semaphore created with zero permits
//! doubles as an event signal: one thread waits, another posts.

use super::condition_variable::{ConditionVariable, WaitOutcome};
use super::mutex::Mutex;
use std::time::{Duration, Instant};

/// Counting resource gate holding a non-negative permit count
#[derive(Debug, Default)]
pub struct CountingSemaphore {
    count: Mutex<usize>,
    available: ConditionVariable,
}

impl CountingSemaphore {
    /// Create a semaphore holding `permits` initial permits
    pub fn new(permits: usize) -> Self {
        Self {
            count: Mutex::new(permits),
            available: ConditionVariable::new(),
        }
    }

    /// Block while no permit is available, then take one
    pub fn wait(&self) {
        let mut count = self.available.wait_while(self.count.acquire(), |count| *count == 0);
        *count -= 1;
    }

    /// Take a permit if one is available, without blocking
    pub fn try_wait(&self) -> bool {
        let mut count = self.count.acquire();
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Like [`wait`](Self::wait), giving up once `timeout` has elapsed
    pub fn wait_timeout(&self, timeout: Duration) -> WaitOutcome {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait();
            return WaitOutcome::Woken;
        };

        let mut count = self.count.acquire();
        while *count == 0 {
            let (guard, outcome) = self.available.wait_until(count, deadline);
            count = guard;
            if outcome.is_timed_out() && *count == 0 {
                return WaitOutcome::TimedOut;
            }
        }
        *count -= 1;
        WaitOutcome::Woken
    }

    /// Return a permit and wake one blocked waiter, if any
    pub fn post(&self) {
        let mut count = self.count.acquire();
        *count = count.saturating_add(1);
        count.release();
        self.available.signal();
    }

    /// Snapshot of the available permits
    pub fn count(&self) -> usize {
        *self.count.acquire()
    }
}
