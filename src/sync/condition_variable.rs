//! Condition variable bound to a [`Mutex`](super::Mutex)
//!
//! Every wait releases the caller's guard atomically and re-acquires it before
//! returning. A return from any wait does not imply the awaited predicate
//! holds: wakeups may be spurious, so callers re-check in a loop.

use super::mutex::MutexGuard;
use crate::core::sync::recover_poison;
use std::sync::Condvar;
use std::time::Instant;

/// Result of a deadline-bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Woken before the deadline (by a notification or spuriously)
    Woken,
    /// The deadline passed
    TimedOut,
}

impl WaitOutcome {
    pub fn is_timed_out(self) -> bool {
        self == WaitOutcome::TimedOut
    }
}

/// Blocking wait/notify coordination
///
/// A condition variable must always be used with the same mutex.
#[derive(Debug, Default)]
pub struct ConditionVariable {
    inner: Condvar,
}

impl ConditionVariable {
    pub fn new() -> Self {
        Self {
            inner: Condvar::new(),
        }
    }

    /// Release `guard`, block until woken, then re-acquire the lock
    pub fn wait<'a, T>(&self, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        MutexGuard {
            inner: recover_poison(self.inner.wait(guard.inner), "condition variable wait"),
        }
    }

    /// Like [`wait`](Self::wait), but also returns once `deadline` passes
    ///
    /// The outcome is judged against the monotonic clock after the lock is
    /// re-acquired, so `TimedOut` is never reported before `deadline`. A
    /// deadline already in the past returns `TimedOut` without blocking.
    pub fn wait_until<'a, T>(
        &self,
        guard: MutexGuard<'a, T>,
        deadline: Instant,
    ) -> (MutexGuard<'a, T>, WaitOutcome) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return (guard, WaitOutcome::TimedOut);
        }

        let (inner, _) = recover_poison(
            self.inner.wait_timeout(guard.inner, remaining),
            "condition variable timed wait",
        );
        let outcome = if Instant::now() >= deadline {
            WaitOutcome::TimedOut
        } else {
            WaitOutcome::Woken
        };
        (MutexGuard { inner }, outcome)
    }

    /// Block while `condition` holds, re-checking it after every wakeup
    pub fn wait_while<'a, T, F>(
        &self,
        mut guard: MutexGuard<'a, T>,
        mut condition: F,
    ) -> MutexGuard<'a, T>
    where
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut *guard) {
            guard = self.wait(guard);
        }
        guard
    }

    /// Wake at least one waiting thread
    pub fn signal(&self) {
        self.inner.notify_one();
    }

    /// Wake all waiting threads
    pub fn broadcast(&self) {
        self.inner.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Mutex;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_until_past_deadline_returns_immediately() {
        let mutex = Mutex::new(());
        let condvar = ConditionVariable::new();

        let start = Instant::now();
        let (_guard, outcome) = condvar.wait_until(mutex.acquire(), start);
        assert_eq!(outcome, WaitOutcome::TimedOut);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_wait_until_times_out_no_earlier_than_deadline() {
        let mutex = Mutex::new(());
        let condvar = ConditionVariable::new();

        let deadline = Instant::now() + Duration::from_millis(20);
        let mut guard = mutex.acquire();
        loop {
            let (next, outcome) = condvar.wait_until(guard, deadline);
            guard = next;
            if outcome.is_timed_out() {
                break;
            }
        }
        assert!(Instant::now() >= deadline);
    }

    #[test]
    fn test_signal_wakes_waiter() {
        let state = Arc::new((Mutex::new(false), ConditionVariable::new()));
        let waiter_state = Arc::clone(&state);

        let waiter = thread::spawn(move || {
            let (mutex, condvar) = &*waiter_state;
            let guard = condvar.wait_while(mutex.acquire(), |ready| !*ready);
            *guard
        });

        thread::sleep(Duration::from_millis(10));
        {
            let (mutex, condvar) = &*state;
            *mutex.acquire() = true;
            condvar.signal();
        }

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_broadcast_wakes_all_waiters() {
        let state = Arc::new((Mutex::new(false), ConditionVariable::new()));
        let mut waiters = Vec::new();

        for _ in 0..4 {
            let waiter_state = Arc::clone(&state);
            waiters.push(thread::spawn(move || {
                let (mutex, condvar) = &*waiter_state;
                let deadline = Instant::now() + Duration::from_secs(5);
                let mut guard = mutex.acquire();
                while !*guard {
                    let (next, outcome) = condvar.wait_until(guard, deadline);
                    guard = next;
                    if outcome.is_timed_out() {
                        break;
                    }
                }
                *guard
            }));
        }

        thread::sleep(Duration::from_millis(10));
        {
            let (mutex, condvar) = &*state;
            *mutex.acquire() = true;
            condvar.broadcast();
        }

        for waiter in waiters {
            assert!(waiter.join().unwrap(), "every waiter should observe the flag");
        }
    }

    #[test]
    fn test_notify_without_waiters_is_noop() {
        let condvar = ConditionVariable::new();
        condvar.signal();
        condvar.broadcast();
    }
}
