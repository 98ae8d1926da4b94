//! Mutual-exclusion lock

use crate::core::sync::recover_poison;
use std::ops::{Deref, DerefMut};
use std::sync::TryLockError;

/// Exclusive-access lock guarding a value
///
/// Ownership is represented by the [`MutexGuard`] returned from
/// [`Mutex::acquire`], so only the owning thread can release it.
#[derive(Debug, Default)]
pub struct Mutex<T> {
    inner: std::sync::Mutex<T>,
}

/// Proof of exclusive ownership of a [`Mutex`]
///
/// The lock is released when the guard is dropped.
#[derive(Debug)]
pub struct MutexGuard<'a, T> {
    pub(super) inner: std::sync::MutexGuard<'a, T>,
}

impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: std::sync::Mutex::new(value),
        }
    }

    /// Block the calling thread until exclusive ownership is obtained
    pub fn acquire(&self) -> MutexGuard<'_, T> {
        MutexGuard {
            inner: recover_poison(self.inner.lock(), "mutex acquire"),
        }
    }

    /// Acquire the lock only if no other thread currently owns it
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, T>> {
        match self.inner.try_lock() {
            Ok(inner) => Some(MutexGuard { inner }),
            Err(TryLockError::Poisoned(poison_err)) => {
                log::warn!("mutex try_acquire: lock poisoned, recovering guard");
                Some(MutexGuard {
                    inner: poison_err.into_inner(),
                })
            }
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Access the value without locking; the borrow proves exclusivity
    pub fn get_mut(&mut self) -> &mut T {
        match self.inner.get_mut() {
            Ok(value) => value,
            Err(poison_err) => poison_err.into_inner(),
        }
    }

    pub fn into_inner(self) -> T {
        match self.inner.into_inner() {
            Ok(value) => value,
            Err(poison_err) => poison_err.into_inner(),
        }
    }
}

impl<T> MutexGuard<'_, T> {
    /// Relinquish ownership
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
