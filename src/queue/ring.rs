//! Fixed-capacity circular storage
//!
//! All wraparound arithmetic lives in [`RingBuffer::slot`]. The buffer is not
//! synchronized; [`BoundedBlockingQueue`](super::BoundedBlockingQueue) only
//! touches it while holding its lock.

use std::collections::TryReserveError;

#[derive(Debug)]
pub(crate) struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    /// Slot of the logical first element, meaningful only when `len > 0`
    front: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Reserve storage for exactly `capacity` items
    ///
    /// `capacity` must be non-zero.
    pub(crate) fn new(capacity: usize) -> Result<Self, TryReserveError> {
        debug_assert!(capacity > 0);
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            front: 0,
            len: 0,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Physical slot index of the element `offset` positions after the front
    fn slot(&self, offset: usize) -> usize {
        (self.front + offset) % self.slots.len()
    }

    /// Append at the back; hands the item back when full
    pub(crate) fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let back = self.slot(self.len);
        self.slots[back] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the front element
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.front].take();
        self.front = self.slot(1);
        self.len -= 1;
        item
    }

    pub(crate) fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    pub(crate) fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.slot(self.len - 1)].as_ref()
    }

    /// Drop every element; indices restart at slot 0
    pub(crate) fn clear(&mut self) {
        self.front = 0;
        self.len = 0;
        for slot in self.slots.iter_mut() {
            slot.take();
        }
    }
}
