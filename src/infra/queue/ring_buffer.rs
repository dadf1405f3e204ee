//! Fixed-capacity ring buffer backing each priority lane.

use crate::core::SchedulerError;

/// Bounded FIFO/LIFO storage with wraparound addressing.
///
/// The backing slots are allocated once at construction and never grow.
/// Logical offset `i` lives at physical slot `(start + i) % capacity`.
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    start: usize,
    size: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            start: 0,
            size: 0,
        }
    }

    /// Fixed capacity chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of items currently stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the buffer holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether another push would overflow.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Free slots left before overflow.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.size
    }

    fn physical(&self, offset: usize) -> usize {
        (self.start + offset) % self.capacity()
    }

    /// Append one item at the tail and return the new length.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Overflow`] when the buffer is full; the item is dropped
    /// and the buffer is left untouched.
    pub fn push(&mut self, item: T) -> Result<usize, SchedulerError> {
        self.push_many(std::iter::once(item))
    }

    /// Append all items in order, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Overflow`] if `len() + items.len()` exceeds the capacity.
    pub fn push_many<I>(&mut self, items: I) -> Result<usize, SchedulerError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let requested = self.size + items.len();
        if requested > self.capacity() {
            return Err(SchedulerError::Overflow {
                capacity: self.capacity(),
                requested,
            });
        }
        for item in items {
            let slot = self.physical(self.size);
            self.slots[slot] = Some(item);
            self.size += 1;
        }
        Ok(self.size)
    }

    /// Remove and return the head (oldest) item.
    pub fn shift(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let item = self.slots[self.start].take();
        self.start = (self.start + 1) % self.capacity();
        self.size -= 1;
        item
    }

    /// Remove and return the tail (newest) item.
    pub fn pop(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        let slot = self.physical(self.size);
        self.slots[slot].take()
    }

    /// Read the item at logical offset `index` from the head.
    ///
    /// Offsets outside the current length yield `None`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }
        self.slots[self.physical(index)].as_ref()
    }

    /// Iterate from head to tail without removing anything.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.size).filter_map(move |i| self.get(i))
    }

    /// Drop every stored item and rewind to slot zero.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.start = 0;
        self.size = 0;
    }
}

impl<T> std::fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("start", &self.start)
            .field("size", &self.size)
            .finish()
    }
}
