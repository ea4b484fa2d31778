//! Fixed-capacity ring buffer with FIFO eviction.

/// Fixed-capacity ring buffer.
///
/// Pushing into a full buffer overwrites the oldest element in O(1).
/// Iteration always runs oldest → newest.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    /// Index of the oldest element once the buffer has wrapped.
    start: usize,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. Capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            start: 0,
            capacity,
        }
    }

    /// Append a value, evicting and returning the oldest one when full.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
            return None;
        }
        let evicted = std::mem::replace(&mut self.slots[self.start], value);
        self.start = (self.start + 1) % self.capacity;
        Some(evicted)
    }

    /// Element `index` counted from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.slots.len() {
            return None;
        }
        Some(&self.slots[(self.start + index) % self.slots.len()])
    }

    pub fn oldest(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn newest(&self) -> Option<&T> {
        self.slots.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate oldest → newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        let len = self.slots.len();
        (0..len).map(move |i| &self.slots[(self.start + i) % len])
    }

    /// Mutable access in storage order (not chronological).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    /// Keep only elements matching the predicate, preserving chronological order.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.slots.rotate_left(self.start);
        self.start = 0;
        self.slots.retain(keep);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.start = 0;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
