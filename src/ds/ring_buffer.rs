//! Fixed-capacity ring buffer with overwrite-oldest semantics.
//!
//! Stores the last `C` items pushed, silently overwriting the oldest entry
//! once full, and materializes them oldest-first. Building block for
//! per-device advertisement history where only the most recent M packets
//! are worth keeping.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                       RingBuffer<T> (capacity 4)                            │
//! │                                                                             │
//! │   slots: Vec<Option<T>>        head: next write position                    │
//! │   len: occupied slots          (wraps around when full)                     │
//! │                                                                             │
//! │   After pushing: 10, 20, 30, 40, 50                                         │
//! │                                                                             │
//! │   Index:     0     1     2     3                                            │
//! │            ┌─────┬─────┬─────┬─────┐                                        │
//! │   slots:   │ 50  │ 20  │ 30  │ 40  │                                        │
//! │            └─────┴─────┴─────┴─────┘                                        │
//! │              ▲                                                              │
//! │              │                                                              │
//! │           head = 1 (next write goes here; slot 1 is also the oldest)        │
//! │                                                                             │
//! │   Ordered Walk                                                              │
//! │   ────────────                                                              │
//! │                                                                             │
//! │   len < C:  oldest at slot 0, walk [0, len)                                 │
//! │   len == C: oldest at slot head, walk [head, head+C) mod C                  │
//! │                                                                             │
//! │   iter() = 20, 30, 40, 50   (oldest → newest)                               │
//! │                                                                             │
//! │   Push Flow                                                                 │
//! │   ─────────                                                                 │
//! │                                                                             │
//! │   push(60):                                                                 │
//! │     1. slots[head] = 60          → slots[1] = 60 (20 is gone)               │
//! │     2. head = (head + 1) % C     → head = 2                                 │
//! │     3. len stays at C (already full)                                        │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`RingBuffer`]: Fixed-capacity circular storage
//! - [`Iter`]: Borrowed iterator in oldest-first order
//! - [`IntoIter`]: Owning iterator in oldest-first order
//!
//! ## Operations
//!
//! | Operation           | Description                        | Complexity |
//! |---------------------|------------------------------------|------------|
//! | [`push`]            | Add item (overwrites oldest)       | O(1)       |
//! | [`oldest`]/[`latest`] | Peek logical ends                | O(1)       |
//! | [`iter`] / [`into_iter`] | Iterate oldest → newest       | O(C)       |
//! | [`to_vec`]          | Collect all into a Vec (oldest-first) | O(C)    |
//! | [`clear`]           | Reset to empty, drop contents      | O(C)       |
//!
//! [`push`]: RingBuffer::push
//! [`oldest`]: RingBuffer::oldest
//! [`latest`]: RingBuffer::latest
//! [`iter`]: RingBuffer::iter
//! [`into_iter`]: RingBuffer#impl-IntoIterator
//! [`to_vec`]: RingBuffer::to_vec
//! [`clear`]: RingBuffer::clear
//!
//! ## Example Usage
//!
//! ```
//! use scankit::ds::RingBuffer;
//!
//! // Keep the last 3 readings
//! let mut ring = RingBuffer::new(3);
//!
//! ring.push(1);
//! ring.push(2);
//! ring.push(3);
//! assert_eq!(ring.to_vec(), vec![1, 2, 3]);
//!
//! // Overwrites oldest when full
//! ring.push(4);
//! ring.push(5);
//! assert_eq!(ring.to_vec(), vec![3, 4, 5]);  // 1 and 2 are gone
//! ```
//!
//! ## Thread Safety
//!
//! `RingBuffer` is not thread-safe. It is embedded within device records and
//! protected by the owning store's single-writer discipline.
//!
//! ## Implementation Notes
//!
//! - Flat `Vec<Option<T>>` with modular indexing; no pointer aliasing
//! - Capacity is validated at construction and never changes afterwards
//! - Iteration is restartable and non-destructive
//! - `debug_validate_invariants()` available in debug/test builds

use crate::error::ConfigError;

/// Fixed-capacity circular buffer that overwrites its oldest entry when full.
///
/// `len` grows until it reaches capacity, after which every push replaces
/// the logically oldest item. Items are materialized oldest-first.
///
/// # Example
///
/// ```
/// use scankit::ds::RingBuffer;
///
/// let mut ring = RingBuffer::new(2);
/// ring.push("a");
/// ring.push("b");
/// assert!(ring.is_full());
///
/// ring.push("c");
/// assert_eq!(ring.to_vec(), vec!["b", "c"]);
/// assert_eq!(ring.oldest(), Some(&"b"));
/// assert_eq!(ring.latest(), Some(&"c"));
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let ring: RingBuffer<u8> = RingBuffer::new(8);
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.capacity(), 8);
    /// ```
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(ring) => ring,
            Err(err) => panic!("invalid ring buffer configuration: {err}"),
        }
    }

    /// Creates an empty ring with `capacity` slots.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero; a zero-capacity ring
    /// could never hold a record and is always a configuration mistake.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// assert!(RingBuffer::<u8>::try_new(4).is_ok());
    /// assert!(RingBuffer::<u8>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new(
                "ring buffer capacity must be greater than zero",
            ));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            head: 0,
            len: 0,
        })
    }

    /// Returns the fixed capacity (number of slots).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of items currently stored (<= capacity).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no items are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the next push will overwrite the oldest item.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Pushes an item, overwriting the oldest if the ring is full.
    ///
    /// Always O(1); never fails and never blocks. Overwrite is expected
    /// steady-state behavior, not an error.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(2);
    /// ring.push(10);
    /// ring.push(20);
    /// assert_eq!(ring.to_vec(), vec![10, 20]);
    ///
    /// // Overwrites oldest (10)
    /// ring.push(30);
    /// assert_eq!(ring.to_vec(), vec![20, 30]);
    /// ```
    pub fn push(&mut self, item: T) {
        let cap = self.capacity();
        self.slots[self.head] = Some(item);
        self.head = (self.head + 1) % cap;
        if self.len < cap {
            self.len += 1;
        }
    }

    /// Returns the logically oldest item, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(2);
    /// assert_eq!(ring.oldest(), None);
    ///
    /// ring.push(1);
    /// ring.push(2);
    /// ring.push(3);
    /// assert_eq!(ring.oldest(), Some(&2));
    /// ```
    pub fn oldest(&self) -> Option<&T> {
        self.logical(0)
    }

    /// Returns the most recently pushed item, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(3);
    /// ring.push(7);
    /// ring.push(8);
    /// assert_eq!(ring.latest(), Some(&8));
    /// ```
    pub fn latest(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.logical(self.len - 1)
    }

    /// Returns an iterator over stored items from oldest to newest.
    ///
    /// Does **not** consume or modify the ring; the walk is restartable.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(3);
    /// for v in [1, 2, 3, 4, 5] {
    ///     ring.push(v);
    /// }
    ///
    /// let items: Vec<_> = ring.iter().copied().collect();
    /// assert_eq!(items, vec![3, 4, 5]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { ring: self, pos: 0 }
    }

    /// Collects all stored items into a `Vec`, oldest first.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(4);
    /// ring.push("x");
    /// ring.push("y");
    /// assert_eq!(ring.to_vec(), vec!["x", "y"]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Clears the ring and resets head/length.
    ///
    /// Slot contents are dropped so resource-owning items are released
    /// immediately rather than lingering until overwritten.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(3);
    /// ring.push(1);
    /// ring.push(2);
    ///
    /// ring.clear();
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.oldest(), None);
    /// ```
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Maps a logical position (0 = oldest) to its slot, if occupied.
    fn logical(&self, pos: usize) -> Option<&T> {
        if pos >= self.len {
            return None;
        }
        let cap = self.capacity();
        // Once full, head is both the next write position and the oldest slot.
        let start = if self.len < cap { 0 } else { self.head };
        self.slots[(start + pos) % cap].as_ref()
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns a debug snapshot of stored items in oldest-first order.
    pub fn debug_snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.capacity() > 0);
        assert!(self.len <= self.capacity());
        assert!(self.head < self.capacity());

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(self.len, occupied);
        for pos in 0..self.len {
            assert!(self.logical(pos).is_some());
        }
    }
}

// ---------------------------------------------------------------------------
// Iterator types (names match the methods that produce them)
// ---------------------------------------------------------------------------

/// Borrowed iterator over a [`RingBuffer`], from oldest to newest.
///
/// Created by [`RingBuffer::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    pos: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.ring.logical(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator over a [`RingBuffer`], from oldest to newest.
///
/// Created by calling [`IntoIterator::into_iter`] on a `RingBuffer`.
#[derive(Debug)]
pub struct IntoIter<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the ring, returning an iterator over items oldest-first.
    ///
    /// # Example
    ///
    /// ```
    /// use scankit::ds::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(2);
    /// ring.push(1);
    /// ring.push(2);
    /// ring.push(3);
    ///
    /// let items: Vec<_> = ring.into_iter().collect();
    /// assert_eq!(items, vec![2, 3]);
    /// ```
    fn into_iter(mut self) -> Self::IntoIter {
        let cap = self.capacity();
        let start = if self.len < cap { 0 } else { self.head };
        let mut items = Vec::with_capacity(self.len);
        for pos in 0..self.len {
            if let Some(item) = self.slots[(start + pos) % cap].take() {
                items.push(item);
            }
        }
        IntoIter {
            items: items.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_capacity() {
        let err = RingBuffer::<u8>::try_new(0).unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn panicking_constructor_rejects_zero_capacity() {
        let _ = RingBuffer::<u8>::new(0);
    }

    #[test]
    fn fills_in_push_order_before_wrap() {
        let mut ring = RingBuffer::new(4);
        ring.push(1);
        ring.push(2);
        ring.push(3);

        assert_eq!(ring.len(), 3);
        assert!(!ring.is_full());
        assert_eq!(ring.to_vec(), vec![1, 2, 3]);
        assert_eq!(ring.oldest(), Some(&1));
        assert_eq!(ring.latest(), Some(&3));
    }

    #[test]
    fn wrap_overwrites_oldest() {
        let mut ring = RingBuffer::new(3);
        for v in 1..=5 {
            ring.push(v);
        }

        assert_eq!(ring.len(), 3);
        assert!(ring.is_full());
        assert_eq!(ring.to_vec(), vec![3, 4, 5]);
        assert_eq!(ring.oldest(), Some(&3));
        assert_eq!(ring.latest(), Some(&5));
    }

    #[test]
    fn capacity_one_keeps_only_latest() {
        let mut ring = RingBuffer::new(1);
        ring.push("a");
        ring.push("b");
        ring.push("c");

        assert_eq!(ring.len(), 1);
        assert_eq!(ring.to_vec(), vec!["c"]);
        assert_eq!(ring.oldest(), ring.latest());
    }

    #[test]
    fn empty_ring_returns_none() {
        let ring: RingBuffer<u8> = RingBuffer::new(4);
        assert!(ring.is_empty());
        assert_eq!(ring.oldest(), None);
        assert_eq!(ring.latest(), None);
        assert_eq!(ring.iter().count(), 0);
    }

    #[test]
    fn iter_is_restartable() {
        let mut ring = RingBuffer::new(3);
        ring.push(1);
        ring.push(2);

        let first: Vec<_> = ring.iter().copied().collect();
        let second: Vec<_> = ring.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(ring.len(), 2); // not consumed
    }

    #[test]
    fn iter_exact_size() {
        let mut ring = RingBuffer::new(3);
        ring.push(1);
        ring.push(2);

        let mut it = ring.iter();
        assert_eq!(it.len(), 2);
        it.next();
        assert_eq!(it.len(), 1);
        it.next();
        assert_eq!(it.len(), 0);
        assert!(it.next().is_none());
    }

    #[test]
    fn ref_into_iter_for_loop() {
        let mut ring = RingBuffer::new(4);
        ring.push(10);
        ring.push(20);

        let mut sum = 0;
        for v in &ring {
            sum += v;
        }
        assert_eq!(sum, 30);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn owned_into_iter_after_wrap() {
        let mut ring = RingBuffer::new(2);
        ring.push(1);
        ring.push(2);
        ring.push(3);

        let items: Vec<_> = ring.into_iter().collect();
        assert_eq!(items, vec![2, 3]);
    }

    #[test]
    fn clear_resets_to_fresh_state() {
        let mut ring = RingBuffer::new(3);
        for v in 1..=5 {
            ring.push(v);
        }
        ring.clear();

        assert!(ring.is_empty());
        assert_eq!(ring.iter().count(), 0);

        // Behaves identically to a freshly constructed ring afterwards
        ring.push(7);
        ring.push(8);
        assert_eq!(ring.to_vec(), vec![7, 8]);
        ring.debug_validate_invariants();
    }

    #[test]
    fn clear_drops_slot_contents() {
        use std::rc::Rc;

        let tracked = Rc::new(());
        let mut ring = RingBuffer::new(2);
        ring.push(Rc::clone(&tracked));
        ring.push(Rc::clone(&tracked));
        assert_eq!(Rc::strong_count(&tracked), 3);

        ring.clear();
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[test]
    fn debug_invariants_hold_across_wraps() {
        let mut ring = RingBuffer::new(3);
        for v in 0..10 {
            ring.push(v);
            ring.debug_validate_invariants();
        }
    }

    #[test]
    fn debug_snapshot_matches_to_vec() {
        let mut ring = RingBuffer::new(3);
        for v in 1..=4 {
            ring.push(v);
        }
        let snapshot: Vec<i32> = ring.debug_snapshot().into_iter().copied().collect();
        assert_eq!(snapshot, ring.to_vec());
    }
}
