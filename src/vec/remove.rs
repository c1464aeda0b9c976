// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Removing elements. None of these touch the capacity.

// Crate imports
use crate::{allocator::Allocator, engine, vec::AllocVec};

// Core imports
use core::ptr;

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Removes the last element and returns it, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now past `len`.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Shortens the vector to `len`, destroying the tail last to first.
    ///
    /// Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        self.len = len;
        // SAFETY: the `tail` slots after `len` were live and are now unreachable.
        unsafe { engine::destroy_range(&self.alloc, self.ptr.add(len), tail) }
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// Returns `None` if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: `index < len`; the read slot is overwritten by the shift.
        unsafe {
            let at = self.ptr.as_ptr().add(index);
            let value = ptr::read(at);
            ptr::copy(at.add(1), at, self.len - index - 1);
            self.len -= 1;
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::{
        test_support::{flaky_values, values_of, Event, Flakiness, Tracker},
        AllocVec,
    };

    #[test]
    fn test_pop() {
        let mut v = AllocVec::from_slice(&[1, 2]).unwrap();
        assert_eq!(v.pop(), Some(2));
        assert_eq!(v.pop(), Some(1));
        assert_eq!(v.pop(), None);
        assert_eq!(v.capacity(), 2);
    }

    #[test]
    fn test_truncate_destroys_tail_in_reverse() {
        let tracker = Tracker::new();
        let mut v = AllocVec::from_slice(&flaky_values(&[1, 2, 3, 4], &tracker, &Flakiness::never()))
            .unwrap();
        tracker.clear_events();

        v.truncate(5);
        assert_eq!(v.len(), 4);
        v.truncate(2);
        assert_eq!(values_of(&v), [1, 2]);
        assert_eq!(tracker.events(), [Event::Dropped(4), Event::Dropped(3)]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn test_remove_shifts_left() {
        let mut v = AllocVec::from_slice(&["a", "b", "c", "d"]).unwrap();
        assert_eq!(v.remove(1), Some("b"));
        assert_eq!(v, ["a", "c", "d"]);
        assert_eq!(v.remove(2), Some("d"));
        assert_eq!(v.remove(2), None);
        assert_eq!(v, ["a", "c"]);
    }
}
