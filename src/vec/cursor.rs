// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor views over the live elements.

// Crate imports
use crate::{
    allocator::Allocator,
    cursor::{Cursor, Reverse},
    vec::AllocVec,
};

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// A cursor at the first element (equal to [`cursor_end`](AllocVec::cursor_end) when empty).
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// A cursor at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    #[track_caller]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        assert!(
            index <= self.len,
            "cursor index {index} out of range for length {}",
            self.len
        );
        Cursor::new(self.as_slice(), index)
    }

    /// A cursor one past the last element.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// A reverse cursor at the last element.
    #[inline]
    pub fn rcursor(&self) -> Reverse<Cursor<'_, T>> {
        Reverse::new(self.cursor_end())
    }

    /// A reverse cursor one before the first element.
    #[inline]
    pub fn rcursor_end(&self) -> Reverse<Cursor<'_, T>> {
        Reverse::new(self.cursor())
    }
}
