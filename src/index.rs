// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indexing support for [`AllocVec`](crate::AllocVec).
//!
//! `Index` and `IndexMut` forward to the slice of live elements, so they accept
//! everything a slice does (`usize` and every range form) and panic the same
//! way when out of bounds. Use [`AllocVec::at`](crate::AllocVec::at) for a
//! checked alternative that reports [`Error::OutOfRange`](crate::Error::OutOfRange).

// Crate imports
use crate::{allocator::Allocator, vec::AllocVec};

// Core imports
use core::{
    ops::{Index, IndexMut},
    slice::SliceIndex,
};

impl<T, I: SliceIndex<[T]>, A: Allocator<T>> Index<I> for AllocVec<T, A> {
    type Output = I::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator<T>> IndexMut<I> for AllocVec<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}
