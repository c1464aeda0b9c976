// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replacing the contents: `assign`, `assign_from_slice`,
//! `assign_from_cursors`, `assign_iter`.
//!
//! Two paths, chosen by whether the new contents fit the current capacity:
//!
//! - **fits**: the old elements are destroyed and the new ones constructed in
//!   place. No allocation, but a failure cannot bring the old elements back,
//!   so the vector is left empty (basic guarantee).
//! - **grows**: a new buffer of exactly the required size is filled first and
//!   adopted only on success (strong guarantee).

// Crate imports
use crate::{
    allocator::Allocator,
    cursor::Cursor,
    engine::{self, Storage},
    error::Error,
    try_clone::TryClone,
    vec::AllocVec,
};

// Core imports
use core::mem::ManuallyDrop;

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Replaces the contents with `count` clones of `value`.
    ///
    /// **Guarantee:** strong if `count > capacity`; otherwise basic, leaving
    /// the vector empty with its capacity unchanged.
    #[inline]
    pub fn assign(&mut self, count: usize, value: &T) -> Result<(), Error<T::Error>>
    where
        T: TryClone,
    {
        self.assign_with(count, |_| value.try_clone())
    }

    /// Replaces the contents with clones of `src`.
    ///
    /// **Guarantee:** as for [`assign`](AllocVec::assign).
    #[inline]
    pub fn assign_from_slice(&mut self, src: &[T]) -> Result<(), Error<T::Error>>
    where
        T: TryClone,
    {
        self.assign_with(src.len(), |i| src[i].try_clone())
    }

    /// Replaces the contents with clones of the elements in `[first, last)`.
    ///
    /// Returns [`Error::InvalidRange`], leaving `self` untouched, if the cursors
    /// do not describe a range of one vector.
    ///
    /// **Guarantee:** as for [`assign`](AllocVec::assign).
    pub fn assign_from_cursors(
        &mut self,
        first: Cursor<'_, T>,
        last: Cursor<'_, T>,
    ) -> Result<(), Error<T::Error>>
    where
        T: TryClone,
    {
        let src = first.slice_to(last).ok_or(Error::InvalidRange)?;
        self.assign_from_slice(src)
    }

    /// Replaces the contents with the items of `iter`, moving them in.
    ///
    /// The length is taken from an exact `size_hint`. Otherwise the items are
    /// collected in one forward pass into a staging buffer from the same
    /// allocator, which is moved from if it fits. Otherwise the staging
    /// buffer is trimmed to the item count and adopted, so a growing
    /// assignment always ends with `capacity == len`.
    ///
    /// **Guarantee:** strong if the new contents are built in separate
    /// storage; if they are built in place, a panic from `iter` leaves the
    /// vector empty with its capacity unchanged.
    pub fn assign_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), Error> {
        let iter = iter.into_iter();
        match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => self.assign_measured(lower, iter),
            _ => self.assign_staged(iter),
        }
    }

    fn assign_with<E, F>(&mut self, count: usize, make: F) -> Result<(), Error<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        if count <= self.cap {
            self.destroy_all();
            // SAFETY: all `cap >= count` slots are now unconstructed.
            unsafe { engine::construct_with(&self.alloc, self.ptr, count, make) }
                .map_err(Error::Element)?;
            self.len = count;
            return Ok(());
        }

        let storage = Storage::new(&self.alloc, count).map_err(Error::widen)?;
        // SAFETY: `count` fresh slots.
        unsafe { engine::construct_with(&self.alloc, storage.as_ptr(), count, make) }
            .map_err(Error::Element)?;
        let (ptr, cap) = storage.into_raw();

        self.destroy_all();
        // SAFETY: the old elements are gone; `ptr` holds `count` live values.
        unsafe { self.replace_storage(ptr, cap) };
        self.len = count;
        Ok(())
    }

    fn assign_measured<I: Iterator<Item = T>>(&mut self, count: usize, mut iter: I) -> Result<(), Error> {
        if count <= self.cap {
            self.destroy_all();
            // SAFETY: all `cap >= count` slots are now unconstructed.
            self.len = unsafe { engine::construct_from_iter(&self.alloc, self.ptr, count, &mut iter) };
        } else {
            let storage = Storage::new(&self.alloc, count)?;
            // SAFETY: `count` fresh slots.
            let built = unsafe { engine::construct_from_iter(&self.alloc, storage.as_ptr(), count, &mut iter) };
            let (ptr, cap) = storage.into_raw();

            self.destroy_all();
            // SAFETY: the old elements are gone; `ptr` holds `built` live values.
            unsafe { self.replace_storage(ptr, cap) };
            self.len = built;
        }
        // Anything an inexact iterator still has to offer.
        self.try_extend(iter)
    }

    fn assign_staged<I: Iterator<Item = T>>(&mut self, iter: I) -> Result<(), Error> {
        let mut staged = AllocVec::new_in(&self.alloc);
        staged.try_extend(iter)?;
        if staged.len > self.cap && staged.cap != staged.len {
            // Growing assignments end with exactly `count` slots.
            staged.shrink_to_fit()?;
        }
        let (ptr, cap, count) = {
            let staged = ManuallyDrop::new(staged);
            (staged.ptr, staged.cap, staged.len)
        };
        trace!("assign staged {count} items of unknown length");

        self.destroy_all();
        if count <= self.cap {
            // SAFETY: `ptr[..count]` is live, our slots are unconstructed, and the
            // buffers are distinct. The staging buffer came from `&self.alloc`.
            unsafe {
                engine::relocate(ptr, self.ptr, count);
                engine::release(&self.alloc, ptr, cap);
            }
        } else {
            // SAFETY: the staging buffer came from `&self.alloc` and holds `count` live values.
            unsafe { self.replace_storage(ptr, cap) };
        }
        self.len = count;
        Ok(())
    }
}
