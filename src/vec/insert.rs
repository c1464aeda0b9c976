// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positional insertion and appends.

// Crate imports
use crate::{
    allocator::Allocator,
    cursor::Cursor,
    engine::{self, Storage},
    error::Error,
    growth::grown_capacity,
    try_clone::TryClone,
    vec::AllocVec,
};

// Core imports
use core::ptr;

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Inserts `value` before position `index`, shifting later elements right.
    ///
    /// Returns a cursor at the inserted element. `index == len` appends.
    ///
    /// If the vector is full, a buffer sized by the growth policy is allocated,
    /// `value` is constructed into it first and the existing elements are then
    /// moved around it.
    ///
    /// **Guarantee: strong.** Fails with [`Error::OutOfRange`] if
    /// `index > len`, or with [`Error::LengthLimit`] / [`Error::Alloc`] when
    /// growth is impossible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use alloc_vector::AllocVec;
    ///
    /// let mut v = AllocVec::from_slice(&["a", "c"]).unwrap();
    /// let c = v.insert(1, "b").unwrap();
    /// assert_eq!(c.index(), Some(1));
    /// assert_eq!(v.as_slice(), &["a", "b", "c"]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<Cursor<'_, T>, Error> {
        let len = self.len;
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }

        if len < self.cap {
            // SAFETY: `index <= len < cap`. The suffix is moved one slot right
            // into spare capacity. While it is in flight `len` only covers the
            // untouched prefix, so a panic in `construct` leaks rather than
            // double-drops.
            unsafe {
                let at = self.ptr.add(index);
                self.len = index;
                ptr::copy(at.as_ptr(), at.as_ptr().add(1), len - index);
                self.alloc.construct(at, value);
            }
            self.len = len + 1;
        } else {
            let new_cap = grown_capacity(len, 1, self.max_size())?;
            let storage = Storage::new(&self.alloc, new_cap)?;
            let dst = storage.as_ptr();
            // SAFETY: `new_cap > len`, so `dst[index]` is a fresh slot.
            unsafe { self.alloc.construct(dst.add(index), value) };
            let (dst, cap) = storage.into_raw();
            // SAFETY: the prefix and suffix land on either side of the new
            // element in a distinct buffer.
            unsafe {
                engine::relocate(self.ptr, dst, index);
                engine::relocate(self.ptr.add(index), dst.add(index + 1), len - index);
                self.replace_storage(dst, cap);
            }
            self.len = len + 1;
        }
        Ok(Cursor::new(self.as_slice(), index))
    }

    /// Inserts a clone of `value` before position `index`.
    ///
    /// The clone is made before anything is moved.
    ///
    /// **Guarantee: strong.**
    pub fn insert_cloned(&mut self, index: usize, value: &T) -> Result<Cursor<'_, T>, Error<T::Error>>
    where
        T: TryClone,
    {
        let len = self.len;
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        let value = value.try_clone().map_err(Error::Element)?;
        self.insert(index, value).map_err(Error::widen)
    }

    /// Appends `value`, growing per the growth policy when full.
    ///
    /// **Guarantee: strong.**
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.len == self.cap {
            self.grow_for(1)?;
        }
        // SAFETY: `len < cap` after growing.
        unsafe { self.alloc.construct(self.ptr.add(self.len), value) };
        self.len += 1;
        Ok(())
    }
}
