// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Iterator sources: `try_extend`, `extend_from_slice`, `Extend`, `FromIterator`.

// Crate imports
use crate::{
    allocator::{Allocator, Global},
    engine::{self, Storage},
    error::Error,
    growth::grown_capacity,
    try_clone::TryClone,
    vec::{expect_storage, AllocVec},
};

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Builds a vector from `iter` using `alloc`.
    ///
    /// An exact `size_hint` is reserved up front, so `capacity == len` for
    /// measurable sources.
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Result<Self, Error> {
        let iter = iter.into_iter();
        let mut v = Self::new_in(alloc);
        if let (lower, Some(upper)) = iter.size_hint() {
            if lower == upper {
                v.reserve(lower)?;
            }
        }
        v.try_extend(iter)?;
        Ok(v)
    }

    /// Appends every item of `iter`, growing per the growth policy.
    ///
    /// **Guarantee: basic.** On error the items appended so far are kept.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), Error> {
        let mut iter = iter.into_iter();
        while let Some(value) = iter.next() {
            if self.len == self.cap {
                let (lower, _) = iter.size_hint();
                self.grow_for(lower.saturating_add(1))?;
            }
            // SAFETY: `len < cap`.
            unsafe { self.alloc.construct(self.ptr.add(self.len), value) };
            self.len += 1;
        }
        Ok(())
    }

    /// Appends clones of `src`.
    ///
    /// When the spare capacity is too small, the clones are built in a new
    /// buffer sized by the growth policy and the existing elements are moved
    /// over only once every clone has succeeded.
    ///
    /// **Guarantee: strong.** On error length, capacity and contents are
    /// unchanged.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), Error<T::Error>>
    where
        T: TryClone,
    {
        let count = src.len();
        let len = self.len;
        if count <= self.spare_capacity() {
            // SAFETY: `count` spare slots follow the live elements.
            unsafe { engine::clone_slice(&self.alloc, self.ptr.add(len), src) }
                .map_err(Error::Element)?;
        } else {
            let new_cap = grown_capacity(len, count, self.max_size()).map_err(Error::widen)?;
            let storage = Storage::new(&self.alloc, new_cap).map_err(Error::widen)?;
            // SAFETY: `new_cap >= len + count` fresh slots.
            unsafe { engine::clone_slice(&self.alloc, storage.as_ptr().add(len), src) }
                .map_err(Error::Element)?;
            let (ptr, cap) = storage.into_raw();
            // SAFETY: the prefix `[0, len)` of the new buffer is still unconstructed.
            unsafe {
                engine::relocate(self.ptr, ptr, len);
                self.replace_storage(ptr, cap);
            }
        }
        self.len = len + count;
        Ok(())
    }
}

impl<T, A: Allocator<T>> Extend<T> for AllocVec<T, A> {
    /// # Panics
    ///
    /// Panics if the allocator cannot provide storage.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        expect_storage(self.try_extend(iter))
    }
}

impl<'a, T: Copy + 'a, A: Allocator<T>> Extend<&'a T> for AllocVec<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        expect_storage(self.try_extend(iter.into_iter().copied()))
    }
}

impl<T> FromIterator<T> for AllocVec<T> {
    /// # Panics
    ///
    /// Panics if the allocator cannot provide storage.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        expect_storage(Self::from_iter_in(iter, Global))
    }
}
