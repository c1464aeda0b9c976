// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copy construction and copy assignment.

// Crate imports
use crate::{
    allocator::Allocator,
    engine::{self, Storage},
    error::Error,
    try_clone::TryClone,
    vec::{expect_storage, AllocVec},
};

impl<T: TryClone, A: Allocator<T> + Clone> AllocVec<T, A> {
    /// Returns an independent copy holding clones of the live elements.
    ///
    /// The copy uses a clone of the allocator and has `capacity == len`.
    #[inline]
    pub fn try_clone(&self) -> Result<Self, Error<T::Error>> {
        Self::from_slice_in(self.as_slice(), self.alloc.clone())
    }
}

impl<T: TryClone, A: Allocator<T>> AllocVec<T, A> {
    /// Replaces the contents with clones of `source`.
    ///
    /// A replacement buffer sized to `source.len()` is always built first and
    /// only adopted once every clone has succeeded.
    ///
    /// **Guarantee: strong.** On error `self` is untouched.
    pub fn try_clone_from<B: Allocator<T>>(&mut self, source: &AllocVec<T, B>) -> Result<(), Error<T::Error>> {
        let count = source.len();
        let storage = Storage::new(&self.alloc, count).map_err(Error::widen)?;
        // SAFETY: `count` fresh slots.
        unsafe { engine::clone_slice(&self.alloc, storage.as_ptr(), source.as_slice()) }
            .map_err(Error::Element)?;
        let (ptr, cap) = storage.into_raw();

        self.destroy_all();
        // SAFETY: the old elements are gone; `ptr` holds `count` live clones.
        unsafe { self.replace_storage(ptr, cap) };
        self.len = count;
        debug!("copy-assigned {count} elements");
        Ok(())
    }
}

impl<T: Clone, A: Allocator<T> + Clone> Clone for AllocVec<T, A> {
    /// # Panics
    ///
    /// Panics if the allocator cannot provide storage.
    fn clone(&self) -> Self {
        expect_storage(self.try_clone())
    }

    /// # Panics
    ///
    /// Panics if the allocator cannot provide storage; `self` is then unchanged.
    fn clone_from(&mut self, source: &Self) {
        expect_storage(self.try_clone_from(source))
    }
}
