// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{allocator::Allocator, vec::AllocVec};

// Core imports
use core::slice;

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `ptr` is non-null and aligned (dangling only when nothing
        // is allocated), and the first `len` slots are live.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, with unique access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns a raw pointer to the storage.
    ///
    /// Valid for reads of `len` elements until the next reallocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a raw mutable pointer to the storage.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::AllocVec;

    #[test]
    fn test_slices_cover_live_elements_only() {
        let mut v = AllocVec::with_capacity(8).unwrap();
        v.push(1).unwrap();
        v.push(2).unwrap();
        assert_eq!(v.as_slice(), &[1, 2]);
        v.as_mut_slice()[1] = 20;
        assert_eq!(v.as_slice(), &[1, 20]);
    }

    #[test]
    fn test_pointer_stable_without_reallocation() {
        let mut v = AllocVec::with_capacity(4).unwrap();
        let p = v.as_ptr();
        v.push(1u8).unwrap();
        v.push(2).unwrap();
        assert_eq!(v.as_ptr(), p);
        // SAFETY: two live elements.
        assert_eq!(unsafe { *v.as_mut_ptr().add(1) }, 2);
    }
}
