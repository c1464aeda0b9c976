// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The allocator seam used by [`AllocVec`](crate::AllocVec).
//!
//! An [`Allocator<T>`] hands out raw, uninitialized storage for `n` values of
//! `T` and constructs/destroys individual slots in it. The vector never asks
//! for zero slots and never asks for storage for zero-sized types; both are
//! served by a dangling sentinel pointer instead.

// Crate imports
use alloc::alloc::{alloc, dealloc, Layout};

// Core imports
use core::{error::Error as CoreError, fmt, mem, ptr::NonNull};

/// The allocator could not provide the requested storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl CoreError for AllocError {}

/// Storage strategy for a vector of `T`.
///
/// Methods take `&self`; allocators that keep state (statistics, arenas,
/// fault injection) use interior mutability.
///
/// # Safety
///
/// Implementors must return, from a successful [`allocate(n)`](Allocator::allocate),
/// a pointer that is valid for reads and writes of `n` consecutive `T`s,
/// properly aligned, and not aliased by any other live allocation until it is
/// passed back to [`deallocate`](Allocator::deallocate) with the same `n`.
pub unsafe trait Allocator<T> {
    /// Allocates uninitialized storage for `n` values.
    fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError>;

    /// Releases storage obtained from [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `self.allocate(n)` with the same `n` and must not
    /// have been released already. No slot may still hold a live value.
    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize);

    /// Moves `value` into the uninitialized `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and must not hold a live value.
    #[inline]
    unsafe fn construct(&self, slot: NonNull<T>, value: T) {
        // SAFETY: forwarded from the caller.
        unsafe { slot.as_ptr().write(value) }
    }

    /// Drops the live value in `slot`, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value that is not used again.
    #[inline]
    unsafe fn destroy(&self, slot: NonNull<T>) {
        // SAFETY: forwarded from the caller.
        unsafe { slot.as_ptr().drop_in_place() }
    }

    /// The largest element count [`allocate`](Allocator::allocate) could ever satisfy.
    #[inline]
    fn max_size(&self) -> usize {
        max_elements::<T>()
    }
}

/// The largest `n` for which `Layout::array::<T>(n)` is representable.
///
/// Zero-sized types are capped at `isize::MAX` as well, so every index and
/// cursor position fits in an `isize`.
pub(crate) const fn max_elements<T>() -> usize {
    match mem::size_of::<T>() {
        0 => isize::MAX as usize,
        size => isize::MAX as usize / size,
    }
}

/// The global heap, via `alloc::alloc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Global;

// SAFETY: storage comes from the global allocator with the exact array layout
// and is released with the same layout.
unsafe impl<T> Allocator<T> for Global {
    fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = Layout::array::<T>(n).map_err(|_| AllocError)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(AllocError)
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        if let Ok(layout) = Layout::array::<T>(n) {
            if layout.size() != 0 {
                // SAFETY: `ptr` was allocated by `allocate(n)` with this layout.
                unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) }
            }
        }
    }
}

// SAFETY: every call is forwarded to `A`, which upholds the contract.
unsafe impl<T, A: Allocator<T> + ?Sized> Allocator<T> for &A {
    #[inline]
    fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        (**self).allocate(n)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { (**self).deallocate(ptr, n) }
    }

    #[inline]
    unsafe fn construct(&self, slot: NonNull<T>, value: T) {
        // SAFETY: forwarded from the caller.
        unsafe { (**self).construct(slot, value) }
    }

    #[inline]
    unsafe fn destroy(&self, slot: NonNull<T>) {
        // SAFETY: forwarded from the caller.
        unsafe { (**self).destroy(slot) }
    }

    #[inline]
    fn max_size(&self) -> usize {
        (**self).max_size()
    }
}
