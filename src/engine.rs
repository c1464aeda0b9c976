// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk construct/destroy engine.
//!
//! Every mutating operation of [`AllocVec`](crate::AllocVec) is built from the
//! primitives in this module:
//!
//! - [`Storage`]: a fresh allocation that is released on drop unless it is
//!   adopted with [`Storage::into_raw`];
//! - [`Constructed`]: a run of slots being constructed left to right, which
//!   destroys the slots built so far (in reverse) on drop unless it is
//!   committed;
//! - [`construct_with`] and its wrappers, which tie the two together so that a
//!   failing (or panicking) element leaves the destination range exactly as
//!   unconstructed as it started.
//!
//! Nothing observable changes until a bulk step has fully succeeded.

// Crate imports
use crate::{
    allocator::{max_elements, Allocator},
    error::Error,
    try_clone::TryClone,
};

// Core imports
use core::{
    mem::{self, ManuallyDrop},
    ptr::{self, NonNull},
};

#[inline]
pub(crate) const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

/// The allocator's limit, never above what an `isize` position can address.
#[inline]
pub(crate) fn max_size<T, A: Allocator<T>>(alloc: &A) -> usize {
    alloc.max_size().min(max_elements::<T>())
}

/// Returns storage for `n` slots, or the dangling sentinel when no memory is needed.
pub(crate) fn allocate<T, A: Allocator<T>>(alloc: &A, n: usize) -> Result<NonNull<T>, Error> {
    let max = max_size(alloc);
    if n > max {
        return Err(Error::LengthLimit { requested: n, max });
    }
    if n == 0 || is_zst::<T>() {
        return Ok(NonNull::dangling());
    }
    Ok(alloc.allocate(n)?)
}

/// Releases storage obtained from [`allocate`].
///
/// # Safety
///
/// `ptr` and `n` must come from the same [`allocate`] call, and no slot may
/// hold a live value.
pub(crate) unsafe fn release<T, A: Allocator<T>>(alloc: &A, ptr: NonNull<T>, n: usize) {
    if n != 0 && !is_zst::<T>() {
        // SAFETY: forwarded from the caller; sentinels never reach the allocator.
        unsafe { alloc.deallocate(ptr, n) }
    }
}

/// A freshly allocated, fully unconstructed buffer.
pub(crate) struct Storage<'a, T, A: Allocator<T>> {
    alloc: &'a A,
    ptr: NonNull<T>,
    cap: usize,
}

impl<'a, T, A: Allocator<T>> Storage<'a, T, A> {
    pub(crate) fn new(alloc: &'a A, cap: usize) -> Result<Self, Error> {
        let ptr = allocate(alloc, cap)?;
        Ok(Self { alloc, ptr, cap })
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Hands the buffer over to the caller, who becomes responsible for releasing it.
    #[inline]
    pub(crate) fn into_raw(self) -> (NonNull<T>, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.cap)
    }
}

impl<T, A: Allocator<T>> Drop for Storage<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: an un-adopted buffer never holds live values past the
        // `Constructed` guard that filled it, which is dropped first.
        unsafe { release(self.alloc, self.ptr, self.cap) }
    }
}

/// Slots `[start, start + built)` that have been constructed but not yet committed.
pub(crate) struct Constructed<'a, T, A: Allocator<T>> {
    alloc: &'a A,
    start: NonNull<T>,
    built: usize,
}

impl<'a, T, A: Allocator<T>> Constructed<'a, T, A> {
    /// # Safety
    ///
    /// Every slot that will be pushed must be valid for writes and unconstructed.
    #[inline]
    pub(crate) unsafe fn new(alloc: &'a A, start: NonNull<T>) -> Self {
        Self {
            alloc,
            start,
            built: 0,
        }
    }

    /// Constructs `value` into the next slot.
    ///
    /// # Safety
    ///
    /// See [`Constructed::new`].
    #[inline]
    pub(crate) unsafe fn push(&mut self, value: T) {
        // SAFETY: the slot is in the destination range and unconstructed.
        unsafe { self.alloc.construct(self.start.add(self.built), value) };
        self.built += 1;
    }

    /// Keeps the constructed slots and returns how many there are.
    #[inline]
    pub(crate) fn commit(self) -> usize {
        ManuallyDrop::new(self).built
    }
}

impl<T, A: Allocator<T>> Drop for Constructed<'_, T, A> {
    fn drop(&mut self) {
        if self.built != 0 {
            trace!("rolling back {} constructed elements", self.built);
        }
        // SAFETY: exactly `built` slots from `start` were constructed by us.
        unsafe { destroy_range(self.alloc, self.start, self.built) }
    }
}

/// Destroys `count` live slots from `start`, last to first.
///
/// # Safety
///
/// All `count` slots must hold live values that are not used again.
pub(crate) unsafe fn destroy_range<T, A: Allocator<T>>(alloc: &A, start: NonNull<T>, count: usize) {
    if !mem::needs_drop::<T>() {
        return;
    }
    for i in (0..count).rev() {
        // SAFETY: `i < count`.
        unsafe { alloc.destroy(start.add(i)) }
    }
}

/// Constructs `count` values produced by `make(i)` into `dst[0..count]`.
///
/// On the first error (or panic) every slot constructed so far is destroyed in
/// reverse order before the error is returned; `dst` is left unconstructed.
///
/// # Safety
///
/// `dst[0..count]` must be valid for writes and unconstructed.
pub(crate) unsafe fn construct_with<T, A, E, F>(
    alloc: &A,
    dst: NonNull<T>,
    count: usize,
    mut make: F,
) -> Result<(), E>
where
    A: Allocator<T>,
    F: FnMut(usize) -> Result<T, E>,
{
    // SAFETY: forwarded from the caller.
    let mut built = unsafe { Constructed::new(alloc, dst) };
    for i in 0..count {
        let value = make(i)?;
        // SAFETY: `i < count`.
        unsafe { built.push(value) };
    }
    built.commit();
    Ok(())
}

/// Fills `dst[0..count]` with clones of `value`.
///
/// # Safety
///
/// See [`construct_with`].
#[inline]
pub(crate) unsafe fn fill<T: TryClone, A: Allocator<T>>(
    alloc: &A,
    dst: NonNull<T>,
    count: usize,
    value: &T,
) -> Result<(), T::Error> {
    // SAFETY: forwarded from the caller.
    unsafe { construct_with(alloc, dst, count, |_| value.try_clone()) }
}

/// Clones `src` into `dst[0..src.len()]`.
///
/// # Safety
///
/// See [`construct_with`].
#[inline]
pub(crate) unsafe fn clone_slice<T: TryClone, A: Allocator<T>>(
    alloc: &A,
    dst: NonNull<T>,
    src: &[T],
) -> Result<(), T::Error> {
    // SAFETY: forwarded from the caller.
    unsafe { construct_with(alloc, dst, src.len(), |i| src[i].try_clone()) }
}

/// Moves at most `limit` items from `iter` into `dst` and returns how many were moved.
///
/// # Safety
///
/// `dst[0..limit]` must be valid for writes and unconstructed.
pub(crate) unsafe fn construct_from_iter<T, A, I>(
    alloc: &A,
    dst: NonNull<T>,
    limit: usize,
    iter: &mut I,
) -> usize
where
    A: Allocator<T>,
    I: Iterator<Item = T>,
{
    // SAFETY: forwarded from the caller.
    let mut built = unsafe { Constructed::new(alloc, dst) };
    for value in iter.by_ref().take(limit) {
        // SAFETY: `take(limit)` bounds the number of pushes.
        unsafe { built.push(value) };
    }
    built.commit()
}

/// Moves `count` live values from `src` to the unconstructed `dst`.
///
/// Afterwards `src[0..count]` is logically uninitialized.
///
/// # Safety
///
/// The ranges must be valid and must not overlap.
#[inline]
pub(crate) unsafe fn relocate<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), count) }
}
