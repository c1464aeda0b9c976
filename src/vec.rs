// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `AllocVec` type and its inherent API.
//!
//! `AllocVec<T, A>` owns a single contiguous buffer obtained from an
//! [`Allocator`] and tracks how many of its slots hold live elements. Storage
//! is only ever replaced wholesale: a new buffer is built and fully populated
//! before the old one is released.
//!
//! The operations are split by concern:
//!
//! - `new`: constructors (fill, default, range, cursor range);
//! - `clone`: copy construction and copy assignment;
//! - `assign`: replacing the contents;
//! - `reserve`: capacity management;
//! - `insert`: positional insertion and appends;
//! - `extend`: iterator sources (`Extend`, `FromIterator`);
//! - `remove`: `pop`, `remove`, `truncate`;
//! - `from`: conversions;
//! - `cursor` / `slice`: views.

mod assign;
mod clone;
mod cursor;
mod extend;
mod from;
mod insert;
mod new;
mod remove;
mod reserve;
mod slice;

// Crate imports
use crate::{
    allocator::{Allocator, Global},
    engine,
    error::Error,
};

// Core imports
use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

/// A growable, contiguous vector backed by an injected [`Allocator`].
///
/// `AllocVec<T, A>` owns exactly one allocation of [`capacity`] slots. The
/// first [`len`] slots hold live elements; the rest are allocated but
/// unconstructed. Capacity only changes through [`reserve`], growth on
/// [`insert`] / [`push`] / extension, [`shrink_to_fit`], or an `assign*` /
/// [`try_clone_from`] whose new contents do not fit.
///
/// # Failure guarantees
///
/// Every fallible operation documents one of:
///
/// - **strong**: on error (or panic in element code) the vector is exactly as
///   it was before the call;
/// - **basic**: on error the vector is valid, but its contents are
///   unspecified (the documentation says what they actually are).
///
/// No operation leaks an element or drops one twice, whichever way it fails.
///
/// # Element access
///
/// - [`at`](AllocVec::at) is bounds-checked and returns [`Error::OutOfRange`].
/// - `v[i]` panics when out of bounds, like slices.
/// - [`get_unchecked`](AllocVec::get_unchecked) is `unsafe` and only checks
///   its bounds in debug builds.
///
/// Through `Deref<Target = [T]>` all slice methods (`first`, `last`, `iter`,
/// `sort`, ...) are available on the live elements.
///
/// # Examples
///
/// ```rust
/// use alloc_vector::AllocVec;
///
/// let mut v: AllocVec<u32> = AllocVec::from_elem(2, &7).unwrap();
/// assert_eq!((v.len(), v.capacity()), (2, 2));
///
/// v.reserve(10).unwrap();
/// assert_eq!(v.capacity(), 10);
///
/// v.assign_from_slice(&[1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
/// assert_eq!(v.capacity(), 10);
///
/// assert!(v.at(5).is_err());
/// ```
///
/// [`capacity`]: AllocVec::capacity
/// [`len`]: AllocVec::len
/// [`reserve`]: AllocVec::reserve
/// [`insert`]: AllocVec::insert
/// [`push`]: AllocVec::push
/// [`shrink_to_fit`]: AllocVec::shrink_to_fit
/// [`try_clone_from`]: AllocVec::try_clone_from
pub struct AllocVec<T, A: Allocator<T> = Global> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) len: usize,
    pub(crate) alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: `AllocVec` owns its elements and its allocator like a `Vec<T>` does.
unsafe impl<T: Send, A: Allocator<T> + Send> Send for AllocVec<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator<T> + Sync> Sync for AllocVec<T, A> {}

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Assembles a vector from storage it will own.
    ///
    /// # Safety
    ///
    /// `ptr`/`cap` must come from [`engine::allocate`] with `alloc`, and exactly
    /// the first `len <= cap` slots must be live.
    #[inline]
    pub(crate) const unsafe fn from_raw_parts(ptr: NonNull<T>, cap: usize, len: usize, alloc: A) -> Self {
        Self {
            ptr,
            cap,
            len,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `capacity - len`, the number of elements that fit without reallocating.
    #[inline]
    pub const fn spare_capacity(&self) -> usize {
        self.cap - self.len
    }

    /// The largest capacity the allocator can represent, at most `isize::MAX`.
    #[inline]
    pub fn max_size(&self) -> usize {
        engine::max_size(&self.alloc)
    }

    /// Returns a reference to the allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Bounds-checked access; [`Error::OutOfRange`] when `index >= len`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access; [`Error::OutOfRange`] when `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `index < self.len()`. Only debug builds check this.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: the caller guarantees `index < len`; those slots are live.
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `index < self.len()`. Only debug builds check this.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} out of range for length {}", self.len);
        // SAFETY: the caller guarantees `index < len`; those slots are live.
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Destroys every element (last to first) and sets `len = 0`.
    ///
    /// Capacity and storage are kept.
    #[inline]
    pub fn clear(&mut self) {
        self.destroy_all();
    }

    /// Destroys all live elements, keeping the storage.
    pub(crate) fn destroy_all(&mut self) {
        let len = self.len;
        // Zero first so a panicking destructor cannot lead to a double drop.
        self.len = 0;
        // SAFETY: the first `len` slots were live and are no longer reachable.
        unsafe { engine::destroy_range(&self.alloc, self.ptr, len) }
    }

    /// Releases the current storage and adopts `ptr`/`cap`.
    ///
    /// # Safety
    ///
    /// The current storage must hold no live elements (destroyed or relocated),
    /// and `ptr`/`cap` must come from [`engine::allocate`] with `self.alloc`.
    pub(crate) unsafe fn replace_storage(&mut self, ptr: NonNull<T>, cap: usize) {
        let (old, old_cap) = (self.ptr, self.cap);
        self.ptr = ptr;
        self.cap = cap;
        trace!("storage replaced: {old_cap} -> {cap} slots");
        // SAFETY: forwarded from the caller.
        unsafe { engine::release(&self.alloc, old, old_cap) }
    }
}

/// Unwraps the result of an operation that can only fail on storage, for the
/// trait impls that have no way to report it.
#[track_caller]
pub(crate) fn expect_storage<R>(res: Result<R, Error>) -> R {
    match res {
        Ok(r) => r,
        Err(e) => panic!("AllocVec: {e}"),
    }
}

impl<T, A: Allocator<T>> Drop for AllocVec<T, A> {
    fn drop(&mut self) {
        self.destroy_all();
        // SAFETY: all elements are gone; the storage is ours and released once.
        unsafe { engine::release(&self.alloc, self.ptr, self.cap) }
    }
}

impl<T, A: Allocator<T> + Default> Default for AllocVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: Allocator<T>> fmt::Debug for AllocVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocVec")
            .field("len", &self.len)
            .field("capacity", &self.cap)
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T, U, A, B> PartialEq<AllocVec<U, B>> for AllocVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator<T>,
    B: Allocator<U>,
{
    fn eq(&self, other: &AllocVec<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: PartialEq<U>, U, A: Allocator<T>, const N: usize> PartialEq<[U; N]> for AllocVec<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}
impl<T: PartialEq<U>, U, A: Allocator<T>> PartialEq<[U]> for AllocVec<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}
impl<T: Eq, A: Allocator<T>> Eq for AllocVec<T, A> {}
impl<T: Ord, A: Allocator<T>> Ord for AllocVec<T, A> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}
impl<T: PartialOrd, A: Allocator<T>> PartialOrd for AllocVec<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}
impl<T: Hash, A: Allocator<T>> Hash for AllocVec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T, A: Allocator<T>> Deref for AllocVec<T, A> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}
impl<T, A: Allocator<T>> DerefMut for AllocVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator<T>> AsRef<[T]> for AllocVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, A: Allocator<T>> AsMut<[T]> for AllocVec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// Borrow ergonomics (treat as a slice)
impl<T, A: Allocator<T>> Borrow<[T]> for AllocVec<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T, A: Allocator<T>> BorrowMut<[T]> for AllocVec<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
