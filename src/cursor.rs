// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random-access cursors into an [`AllocVec`](crate::AllocVec).
//!
//! A [`Cursor`] is a position in a vector's storage. All arithmetic and
//! ordering is defined on the position alone; nothing is checked until the
//! cursor is dereferenced. Dereferencing comes in two flavors:
//!
//! - checked ([`Cursor::get`], [`Cursor::at`]) returning `None` outside
//!   `[0, len)`;
//! - unchecked ([`Cursor::get_unchecked`], [`Cursor::at_unchecked`]), `unsafe`,
//!   with the bounds asserted in debug builds only.
//!
//! A cursor borrows the vector it was created from, so it cannot outlive a
//! reallocation.
//!
//! [`Reverse`] adapts any [`RandomAccess`] cursor so that moving "forward"
//! walks the underlying cursor backwards.

// Core imports
use core::{
    cmp::Ordering,
    fmt,
    marker::PhantomData,
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr::NonNull,
};

/// Position-based random access shared by [`Cursor`] and [`Reverse`].
pub trait RandomAccess: Copy + Ord {
    /// What dereferencing yields.
    type Item;

    /// The cursor `n` steps further on (`n` may be negative).
    fn offset(self, n: isize) -> Self;

    /// Number of steps from `origin` to `self`.
    fn distance_from(self, origin: Self) -> isize;

    /// The item at this position, or `None` if it is out of range.
    fn get(self) -> Option<Self::Item>;

    /// The item at this position, without a bounds check.
    ///
    /// # Safety
    ///
    /// The position must be within the live elements of the vector.
    unsafe fn get_unchecked(self) -> Self::Item;
}

/// A random-access position into a vector's live elements.
///
/// # Examples
///
/// ```rust
/// use alloc_vector::AllocVec;
///
/// let v = AllocVec::from_slice(&[10, 20, 30]).unwrap();
/// let mut c = v.cursor();
/// assert_eq!(c.get(), Some(&10));
/// c += 2;
/// assert_eq!(c.get(), Some(&30));
/// assert_eq!(c.at(-1), Some(&20));
/// assert_eq!(v.cursor_end() - v.cursor(), 3);
/// assert_eq!((c + 1).get(), None);
/// ```
pub struct Cursor<'a, T> {
    base: NonNull<T>,
    len: usize,
    pos: isize,
    _marker: PhantomData<&'a [T]>,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(elements: &'a [T], pos: usize) -> Self {
        Self {
            base: NonNull::from(elements).cast::<T>(),
            len: elements.len(),
            // Capacities never exceed `isize::MAX`, so neither does `pos <= len`.
            pos: pos as isize,
            _marker: PhantomData,
        }
    }

    /// The position relative to the first element.
    #[inline]
    pub fn position(&self) -> isize {
        self.pos
    }

    /// The position as an index, if it lies in `[0, len]` (one-past-the-end included).
    #[inline]
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.pos).ok().filter(|&i| i <= self.len)
    }

    /// Returns `true` if the cursor points at a live element.
    #[inline]
    pub fn is_dereferenceable(&self) -> bool {
        usize::try_from(self.pos).is_ok_and(|i| i < self.len)
    }

    /// The element under the cursor, or `None` if the position is out of range.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        if self.is_dereferenceable() {
            // SAFETY: bounds checked above.
            Some(unsafe { self.get_unchecked() })
        } else {
            None
        }
    }

    /// The element under the cursor, without a bounds check.
    ///
    /// # Safety
    ///
    /// `0 <= self.position() < len`.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        debug_assert!(
            self.is_dereferenceable(),
            "cursor position {} out of range for length {}",
            self.pos,
            self.len
        );
        // SAFETY: the caller guarantees the position is in bounds; the borrow
        // `'a` keeps the storage alive and unchanged.
        unsafe { &*self.base.as_ptr().offset(self.pos) }
    }

    /// Subscript: the element `n` positions away, or `None` if out of range.
    #[inline]
    pub fn at(&self, n: isize) -> Option<&'a T> {
        (*self + n).get()
    }

    /// Subscript without a bounds check.
    ///
    /// # Safety
    ///
    /// `0 <= self.position() + n < len`.
    #[inline]
    pub unsafe fn at_unchecked(&self, n: isize) -> &'a T {
        // SAFETY: forwarded from the caller.
        unsafe { (*self + n).get_unchecked() }
    }

    /// Moves to the next position (pre-increment).
    #[inline]
    pub fn inc(&mut self) -> &mut Self {
        self.pos += 1;
        self
    }

    /// Moves to the previous position (pre-decrement).
    #[inline]
    pub fn dec(&mut self) -> &mut Self {
        self.pos -= 1;
        self
    }

    /// Moves to the next position and returns the old one (post-increment).
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.pos += 1;
        old
    }

    /// Moves to the previous position and returns the old one (post-decrement).
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.pos -= 1;
        old
    }

    /// The elements in `[self, last)`, if both cursors belong to the same
    /// vector and describe an in-bounds, non-inverted range.
    pub fn slice_to(self, last: Self) -> Option<&'a [T]> {
        if !self.same_storage(&last) {
            return None;
        }
        let start = self.index()?;
        let end = last.index()?;
        if start > end {
            return None;
        }
        // SAFETY: `start <= end <= len` over storage borrowed for `'a`.
        unsafe {
            Some(core::slice::from_raw_parts(
                self.base.as_ptr().add(start),
                end - start,
            ))
        }
    }

    #[inline]
    fn same_storage(&self, other: &Self) -> bool {
        self.base == other.base && self.len == other.len
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Cursor<'_, T> {}

// SAFETY: a cursor only hands out `&'a T`, exactly like the `&'a [T]` it was made from.
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
// SAFETY: as above.
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("len", &self.len)
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.base == other.base
    }
}
impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(self.same_storage(other), "comparing cursors of different vectors");
        self.pos
            .cmp(&other.pos)
            .then_with(|| self.base.cmp(&other.base))
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;
    #[inline]
    fn add(mut self, n: isize) -> Self {
        self.pos += n;
        self
    }
}
impl<'a, T> Add<Cursor<'a, T>> for isize {
    type Output = Cursor<'a, T>;
    #[inline]
    fn add(self, c: Cursor<'a, T>) -> Cursor<'a, T> {
        c + self
    }
}
impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;
    #[inline]
    fn sub(mut self, n: isize) -> Self {
        self.pos -= n;
        self
    }
}
impl<T> AddAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.pos += n;
    }
}
impl<T> SubAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.pos -= n;
    }
}
impl<T> Sub for Cursor<'_, T> {
    type Output = isize;
    #[inline]
    fn sub(self, origin: Self) -> isize {
        debug_assert!(self.same_storage(&origin), "subtracting cursors of different vectors");
        self.pos - origin.pos
    }
}

impl<'a, T> RandomAccess for Cursor<'a, T> {
    type Item = &'a T;

    #[inline]
    fn offset(self, n: isize) -> Self {
        self + n
    }

    #[inline]
    fn distance_from(self, origin: Self) -> isize {
        self - origin
    }

    #[inline]
    fn get(self) -> Option<&'a T> {
        Cursor::get(&self)
    }

    #[inline]
    unsafe fn get_unchecked(self) -> &'a T {
        // SAFETY: forwarded from the caller.
        unsafe { Cursor::get_unchecked(&self) }
    }
}

/// Walks a [`RandomAccess`] cursor backwards.
///
/// A reverse cursor wrapping position `i` refers to the element at `i - 1`,
/// so `Reverse::new(v.cursor_end())` is the first element of the reversed
/// sequence and `Reverse::new(v.cursor())` is one past its last.
///
/// # Examples
///
/// ```rust
/// use alloc_vector::AllocVec;
///
/// let v = AllocVec::from_slice(&[1, 2, 3]).unwrap();
/// let (mut r, end) = (v.rcursor(), v.rcursor_end());
/// let mut seen = Vec::new();
/// while r != end {
///     seen.push(*r.get().unwrap());
///     r.inc();
/// }
/// assert_eq!(seen, [3, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reverse<C> {
    current: C,
}

impl<C: RandomAccess> Reverse<C> {
    /// Wraps `base`; the new cursor refers to the element before it.
    #[inline]
    pub fn new(base: C) -> Self {
        Self { current: base }
    }

    /// The underlying cursor (one past the element this cursor refers to).
    #[inline]
    pub fn base(self) -> C {
        self.current
    }

    /// The referenced element, or `None` if out of range.
    #[inline]
    pub fn get(self) -> Option<C::Item> {
        self.current.offset(-1).get()
    }

    /// The referenced element, without a bounds check.
    ///
    /// # Safety
    ///
    /// `self.base()` minus one must be dereferenceable.
    #[inline]
    pub unsafe fn get_unchecked(self) -> C::Item {
        // SAFETY: forwarded from the caller.
        unsafe { self.current.offset(-1).get_unchecked() }
    }

    /// Subscript in reversed order: the element `n` reverse steps away.
    #[inline]
    pub fn at(self, n: isize) -> Option<C::Item> {
        self.current.offset(-n - 1).get()
    }

    /// Pre-increment: steps the underlying cursor back.
    #[inline]
    pub fn inc(&mut self) -> &mut Self {
        self.current = self.current.offset(-1);
        self
    }

    /// Pre-decrement: steps the underlying cursor forward.
    #[inline]
    pub fn dec(&mut self) -> &mut Self {
        self.current = self.current.offset(1);
        self
    }

    /// Post-increment.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.inc();
        old
    }

    /// Post-decrement.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.dec();
        old
    }
}

impl<C: RandomAccess> PartialOrd for Reverse<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<C: RandomAccess> Ord for Reverse<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.current.cmp(&self.current)
    }
}

impl<C: RandomAccess> Add<isize> for Reverse<C> {
    type Output = Self;
    #[inline]
    fn add(self, n: isize) -> Self {
        Self::new(self.current.offset(-n))
    }
}
impl<C: RandomAccess> Sub<isize> for Reverse<C> {
    type Output = Self;
    #[inline]
    fn sub(self, n: isize) -> Self {
        Self::new(self.current.offset(n))
    }
}
impl<C: RandomAccess> AddAssign<isize> for Reverse<C> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        *self = *self + n;
    }
}
impl<C: RandomAccess> SubAssign<isize> for Reverse<C> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        *self = *self - n;
    }
}
impl<C: RandomAccess> Sub for Reverse<C> {
    type Output = isize;
    #[inline]
    fn sub(self, origin: Self) -> isize {
        origin.current.distance_from(self.current)
    }
}

impl<C: RandomAccess> RandomAccess for Reverse<C> {
    type Item = C::Item;

    #[inline]
    fn offset(self, n: isize) -> Self {
        self + n
    }

    #[inline]
    fn distance_from(self, origin: Self) -> isize {
        self - origin
    }

    #[inline]
    fn get(self) -> Option<C::Item> {
        Reverse::get(self)
    }

    #[inline]
    unsafe fn get_unchecked(self) -> C::Item {
        // SAFETY: forwarded from the caller.
        unsafe { Reverse::get_unchecked(self) }
    }
}
