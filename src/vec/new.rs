// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constructors.
//!
//! Every sized constructor allocates exactly the number of slots it fills and
//! constructs left to right. If an element fails, the elements built so far
//! are destroyed in reverse order, the storage is released and the error is
//! returned: no vector comes into existence and nothing leaks.

// Crate imports
use crate::{
    allocator::{Allocator, Global},
    cursor::Cursor,
    engine::{self, Storage},
    error::Error,
    try_clone::TryClone,
    vec::AllocVec,
};

// Core imports
use core::{convert::Infallible, ptr::NonNull};

impl<T> AllocVec<T> {
    /// Constructs an empty vector on the global heap. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs an empty vector with room for exactly `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Constructs a vector of `count` clones of `value`.
    #[inline]
    pub fn from_elem(count: usize, value: &T) -> Result<Self, Error<T::Error>>
    where
        T: TryClone,
    {
        Self::from_elem_in(count, value, Global)
    }

    /// Constructs a vector of `count` default values.
    #[inline]
    pub fn with_len(count: usize) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::with_len_in(count, Global)
    }

    /// Constructs a vector holding clones of `src`, with `capacity == src.len()`.
    #[inline]
    pub fn from_slice(src: &[T]) -> Result<Self, Error<T::Error>>
    where
        T: TryClone,
    {
        Self::from_slice_in(src, Global)
    }

    /// Constructs a vector holding clones of the elements in `[first, last)`.
    ///
    /// Returns [`Error::InvalidRange`] if the cursors do not describe a range of
    /// one vector.
    #[inline]
    pub fn from_cursors(first: Cursor<'_, T>, last: Cursor<'_, T>) -> Result<Self, Error<T::Error>>
    where
        T: TryClone,
    {
        Self::from_cursors_in(first, last, Global)
    }
}

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Constructs an empty vector using `alloc`. Does not allocate.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        // SAFETY: the dangling sentinel with capacity 0 is never released.
        unsafe { Self::from_raw_parts(NonNull::dangling(), 0, 0, alloc) }
    }

    /// Constructs an empty vector with room for exactly `capacity` elements.
    ///
    /// Fails with [`Error::LengthLimit`] above [`Allocator::max_size`] and with
    /// [`Error::Alloc`] when the allocator refuses.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        let (ptr, cap) = Storage::new(&alloc, capacity)?.into_raw();
        // SAFETY: fresh storage from `alloc`, nothing constructed.
        Ok(unsafe { Self::from_raw_parts(ptr, cap, 0, alloc) })
    }

    /// Constructs a vector of `count` clones of `value` using `alloc`.
    ///
    /// `len == capacity == count` on success.
    pub fn from_elem_in(count: usize, value: &T, alloc: A) -> Result<Self, Error<T::Error>>
    where
        T: TryClone,
    {
        let storage = Storage::new(&alloc, count).map_err(Error::widen)?;
        // SAFETY: `count` fresh slots.
        unsafe { engine::fill(&alloc, storage.as_ptr(), count, value) }.map_err(Error::Element)?;
        let (ptr, cap) = storage.into_raw();
        // SAFETY: all `count` slots were constructed.
        Ok(unsafe { Self::from_raw_parts(ptr, cap, count, alloc) })
    }

    /// Constructs a vector of `count` default values using `alloc`.
    pub fn with_len_in(count: usize, alloc: A) -> Result<Self, Error>
    where
        T: Default,
    {
        let storage = Storage::new(&alloc, count)?;
        // SAFETY: `count` fresh slots.
        unsafe {
            engine::construct_with(&alloc, storage.as_ptr(), count, |_| {
                Ok::<T, Infallible>(T::default())
            })
        }
        .map_err(Error::Element)?;
        let (ptr, cap) = storage.into_raw();
        // SAFETY: all `count` slots were constructed.
        Ok(unsafe { Self::from_raw_parts(ptr, cap, count, alloc) })
    }

    /// Constructs a vector holding clones of `src` using `alloc`.
    pub fn from_slice_in(src: &[T], alloc: A) -> Result<Self, Error<T::Error>>
    where
        T: TryClone,
    {
        let count = src.len();
        let storage = Storage::new(&alloc, count).map_err(Error::widen)?;
        // SAFETY: `count` fresh slots.
        unsafe { engine::clone_slice(&alloc, storage.as_ptr(), src) }.map_err(Error::Element)?;
        let (ptr, cap) = storage.into_raw();
        // SAFETY: all `count` slots were constructed.
        Ok(unsafe { Self::from_raw_parts(ptr, cap, count, alloc) })
    }

    /// Constructs a vector holding clones of `[first, last)` using `alloc`.
    pub fn from_cursors_in(
        first: Cursor<'_, T>,
        last: Cursor<'_, T>,
        alloc: A,
    ) -> Result<Self, Error<T::Error>>
    where
        T: TryClone,
    {
        let src = first.slice_to(last).ok_or(Error::InvalidRange)?;
        Self::from_slice_in(src, alloc)
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::{
        test_support::{flaky_values, values_of, CloneFailed, CountingAlloc, Flakiness, Flaky, Tracker},
        AllocVec, Error,
    };

    #[test]
    fn test_from_elem_len_equals_capacity() {
        for n in [0usize, 1, 2, 17] {
            let v = AllocVec::from_elem(n, &"x").unwrap();
            assert_eq!(v.len(), n);
            assert_eq!(v.capacity(), n);
            assert!(v.iter().all(|s| *s == "x"));
        }
    }

    #[test]
    fn test_with_len_uses_default() {
        let v: AllocVec<u8> = AllocVec::with_len(4).unwrap();
        assert_eq!(v, [0, 0, 0, 0]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn test_with_capacity_is_empty() {
        let alloc = CountingAlloc::new();
        let v: AllocVec<u64, _> = AllocVec::with_capacity_in(8, alloc.clone()).unwrap();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 8);
        assert_eq!(alloc.allocations(), 1);
    }

    #[test]
    fn test_with_capacity_over_max_is_length_limit() {
        let alloc = CountingAlloc::new().with_max_size(4);
        let err = AllocVec::<u8, _>::with_capacity_in(5, alloc.clone()).unwrap_err();
        assert_eq!(err, Error::LengthLimit { requested: 5, max: 4 });
        assert_eq!(alloc.allocations(), 0);
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let alloc = CountingAlloc::new();
        alloc.fail_after(0);
        let err = AllocVec::from_elem_in(3, &1u8, alloc).unwrap_err();
        assert!(matches!(err, Error::Alloc(_)));
    }

    #[test]
    fn test_from_elem_failure_rolls_back_and_releases() {
        let tracker = Tracker::new();
        let alloc = CountingAlloc::new();
        let seed = Flaky::new(1, &tracker, Flakiness::after(2));

        let err = AllocVec::from_elem_in(5, &seed, alloc.clone()).unwrap_err();
        assert_eq!(err, Error::Element(CloneFailed));
        assert_eq!(tracker.live(), 1, "only the seed survives");
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_from_slice_failure_rolls_back_in_reverse() {
        use crate::test_support::Event;

        let tracker = Tracker::new();
        let flakiness = Flakiness::never();
        let src = flaky_values(&[1, 2, 3, 4], &tracker, &flakiness);
        tracker.clear_events();
        flakiness.arm(3);

        let err = AllocVec::from_slice(&src).unwrap_err();
        assert_eq!(err, Error::Element(CloneFailed));
        assert_eq!(
            tracker.events(),
            [
                Event::Created(1),
                Event::Created(2),
                Event::Created(3),
                Event::Dropped(3),
                Event::Dropped(2),
                Event::Dropped(1),
            ]
        );
        assert_eq!(tracker.live(), 4);
    }

    #[test]
    #[should_panic(expected = "clone of 2 panicked")]
    fn test_from_slice_panic_propagates() {
        let tracker = Tracker::new();
        let flakiness = Flakiness::panic_after(1);
        let src = [
            Flaky::new(1, &tracker, flakiness.clone()),
            Flaky::new(2, &tracker, flakiness.clone()),
        ];
        let _ = AllocVec::from_slice(&src);
    }

    #[test]
    fn test_from_slice_panic_leaks_nothing() {
        let tracker = Tracker::new();
        let alloc = CountingAlloc::new();
        let src = flaky_values(&[1, 2, 3], &tracker, &Flakiness::panic_after(2));

        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            AllocVec::from_slice_in(&src, alloc.clone())
        }));
        assert!(res.is_err());
        assert_eq!(tracker.live(), 3);
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_from_cursors_copies_range() {
        let src = AllocVec::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        let v = AllocVec::from_cursors(src.cursor_at(1), src.cursor_end()).unwrap();
        assert_eq!(v, [2, 3, 4, 5]);
        assert_eq!(v.capacity(), 4);

        let empty = AllocVec::from_cursors(src.cursor(), src.cursor()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_from_cursors_rejects_unmeasurable_ranges() {
        let a = AllocVec::from_slice(&[1, 2, 3]).unwrap();
        let b = AllocVec::from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(
            AllocVec::from_cursors(a.cursor_end(), a.cursor()).unwrap_err(),
            Error::InvalidRange
        );
        assert_eq!(
            AllocVec::from_cursors(a.cursor(), b.cursor_end()).unwrap_err(),
            Error::InvalidRange
        );
        assert_eq!(
            AllocVec::from_cursors(a.cursor(), a.cursor_end() + 1).unwrap_err(),
            Error::InvalidRange
        );
    }

    #[test]
    fn test_from_slice_of_flaky_values() {
        let tracker = Tracker::new();
        let src = flaky_values(&[7, 8], &tracker, &Flakiness::never());
        let v = AllocVec::from_slice(&src).unwrap();
        assert_eq!(values_of(&v), [7, 8]);
        assert_eq!(tracker.live(), 4);
    }
}
