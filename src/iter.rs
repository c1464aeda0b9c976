// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Iterator support for [`AllocVec`](crate::AllocVec).
//!
//! - `IntoIter<T, A>` yields by value and supports `DoubleEndedIterator`,
//!   `ExactSizeIterator`, and `FusedIterator`. Elements it never yields are
//!   destroyed (in reverse) when it is dropped, and the storage goes back to
//!   the allocator.
//! - `&AllocVec` and `&mut AllocVec` iterate as slices.

// Crate imports
use crate::{
    allocator::{Allocator, Global},
    engine,
    vec::AllocVec,
};

// Core imports
use core::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem::ManuallyDrop,
    ptr::{self, NonNull},
    slice,
};

/// Owned iterator returned by `AllocVec::into_iter()`.
///
/// Yields elements by value from front to back and supports double-ended
/// iteration via [`DoubleEndedIterator`].
pub struct IntoIter<T, A: Allocator<T> = Global> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    front: usize,
    back: usize, // exclusive
    _marker: PhantomData<T>,
}

// SAFETY: same ownership as the `AllocVec` it came from.
unsafe impl<T: Send, A: Allocator<T> + Send> Send for IntoIter<T, A> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync, A: Allocator<T> + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator<T>> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().add(self.front), self.back - self.front) }
    }

    /// Moves out the element at `i`.
    ///
    /// # Safety
    ///
    /// `i` was in `[front, back)` and has just been removed from that range.
    #[inline]
    unsafe fn read_at(&self, i: usize) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { ptr::read(self.ptr.as_ptr().add(i)) }
    }
}

impl<T, A: Allocator<T>> Iterator for IntoIter<T, A> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.front < self.back {
            let i = self.front;
            self.front += 1;
            // SAFETY: `i` just left the live range.
            Some(unsafe { self.read_at(i) })
        } else {
            None
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.back - self.front;
        (rem, Some(rem))
    }
    fn nth(&mut self, n: usize) -> Option<T> {
        let rem = self.back - self.front;
        let skip = n.min(rem);
        let start = self.front;
        self.front += skip;
        // SAFETY: the skipped elements left the live range and are destroyed here.
        unsafe { engine::destroy_range(&self.alloc, self.ptr.add(start), skip) };
        self.next()
    }
}

impl<T, A: Allocator<T>> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: `back` just left the live range.
            Some(unsafe { self.read_at(self.back) })
        } else {
            None
        }
    }
    fn nth_back(&mut self, n: usize) -> Option<T> {
        let rem = self.back - self.front;
        let skip = n.min(rem);
        self.back -= skip;
        // SAFETY: the skipped elements left the live range and are destroyed here.
        unsafe { engine::destroy_range(&self.alloc, self.ptr.add(self.back), skip) };
        self.next_back()
    }
}
impl<T, A: Allocator<T>> FusedIterator for IntoIter<T, A> {}
impl<T, A: Allocator<T>> ExactSizeIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator<T>> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator<T>> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;
        // SAFETY: `[front, back)` was live and is now unreachable; the storage
        // is released exactly once.
        unsafe {
            engine::destroy_range(&self.alloc, self.ptr.add(front), back - front);
            engine::release(&self.alloc, self.ptr, self.cap);
        }
    }
}

impl<'a, T, A: Allocator<T>> IntoIterator for &'a AllocVec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
impl<'a, T, A: Allocator<T>> IntoIterator for &'a mut AllocVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
impl<T, A: Allocator<T>> IntoIterator for AllocVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;
    fn into_iter(self) -> Self::IntoIter {
        let v = ManuallyDrop::new(self);
        // SAFETY: `v` is never dropped, so the allocator is moved out exactly once.
        let alloc = unsafe { ptr::read(&v.alloc) };
        IntoIter {
            ptr: v.ptr,
            cap: v.cap,
            alloc,
            front: 0,
            back: v.len,
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::{
        test_support::{flaky_values, CountingAlloc, Event, Flakiness, Tracker},
        AllocVec,
    };

    #[test]
    fn test_double_ended_and_nth() {
        let v = AllocVec::from_slice(&[10, 20, 30, 40]).unwrap();
        let mut it = v.into_iter();
        assert_eq!(it.next(), Some(10));
        assert_eq!(it.next_back(), Some(40));
        assert_eq!(it.nth(1), Some(30));
        assert_eq!(it.next(), None);

        let v = AllocVec::from_slice(&[10, 20, 30, 40]).unwrap();
        let mut it = v.into_iter();
        assert_eq!(it.nth(1), Some(20));
        assert_eq!(it.as_slice(), &[30, 40]);
    }

    #[test]
    fn test_next_and_next_back_move_elements_out() {
        let v = AllocVec::from_slice(&[String::from("a"), String::from("b"), String::from("c")])
            .unwrap();
        let mut it = v.into_iter();
        let first: String = it.next().unwrap();
        let last: String = it.next_back().unwrap();
        assert_eq!((first.as_str(), last.as_str()), ("a", "c"));
        assert_eq!(it.collect::<Vec<String>>(), ["b"]);
    }

    #[test]
    fn test_into_iter_nth_back_sequence() {
        let v = AllocVec::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        let mut it = v.into_iter();
        assert_eq!(it.nth_back(0), Some(5));
        assert_eq!(it.nth_back(1), Some(3));
        assert_eq!(it.next_back(), Some(2));
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), None);
    }

    #[test]
    #[allow(clippy::iter_nth_zero)]
    fn test_size_hint_tracks_consumption() {
        let v = AllocVec::from_slice(&[10, 20, 30, 40]).unwrap();
        let mut it = v.into_iter();
        assert_eq!(it.size_hint(), (4, Some(4)));
        assert_eq!(it.next(), Some(10));
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.next_back(), Some(40));
        assert_eq!(it.size_hint(), (2, Some(2)));
        assert_eq!(it.nth(0), Some(20));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next(), Some(30));
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_nth_back_past_end_drains() {
        let v = AllocVec::from_slice(&[10, 20, 30]).unwrap();
        let mut it = v.into_iter();
        assert_eq!(it.nth_back(3), None);
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
        assert_eq!(it.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_into_iter_zero_sized_type() {
        let v: AllocVec<()> = AllocVec::with_len(3).unwrap();
        let it = v.into_iter();
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.count(), 3);
    }

    #[test]
    fn test_drop_destroys_remainder_and_releases() {
        let tracker = Tracker::new();
        let alloc = CountingAlloc::new();
        let v = AllocVec::from_slice_in(
            &flaky_values(&[1, 2, 3, 4], &tracker, &Flakiness::never()),
            alloc.clone(),
        )
        .unwrap();
        tracker.clear_events();

        let mut it = v.into_iter();
        let first = it.next().unwrap();
        assert_eq!(first.value(), 1);
        drop(it);
        assert_eq!(
            tracker.events(),
            [Event::Dropped(4), Event::Dropped(3), Event::Dropped(2)]
        );
        assert_eq!(alloc.outstanding(), 0);
        drop(first);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_nth_destroys_skipped_elements() {
        let tracker = Tracker::new();
        let v = AllocVec::from_slice(&flaky_values(&[1, 2, 3], &tracker, &Flakiness::never()))
            .unwrap();
        let mut it = v.into_iter();
        let third = it.nth(2).unwrap();
        assert_eq!(third.value(), 3);
        assert_eq!(tracker.live(), 1);
    }

    #[test]
    fn test_borrowing_iterators() {
        let mut v = AllocVec::from_slice(&[1, 2, 3]).unwrap();
        for x in &mut v {
            *x *= 10;
        }
        let mut sum = 0;
        for x in &v {
            sum += *x;
        }
        assert_eq!(sum, 60);
    }
}
