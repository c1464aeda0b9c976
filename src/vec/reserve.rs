// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capacity management.

// Crate imports
use crate::{
    allocator::Allocator,
    engine::{self, Storage},
    error::Error,
    growth::grown_capacity,
    vec::AllocVec,
};

impl<T, A: Allocator<T>> AllocVec<T, A> {
    /// Ensures `capacity() >= new_cap`.
    ///
    /// Does nothing if the capacity already suffices. Otherwise the elements
    /// are moved into a new buffer of exactly `new_cap` slots and the old
    /// buffer is released.
    ///
    /// **Guarantee: strong.** Fails with [`Error::LengthLimit`] if `new_cap`
    /// exceeds [`max_size`](AllocVec::max_size), or [`Error::Alloc`]; the
    /// vector is untouched either way.
    pub fn reserve(&mut self, new_cap: usize) -> Result<(), Error> {
        if new_cap <= self.cap {
            return Ok(());
        }
        let max = self.max_size();
        if new_cap > max {
            return Err(Error::LengthLimit {
                requested: new_cap,
                max,
            });
        }
        self.reallocate(new_cap)
    }

    /// Reduces the capacity to the length, if it is larger.
    ///
    /// **Guarantee: strong.**
    pub fn shrink_to_fit(&mut self) -> Result<(), Error> {
        if self.cap == self.len {
            return Ok(());
        }
        self.reallocate(self.len)
    }

    /// Grows per the growth policy so that `additional` more elements fit.
    pub(crate) fn grow_for(&mut self, additional: usize) -> Result<(), Error> {
        if additional <= self.spare_capacity() {
            return Ok(());
        }
        let new_cap = grown_capacity(self.len, additional, self.max_size())?;
        self.reallocate(new_cap)
    }

    fn reallocate(&mut self, new_cap: usize) -> Result<(), Error> {
        debug_assert!(new_cap >= self.len);
        let storage = Storage::new(&self.alloc, new_cap)?;
        let (ptr, cap) = storage.into_raw();
        // SAFETY: the new buffer is distinct and holds at least `len` slots.
        // Relocation is a bitwise move and cannot fail.
        unsafe {
            engine::relocate(self.ptr, ptr, self.len);
            self.replace_storage(ptr, cap);
        }
        trace!("reallocated {} elements into {cap} slots", self.len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::{
        test_support::{flaky_values, values_of, CountingAlloc, Flakiness, Tracker},
        AllocVec, Error,
    };

    #[test]
    fn test_reserve_sets_exact_capacity() {
        let mut v = AllocVec::from_slice(&[1, 2]).unwrap();
        v.reserve(10).unwrap();
        assert_eq!(v.capacity(), 10);
        assert_eq!(v, [1, 2]);

        v.reserve(4).unwrap();
        assert_eq!(v.capacity(), 10, "never shrinks");
    }

    #[test]
    fn test_reserve_moves_without_cloning_or_dropping() {
        let tracker = Tracker::new();
        let flakiness = Flakiness::never();
        let mut v = AllocVec::from_slice(&flaky_values(&[1, 2, 3], &tracker, &flakiness)).unwrap();
        tracker.clear_events();
        // Any clone during relocation would fail.
        flakiness.arm(0);

        v.reserve(64).unwrap();
        assert!(tracker.events().is_empty());
        assert_eq!(values_of(&v), [1, 2, 3]);
        assert_eq!(tracker.live(), 3);
    }

    #[test]
    fn test_reserve_failure_is_strong() {
        let alloc = CountingAlloc::new().with_max_size(16);
        let mut v = AllocVec::from_slice_in(&[1, 2, 3], alloc.clone()).unwrap();

        assert_eq!(
            v.reserve(17),
            Err(Error::LengthLimit { requested: 17, max: 16 })
        );
        alloc.fail_after(0);
        assert!(matches!(v.reserve(8), Err(Error::Alloc(_))));

        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v.capacity(), 3);
        assert_eq!(alloc.outstanding(), 1);
    }

    #[test]
    fn test_reserve_on_empty_vector() {
        let alloc = CountingAlloc::new();
        let mut v: AllocVec<String, _> = AllocVec::new_in(alloc.clone());
        v.reserve(0).unwrap();
        assert_eq!(alloc.allocations(), 0);
        v.reserve(5).unwrap();
        assert_eq!(v.capacity(), 5);
        assert_eq!(alloc.allocations(), 1);
        assert_eq!(alloc.deallocations(), 0);
    }

    #[test]
    fn test_shrink_to_fit() {
        let alloc = CountingAlloc::new();
        let mut v = AllocVec::with_capacity_in(10, alloc.clone()).unwrap();
        v.push(1u8).unwrap();
        v.push(2).unwrap();
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 2);
        assert_eq!(v, [1, 2]);

        v.clear();
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 0);
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_grow_for_follows_policy() {
        let mut v = AllocVec::from_slice(&[0u8; 3]).unwrap();
        v.grow_for(1).unwrap();
        assert_eq!(v.capacity(), 8);
        v.grow_for(5).unwrap();
        assert_eq!(v.capacity(), 8);
        v.grow_for(6).unwrap();
        assert_eq!(v.capacity(), 18);
    }
}
