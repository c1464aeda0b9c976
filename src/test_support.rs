// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure-injection helpers shared by the unit tests.

// Crate imports
use crate::{
    allocator::{max_elements, AllocError, Allocator, Global},
    try_clone::TryClone,
};

// Std imports
use std::{
    cell::{Cell, RefCell},
    fmt,
    ptr::NonNull,
    rc::Rc,
    vec::Vec,
};

/// Lifecycle event of a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Created(i32),
    Dropped(i32),
}

/// Counts live [`Flaky`] values and records their lifecycle.
#[derive(Clone, Default)]
pub(crate) struct Tracker {
    live: Rc<Cell<isize>>,
    events: Rc<RefCell<Vec<Event>>>,
}

impl Tracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of values created and not yet dropped.
    pub(crate) fn live(&self) -> isize {
        self.live.get()
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub(crate) fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    fn created(&self, value: i32) {
        self.live.set(self.live.get() + 1);
        self.events.borrow_mut().push(Event::Created(value));
    }

    fn dropped(&self, value: i32) {
        self.live.set(self.live.get() - 1);
        self.events.borrow_mut().push(Event::Dropped(value));
    }
}

/// Shared clone budget: how many clones succeed before the next one fails.
#[derive(Clone, Default)]
pub(crate) struct Flakiness {
    remaining: Rc<Cell<Option<usize>>>,
    panics: bool,
}

impl Flakiness {
    pub(crate) fn never() -> Self {
        Self::default()
    }

    /// `n` clones succeed, the `n + 1`-th returns an error.
    pub(crate) fn after(n: usize) -> Self {
        let f = Self::default();
        f.arm(n);
        f
    }

    /// `n` clones succeed, the `n + 1`-th panics.
    pub(crate) fn panic_after(n: usize) -> Self {
        Self {
            panics: true,
            ..Self::after(n)
        }
    }

    pub(crate) fn arm(&self, n: usize) {
        self.remaining.set(Some(n));
    }

    pub(crate) fn disarm(&self) {
        self.remaining.set(None);
    }

    fn spend(&self) -> bool {
        match self.remaining.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.remaining.set(Some(n - 1));
                true
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CloneFailed;

impl fmt::Display for CloneFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("clone failed")
    }
}

impl std::error::Error for CloneFailed {}

/// An element whose copy fails on demand. Deliberately not `Clone`.
pub(crate) struct Flaky {
    value: i32,
    tracker: Tracker,
    flakiness: Flakiness,
}

impl Flaky {
    pub(crate) fn new(value: i32, tracker: &Tracker, flakiness: Flakiness) -> Self {
        tracker.created(value);
        Self {
            value,
            tracker: tracker.clone(),
            flakiness,
        }
    }

    pub(crate) fn value(&self) -> i32 {
        self.value
    }
}

impl TryClone for Flaky {
    type Error = CloneFailed;

    fn try_clone(&self) -> Result<Self, CloneFailed> {
        if !self.flakiness.spend() {
            if self.flakiness.panics {
                panic!("clone of {} panicked", self.value);
            }
            return Err(CloneFailed);
        }
        Ok(Flaky::new(self.value, &self.tracker, self.flakiness.clone()))
    }
}

impl Drop for Flaky {
    fn drop(&mut self) {
        self.tracker.dropped(self.value);
    }
}

impl PartialEq for Flaky {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flaky({})", self.value)
    }
}

/// Builds `values` as `Flaky` elements sharing `tracker` and `flakiness`.
pub(crate) fn flaky_values(values: &[i32], tracker: &Tracker, flakiness: &Flakiness) -> Vec<Flaky> {
    values
        .iter()
        .map(|&v| Flaky::new(v, tracker, flakiness.clone()))
        .collect()
}

pub(crate) fn values_of(items: &[Flaky]) -> Vec<i32> {
    items.iter().map(Flaky::value).collect()
}

#[derive(Default)]
struct AllocStats {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    fail_after: Cell<Option<usize>>,
}

/// Global-backed allocator that counts calls and can be told to fail.
#[derive(Clone, Default)]
pub(crate) struct CountingAlloc {
    stats: Rc<AllocStats>,
    max_size: Option<usize>,
}

impl CountingAlloc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_max_size(self, max: usize) -> Self {
        Self {
            max_size: Some(max),
            ..self
        }
    }

    /// `n` allocations succeed, every later one fails.
    pub(crate) fn fail_after(&self, n: usize) {
        self.stats.fail_after.set(Some(n));
    }

    pub(crate) fn allocations(&self) -> usize {
        self.stats.allocations.get()
    }

    pub(crate) fn deallocations(&self) -> usize {
        self.stats.deallocations.get()
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.allocations() - self.deallocations()
    }
}

// SAFETY: storage comes from `Global`.
unsafe impl<T> Allocator<T> for CountingAlloc {
    fn allocate(&self, n: usize) -> Result<NonNull<T>, AllocError> {
        match self.stats.fail_after.get() {
            Some(0) => return Err(AllocError),
            Some(k) => self.stats.fail_after.set(Some(k - 1)),
            None => {}
        }
        let ptr = Global.allocate(n)?;
        self.stats.allocations.set(self.allocations() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        self.stats.deallocations.set(self.deallocations() + 1);
        // SAFETY: `ptr` came from `Global.allocate(n)`.
        unsafe { Global.deallocate(ptr, n) }
    }

    fn max_size(&self) -> usize {
        self.max_size.unwrap_or(max_elements::<T>())
    }
}
