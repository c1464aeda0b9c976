// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `alloc-vector`
//!
//! A `no_std` + `alloc`, growable, contiguous vector that is generic over an
//! injected [`Allocator`] and documents a failure-safety guarantee for every
//! mutating operation.
//!
//! The core type, [`AllocVec<T, A>`], owns exactly one allocation of
//! `capacity` slots and tracks a logical length `len ∈ 0..=capacity`. Only the
//! prefix `[0..len)` holds live elements.
//!
//! ## When to use this crate
//!
//! This crate may be useful when:
//!
//! - You need to know *exactly* what state a container is in after an element
//!   clone fails halfway through a bulk operation.
//! - You want to plug in your own allocation strategy (counting, arenas,
//!   fault injection) without nightly `allocator_api`.
//! - Your element types have a fallible copy operation ([`TryClone`]).
//!
//! If none of that matters to you, `alloc::vec::Vec` is the better choice.
//!
//! ## Failure model
//!
//! Three things can go wrong inside a mutating operation:
//!
//! - the allocator cannot provide storage ([`Error::Alloc`]) or the request is
//!   larger than it can represent ([`Error::LengthLimit`]);
//! - an element's [`TryClone::try_clone`] returns an error
//!   ([`Error::Element`], passed through unchanged);
//! - element code panics.
//!
//! In every case the bulk construct/destroy engine destroys exactly the
//! elements it had already built, in reverse order, before the failure leaves
//! the operation. What the container looks like afterwards depends on the
//! operation:
//!
//! | Operation | Guarantee |
//! |---|---|
//! | constructors, [`try_clone`](AllocVec::try_clone) | no container is produced, nothing leaks |
//! | [`try_clone_from`](AllocVec::try_clone_from) | strong |
//! | [`reserve`](AllocVec::reserve) | strong |
//! | [`insert`](AllocVec::insert), [`push`](AllocVec::push) | strong |
//! | `assign*` that must grow | strong |
//! | `assign*` that fits in the current capacity | basic: the vector is left empty |
//!
//! *Strong* means the vector is exactly as it was before the call. *Basic*
//! means the vector is valid (lengths, capacity and drop accounting are
//! consistent) but its contents are unspecified.
//!
//! ## Features
//!
//! - `serde`: `Serialize` / `Deserialize` for `AllocVec<T, A>` (deserialization
//!   requires `A: Default`).
//! - `log`: emits `trace`/`debug` records through the [`log`](https://docs.rs/log)
//!   facade on reallocation, copy-assignment and rollback.
//!
//! ## Example
//!
//! ```rust
//! use alloc_vector::AllocVec;
//!
//! let mut v = AllocVec::from_slice(&[1, 2]).unwrap();
//! assert_eq!(v.capacity(), 2);
//!
//! let at = v.insert(1, 9).unwrap();
//! assert_eq!(at.get(), Some(&9));
//! assert_eq!(v.as_slice(), &[1, 9, 2]);
//! assert!(v.capacity() >= 3);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Crate-internal logging: forwards to `log` when the feature is enabled and
// type-checks the arguments (without evaluating them) otherwise.
macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
        #[cfg(not(feature = "log"))]
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
        #[cfg(not(feature = "log"))]
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

// Modules
mod allocator;
mod cursor;
mod engine;
mod error;
mod growth;
mod index;
mod iter;
#[cfg(feature = "serde")]
mod serde;
#[cfg(test)]
mod test_support;
mod try_clone;
mod vec;

// Public exports (crate API surface)
pub use allocator::{AllocError, Allocator, Global};
pub use cursor::{Cursor, RandomAccess, Reverse};
pub use error::Error;
pub use iter::IntoIter;
pub use try_clone::TryClone;
pub use vec::AllocVec;
