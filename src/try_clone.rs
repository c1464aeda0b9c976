// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallible element copies.

// Core imports
use core::convert::Infallible;

/// A copy operation that may fail.
///
/// Every bulk operation of [`AllocVec`](crate::AllocVec) that copies elements
/// (fill construction, range construction, copy-assignment, `assign`) goes
/// through this trait, and hands any error back unchanged as
/// [`Error::Element`](crate::Error::Element).
///
/// Every `Clone` type implements it with `Error = Infallible`. Types whose copy
/// can fail (handles to external resources, bounded pools) implement it
/// directly instead of `Clone`.
///
/// # Examples
///
/// ```rust
/// use alloc_vector::{AllocVec, Error, TryClone};
///
/// #[derive(Debug, PartialEq)]
/// struct Ticket(u32);
///
/// impl TryClone for Ticket {
///     type Error = &'static str;
///     fn try_clone(&self) -> Result<Self, Self::Error> {
///         if self.0 == 0 { Err("sold out") } else { Ok(Ticket(self.0)) }
///     }
/// }
///
/// let err = AllocVec::from_elem(3, &Ticket(0)).unwrap_err();
/// assert_eq!(err, Error::Element("sold out"));
/// ```
pub trait TryClone: Sized {
    /// The failure reported by [`try_clone`](TryClone::try_clone).
    type Error;

    /// Returns a copy of `self`, or the reason one could not be made.
    fn try_clone(&self) -> Result<Self, Self::Error>;
}

impl<T: Clone> TryClone for T {
    type Error = Infallible;

    #[inline]
    fn try_clone(&self) -> Result<Self, Infallible> {
        Ok(self.clone())
    }
}
