// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

// Crate imports
use crate::{
    allocator::Global,
    error::Error,
    try_clone::TryClone,
    vec::{expect_storage, AllocVec},
};

impl<T, const N: usize> From<[T; N]> for AllocVec<T> {
    /// Moves the array's elements into a vector with `capacity == N`.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide storage.
    fn from(array: [T; N]) -> Self {
        expect_storage(Self::from_iter_in(array, Global))
    }
}

impl<T: TryClone> TryFrom<&[T]> for AllocVec<T> {
    type Error = Error<T::Error>;

    fn try_from(src: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}
