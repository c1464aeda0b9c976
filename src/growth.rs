// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Growth policy: how much capacity to ask for when the current one runs out.

// Crate imports
use crate::error::Error;

/// Multiplier applied to the required length when growing.
///
/// Anything greater than one keeps repeated appends amortized `O(1)`.
pub(crate) const GROWTH_FACTOR: usize = 2;

/// Capacity to allocate so that `additional` more elements fit after `len`.
///
/// Returns `GROWTH_FACTOR * (len + additional)`, clamped to `max`. Fails with
/// [`Error::LengthLimit`] when `len + additional` itself cannot be represented.
pub(crate) fn grown_capacity(len: usize, additional: usize, max: usize) -> Result<usize, Error> {
    let required = len.checked_add(additional).ok_or(Error::LengthLimit {
        requested: usize::MAX,
        max,
    })?;
    if required > max {
        return Err(Error::LengthLimit {
            requested: required,
            max,
        });
    }
    Ok(required.saturating_mul(GROWTH_FACTOR).min(max))
}
