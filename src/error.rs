// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for `AllocVec`.
//!
//! `Error<E>` is generic over the element error `E` reported by
//! [`TryClone`](crate::TryClone). Operations that never clone elements use the
//! default `E = Infallible`.

// Crate imports
use crate::allocator::AllocError;

// Core imports
use core::{convert::Infallible, error::Error as CoreError, fmt};

/// Errors returned by operations on [`AllocVec`](crate::AllocVec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error<E = Infallible> {
    /// A bounds-checked index or insert position was past the live elements.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the vector at the time of the call.
        len: usize,
    },
    /// The requested capacity exceeds [`Allocator::max_size`](crate::Allocator::max_size).
    LengthLimit {
        /// The capacity that was asked for.
        requested: usize,
        /// The largest element count the allocator can represent.
        max: usize,
    },
    /// The allocator could not provide storage.
    Alloc(AllocError),
    /// A pair of cursors did not describe a range of a single vector.
    InvalidRange,
    /// Cloning an element failed; the element's error is passed through unchanged.
    Element(E),
}

impl<E> Error<E> {
    /// Returns the element error, if this is [`Error::Element`].
    pub fn into_element(self) -> Option<E> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Re-types an error that cannot carry an element failure.
    pub(crate) fn widen(err: Error) -> Self {
        match err {
            Error::OutOfRange { index, len } => Self::OutOfRange { index, len },
            Error::LengthLimit { requested, max } => Self::LengthLimit { requested, max },
            Error::Alloc(e) => Self::Alloc(e),
            Error::InvalidRange => Self::InvalidRange,
            Error::Element(never) => match never {},
        }
    }
}

impl<E> From<AllocError> for Error<E> {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::LengthLimit { requested, max } => {
                write!(f, "requested capacity {requested} exceeds maximum {max}")
            }
            Self::Alloc(e) => fmt::Display::fmt(e, f),
            Self::InvalidRange => f.write_str("invalid cursor range"),
            Self::Element(e) => write!(f, "element operation failed: {e}"),
        }
    }
}

impl<E: CoreError + 'static> CoreError for Error<E> {
    fn source(&self) -> Option<&(dyn CoreError + 'static)> {
        match self {
            Self::Alloc(e) => Some(e),
            Self::Element(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use crate::{AllocError, Error};
    use alloc::string::{String, ToString};
    use core::error::Error as CoreError;

    fn takes_error(e: &dyn CoreError) -> String {
        e.to_string()
    }

    #[derive(Debug, PartialEq)]
    struct Boom;

    impl core::fmt::Display for Boom {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("boom")
        }
    }

    impl CoreError for Boom {}

    #[test]
    fn test_error_is_core_error() {
        let s = takes_error(&Error::<core::convert::Infallible>::OutOfRange { index: 3, len: 2 });
        assert!(s.contains("out of range"));
    }

    #[test]
    fn test_display_messages() {
        let e: Error = Error::LengthLimit {
            requested: 10,
            max: 4,
        };
        assert_eq!(e.to_string(), "requested capacity 10 exceeds maximum 4");
        assert_eq!(
            Error::<Boom>::Element(Boom).to_string(),
            "element operation failed: boom"
        );
        let e: Error = AllocError.into();
        assert_eq!(e.to_string(), "memory allocation failed");
        let e: Error = Error::InvalidRange;
        assert_eq!(e.to_string(), "invalid cursor range");
    }

    #[test]
    fn test_source_points_at_element_error() {
        let e = Error::Element(Boom);
        let src = e.source().expect("element errors expose a source");
        assert_eq!(src.to_string(), "boom");
        assert!(Error::<Boom>::InvalidRange.source().is_none());
    }

    #[test]
    fn test_widen_and_into_element() {
        let e: Error<Boom> = Error::widen(Error::OutOfRange { index: 1, len: 0 });
        assert_eq!(e, Error::OutOfRange { index: 1, len: 0 });
        assert_eq!(e.into_element(), None);
        assert_eq!(Error::Element(Boom).into_element(), Some(Boom));
    }
}
