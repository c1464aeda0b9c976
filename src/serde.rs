// This file is part of alloc-vector.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `serde` support for [`AllocVec`](crate::AllocVec).
//!
//! - **Serialize**: as a sequence of the `len` live elements.
//! - **Deserialize**: from any sequence, appending with the usual growth
//!   policy. The allocator is built with `A::default()`, so
//!   `AllocVec<T, A>: Deserialize` requires `A: Default`.
//!
//! Storage failures while deserializing (allocation or
//! [`max_size`](crate::AllocVec::max_size)) surface as a custom deserializer
//! error carrying the [`Error`](crate::Error) message.

// Crate imports
use crate::{allocator::Allocator, vec::AllocVec};

// Core imports
use core::{fmt, marker::PhantomData};

// External imports - serde
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

impl<T: Serialize, A: Allocator<T>> Serialize for AllocVec<T, A> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use ser::SerializeSeq;
        let sl = self.as_slice();
        let mut seq = s.serialize_seq(Some(sl.len()))?;
        for item in sl {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct VecVisitor<T, A>(PhantomData<(T, A)>);

impl<'de, T, A> de::Visitor<'de> for VecVisitor<T, A>
where
    T: Deserialize<'de>,
    A: Allocator<T> + Default,
{
    type Value = AllocVec<T, A>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<S: de::SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
        let mut out = AllocVec::<T, A>::default();
        // The hint is untrusted input; never reserve more than the allocator allows.
        if let Some(hint) = seq.size_hint() {
            out.reserve(hint.min(out.max_size())).map_err(de::Error::custom)?;
        }
        while let Some(elem) = seq.next_element::<T>()? {
            out.push(elem).map_err(de::Error::custom)?;
        }
        Ok(out)
    }
}

impl<'de, T, A> Deserialize<'de> for AllocVec<T, A>
where
    T: Deserialize<'de>,
    A: Allocator<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_seq(VecVisitor::<T, A>(PhantomData))
    }
}
