//! Open addressing hash tables keyed by precomputed `u64` hashes.
//!
//! Neither table ever sees the original key: two keys with the same hash are the same entry.
//! Produce hashes with the functions in [`crate::hash`], [`Str::hash64`](crate::text::Str::hash64)
//! or [`Fnv1aBuildHasher`](crate::hash::Fnv1aBuildHasher).

pub mod map;
pub mod set;

#[doc(inline)]
pub use map::HashMap;
#[doc(inline)]
pub use set::Set;
