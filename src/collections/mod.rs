//! Growable collections whose storage lives in an [`Arena`](crate::Arena).
//!
//! # Purpose
//! Every collection here borrows the arena it allocates from, so none of them frees memory on
//! drop: storage is reclaimed when the arena is reset or freed. In exchange, each one can be
//! abandoned, copied into another arena, or turned into a plain slice without any bookkeeping.
//!
//! # Method
//! Elements are restricted to [`Copy`] types. Nothing is ever dropped in place, so growing a
//! collection is a plain reallocation of its [`OwnedChunk`](crate::arena::OwnedChunk) and removing
//! an element never runs a destructor.
//!
//! [`Vector`](contiguous::Vector) implements [`Deref<Target = [T]>`](std::ops::Deref) (and
//! DerefMut), which provides indexing, iteration and the other slice methods for free.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
