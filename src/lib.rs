//! Region-based building blocks: an [`Arena`] allocator and the containers and string views that
//! live inside one.
//!
//! # Purpose
//! Most of the data a short-lived program builds dies at the same time: a parsed file, the words
//! of a line, the table used to count them. This crate hands all of it to an [`Arena`] and
//! reclaims everything at once, instead of freeing objects one by one.
//!
//! # Method
//! Everything that allocates borrows an [`Arena`] for a lifetime `'a`, so the borrow checker
//! guarantees that no [`Vector`](collections::contiguous::Vector),
//! [`HashMap`](collections::hash::HashMap) or [`Str`](text::Str) outlives the memory it points
//! into. Resetting or freeing an arena needs `&mut Arena`, which can only be obtained once every
//! such borrow is gone.
//!
//! # Error Handling
//! Running out of memory is not a reason for a library to abort the process, so every operation
//! that can allocate returns a [`Result`] carrying an [`ArenaError`]. Lookups that can miss return
//! [`Option`]s. Positional mutation with an invalid index (inserting into or removing from a
//! [`Vector`](collections::contiguous::Vector)) is a logic error and panics, documented on the
//! method.
//!
//! # Dependencies
//! Error types are derived with `derive_more`. The optional `logging` feature routes chunk and
//! table events through the `log` facade; without it, no logging code is compiled at all.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[macro_use]
pub(crate) mod util;

pub mod arena;
#[cfg(feature = "collections")]
pub mod collections;
#[cfg(feature = "text")]
pub mod text;

#[doc(inline)]
pub use arena::{Arena, ArenaError};
pub use util::error::IndexOutOfBounds;
pub use util::hash;
