//! The [`Arena`] region allocator and the [`OwnedChunk`] handles it hands out.
mod arena;
mod chunk;

pub use arena::*;
pub use chunk::OwnedChunk;

pub use crate::util::error::{ArenaError, CapacityOverflow, OutOfMemory};
