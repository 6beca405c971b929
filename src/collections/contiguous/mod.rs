//! Contiguous collections. Currently this is only [`Vector`], the arena's growable array.

pub mod vector;

#[doc(inline)]
pub use vector::Vector;
