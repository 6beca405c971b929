//! A module containing [`Set`].
//!
//! There is no mutable iteration over a set, because rewriting a hash in place would leave it in
//! the wrong bucket.
//!
//! [`Set`] is also re-exported under the parent module.

mod set;

pub use set::*;

#[doc(inline)]
pub use super::map::Keys;
