//! A module containing [`Vector`]. [`IterMut`](std::slice::IterMut) and
//! [`Iter`](std::slice::Iter) from [`std::slice`] are used for borrowed iteration, there is no
//! owned iterator because the elements are [`Copy`].
//!
//! [`Vector`] is also re-exported under the parent module.

mod vector;

pub use vector::*;
