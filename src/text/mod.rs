//! Views of text and binary data, and the tools to build new text in an [`Arena`](crate::Arena).
//!
//! [`Str`] is the workhorse: a borrowed, length-delimited run of bytes with searching, trimming,
//! chopping and parsing that never allocate, and transformations that allocate their results in an
//! arena. [`Bytes`] is the same view for binary data. [`StringBuilder`] assembles text piece by
//! piece, and [`str_format!`](crate::str_format) formats straight into an arena.

mod builder;
mod bytes;
mod format;
mod parse;
mod string;
mod tests;

pub use builder::StringBuilder;
pub use bytes::Bytes;
pub use parse::ParseNumberError;
pub use string::{SortOrder, SplitByDelim, Str, comparator, is_space};
