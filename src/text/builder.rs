use std::fmt::{self, Debug, Formatter, Write};

use super::format;
use super::string::Str;
use crate::arena::Arena;
use crate::collections::contiguous::Vector;
use crate::util::error::ArenaError;

/// A growable byte buffer for assembling text in an [`Arena`].
///
/// The buffer is a [`Vector<u8>`](Vector), so it grows by doubling and reallocates its chunk in
/// place where it can. [`finish`](StringBuilder::finish) hands the bytes over as a [`Str`] that
/// lives as long as the arena, without copying them.
///
/// # Examples
/// ```
/// use arena_std::Arena;
/// use arena_std::text::{Str, StringBuilder};
///
/// let arena = Arena::new();
/// let mut sb = StringBuilder::new(&arena);
/// sb.append_str(Str::new("Hello")).unwrap();
/// sb.push(b' ').unwrap();
/// sb.append_fmt(format_args!("{}!", "World")).unwrap();
/// assert_eq!(sb.finish(), "Hello World!");
/// ```
pub struct StringBuilder<'a> {
    buf: Vector<'a, u8>,
}

impl<'a> StringBuilder<'a> {
    pub const fn new(arena: &'a Arena) -> StringBuilder<'a> {
        StringBuilder {
            buf: Vector::new(arena),
        }
    }

    pub fn with_cap(arena: &'a Arena, cap: usize) -> Result<StringBuilder<'a>, ArenaError> {
        Ok(StringBuilder {
            buf: Vector::with_cap(arena, cap)?,
        })
    }

    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discards the contents, keeping the buffer for reuse.
    pub const fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn push(&mut self, byte: u8) -> Result<(), ArenaError> {
        self.buf.push(byte)
    }

    pub fn append_str(&mut self, s: Str<'_>) -> Result<(), ArenaError> {
        self.buf.extend_from_slice(s.as_bytes())
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), ArenaError> {
        self.buf.extend_from_slice(bytes)
    }

    /// Appends the formatted `args`, returning the number of bytes written. Room for the whole
    /// output is reserved up front, so the buffer grows at most once.
    ///
    /// # Panics
    /// Panics if a [`Display`](fmt::Display) or [`Debug`] implementation used by `args` returns an
    /// error.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize, ArenaError> {
        let len = format::formatted_len(args);
        self.buf.reserve(len)?;

        let before = self.len();
        if self.write_fmt(args).is_err() {
            panic!("a formatting trait implementation returned an error");
        }
        Ok(self.len() - before)
    }

    /// Returns a view of the contents so far. The view borrows the builder, so it has to be dropped
    /// before anything else is appended.
    pub fn as_str(&self) -> Str<'_> {
        Str::from_bytes(self.buf.as_slice())
    }

    /// Consumes the builder and returns its contents, which stay in the arena.
    pub fn finish(self) -> Str<'a> {
        Str::from_bytes(self.buf.into_slice())
    }
}

impl Write for StringBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl Debug for StringBuilder<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuilder")
            .field("contents", &self.as_str())
            .field("len", &self.len())
            .field("cap", &self.buf.cap())
            .finish()
    }
}
