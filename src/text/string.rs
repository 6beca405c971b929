use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt::{self, Debug, Display, Formatter, Write};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::slice;
use std::str;

use super::format::{self, SliceWriter};
use crate::arena::Arena;
use crate::util::error::{ArenaError, CapacityOverflow};
use crate::util::hash;

/// Returns true for the ASCII whitespace bytes: space, tab, line feed, vertical tab, form feed and
/// carriage return.
pub const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// A borrowed, immutable view of a run of bytes, usually text.
///
/// A Str is a pointer and a length. It never owns its bytes, never relies on a terminator and is
/// not required to hold valid UTF-8. The lifetime ties it to whatever owns the bytes: a literal,
/// caller storage or an [`Arena`]. Operations that produce new text take the arena to allocate it
/// in and leave their input untouched; everything else only narrows the view.
///
/// Chopping methods take `&mut self` and advance the view past what they return, which makes a Str
/// a simple cursor for hand written parsers.
///
/// # Examples
/// ```
/// use arena_std::Arena;
/// use arena_std::text::{Str, is_space};
///
/// let mut input = Str::new("key = value\nother = thing");
/// let line = input.chop_by_delim(b'\n');
/// let mut fields = line;
/// assert_eq!(fields.chop_by_predicate(|b| b == b'=').trim(), "key");
/// assert_eq!(fields.trim(), "value");
///
/// let arena = Arena::new();
/// let mut shouted = input.to_upper(&arena).unwrap();
/// assert_eq!(shouted, "OTHER = THING");
/// assert_eq!(shouted.chop_by_predicate(is_space), "OTHER");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Str<'a> {
    bytes: &'a [u8],
}

impl<'a> Str<'a> {
    /// Creates a view of a string literal or any other `&str`.
    pub const fn new(s: &'a str) -> Str<'a> {
        Str {
            bytes: s.as_bytes(),
        }
    }

    pub const fn from_bytes(bytes: &'a [u8]) -> Str<'a> {
        Str { bytes }
    }

    /// Creates a view of the bytes of `cstr`, without its terminator.
    pub fn from_cstr(cstr: &'a CStr) -> Str<'a> {
        Str::from_bytes(cstr.to_bytes())
    }

    /// Creates a view of `len` bytes starting at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes for the whole of `'a`, and the bytes must not
    /// be mutated during that time. See [`slice::from_raw_parts`] for the full requirements.
    pub const unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Str<'a> {
        // SAFETY: Upheld by the caller.
        Str::from_bytes(unsafe { slice::from_raw_parts(ptr, len) })
    }

    /// Formats `args` into a new Str allocated in `arena`. The formatted length is measured first,
    /// so exactly that many bytes are allocated. [`str_format!`](crate::str_format) is the usual
    /// way to call this.
    ///
    /// # Panics
    /// Panics if a [`Display`] or [`Debug`] implementation used by `args` returns an error, as
    /// [`format!`] does.
    pub fn format(arena: &'a Arena, args: fmt::Arguments<'_>) -> Result<Str<'a>, ArenaError> {
        let buffer = arena.alloc(format::formatted_len(args))?;
        let mut writer = SliceWriter::new(&mut *buffer);
        if writer.write_fmt(args).is_err() || !writer.is_full() {
            panic!("a formatting trait implementation returned an error");
        }
        Ok(Str::from_bytes(buffer))
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub const fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the view as a `&str` if it holds valid UTF-8.
    pub fn to_str(&self) -> Option<&'a str> {
        str::from_utf8(self.bytes).ok()
    }

    /// Returns the byte at `index`.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Compares two views, ignoring ASCII case.
    pub fn eq_ignore_case(self, other: Str<'_>) -> bool {
        self.bytes.eq_ignore_ascii_case(other.bytes)
    }

    pub fn starts_with(self, prefix: Str<'_>) -> bool {
        self.bytes.starts_with(prefix.bytes)
    }

    pub fn ends_with(self, suffix: Str<'_>) -> bool {
        self.bytes.ends_with(suffix.bytes)
    }

    /// Returns true if `needle` occurs anywhere in self. The empty needle is always contained.
    pub fn contains(self, needle: Str<'_>) -> bool {
        self.find(needle).is_some()
    }

    /// Returns true if self contains `byte`.
    pub fn includes(self, byte: u8) -> bool {
        self.bytes.contains(&byte)
    }

    /// Returns the index of the first occurrence of `needle`. The empty needle is found at 0.
    pub fn find(self, needle: Str<'_>) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.bytes.windows(needle.len()).position(|window| window == needle.bytes)
    }

    /// Returns the index of the last occurrence of `needle`. The empty needle is found at `len`.
    pub fn find_last(self, needle: Str<'_>) -> Option<usize> {
        if needle.is_empty() {
            return Some(self.len());
        }
        self.bytes.windows(needle.len()).rposition(|window| window == needle.bytes)
    }

    /// Counts the non-overlapping occurrences of `needle`, scanning left to right. The empty
    /// needle occurs 0 times.
    pub fn count(self, needle: Str<'_>) -> usize {
        if needle.is_empty() {
            return 0;
        }

        let mut count = 0;
        let mut i = 0;
        while i + needle.len() <= self.len() {
            if &self.bytes[i..i + needle.len()] == needle.bytes {
                count += 1;
                i += needle.len();
            } else {
                i += 1;
            }
        }
        count
    }

    /// Hashes the bytes with 64-bit FNV-1a.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::text::Str;
    /// assert_eq!(Str::new("Hello").hash64(), 0x63f0bfacf2c00f6b);
    /// ```
    pub const fn hash64(self) -> u64 {
        hash::fnv1a(self.bytes)
    }

    pub fn trim(self) -> Str<'a> {
        self.trim_by_predicate(is_space)
    }

    pub fn trim_left(self) -> Str<'a> {
        self.trim_left_by_predicate(is_space)
    }

    pub fn trim_right(self) -> Str<'a> {
        self.trim_right_by_predicate(is_space)
    }

    pub fn trim_by_delim(self, delim: u8) -> Str<'a> {
        self.trim_by_predicate(|byte| byte == delim)
    }

    pub fn trim_left_by_delim(self, delim: u8) -> Str<'a> {
        self.trim_left_by_predicate(|byte| byte == delim)
    }

    pub fn trim_right_by_delim(self, delim: u8) -> Str<'a> {
        self.trim_right_by_predicate(|byte| byte == delim)
    }

    /// Removes every leading and trailing byte for which `predicate` holds.
    pub fn trim_by_predicate(self, mut predicate: impl FnMut(u8) -> bool) -> Str<'a> {
        self.trim_right_by_predicate(&mut predicate).trim_left_by_predicate(predicate)
    }

    pub fn trim_left_by_predicate(self, mut predicate: impl FnMut(u8) -> bool) -> Str<'a> {
        let start = self.bytes.iter().position(|byte| !predicate(*byte)).unwrap_or(self.len());
        Str::from_bytes(&self.bytes[start..])
    }

    pub fn trim_right_by_predicate(self, mut predicate: impl FnMut(u8) -> bool) -> Str<'a> {
        let end = self.bytes.iter().rposition(|byte| !predicate(*byte)).map_or(0, |i| i + 1);
        Str::from_bytes(&self.bytes[..end])
    }

    /// Returns the bytes in `start..end`. Any invalid range (`end <= start`, `start >= len` or
    /// `end > len`) gives an empty Str instead of panicking.
    pub fn substring(self, start: usize, end: usize) -> Str<'a> {
        if end <= start || self.len() <= start || self.len() < end {
            return Str::default();
        }
        Str::from_bytes(&self.bytes[start..end])
    }

    /// Removes and returns the first `count` bytes, or all of them if there are fewer.
    pub fn take(&mut self, count: usize) -> Str<'a> {
        let (chunk, rest) = self.bytes.split_at(count.min(self.len()));
        self.bytes = rest;
        Str::from_bytes(chunk)
    }

    /// Removes and returns the last `count` bytes, or all of them if there are fewer.
    pub fn take_right(&mut self, count: usize) -> Str<'a> {
        let (rest, chunk) = self.bytes.split_at(self.len() - count.min(self.len()));
        self.bytes = rest;
        Str::from_bytes(chunk)
    }

    /// Like [`take`](Str::take), but returns [`None`] if self is already empty.
    pub fn try_take(&mut self, count: usize) -> Option<Str<'a>> {
        if self.is_empty() {
            None
        } else {
            Some(self.take(count))
        }
    }

    /// Like [`take_right`](Str::take_right), but returns [`None`] if self is already empty.
    pub fn try_take_right(&mut self, count: usize) -> Option<Str<'a>> {
        if self.is_empty() {
            None
        } else {
            Some(self.take_right(count))
        }
    }

    /// Splits off and returns everything before the first `delim`. Self becomes everything after
    /// it, with any further leading `delim`s trimmed, so runs of delimiters count as one. Without
    /// a `delim`, all of self is returned and self becomes empty.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::text::Str;
    /// let mut s = Str::new("a,,b");
    /// assert_eq!(s.chop_by_delim(b','), "a");
    /// assert_eq!(s.chop_by_delim(b','), "b");
    /// assert!(s.is_empty());
    /// ```
    pub fn chop_by_delim(&mut self, delim: u8) -> Str<'a> {
        self.chop_by_predicate(|byte| byte == delim)
    }

    /// Like [`chop_by_delim`](Str::chop_by_delim), splitting at the first byte for which
    /// `predicate` holds.
    pub fn chop_by_predicate(&mut self, mut predicate: impl FnMut(u8) -> bool) -> Str<'a> {
        let bytes = self.bytes;
        let index = bytes.iter().position(|byte| predicate(*byte)).unwrap_or(bytes.len());

        *self = Str::from_bytes(&bytes[(index + 1).min(bytes.len())..])
            .trim_left_by_predicate(predicate);
        Str::from_bytes(&bytes[..index])
    }

    /// Splits off and returns everything after the last `delim`. Self becomes everything before
    /// it, with any further trailing `delim`s trimmed. Without a `delim`, all of self is returned
    /// and self becomes empty.
    pub fn chop_right_by_delim(&mut self, delim: u8) -> Str<'a> {
        self.chop_right_by_predicate(|byte| byte == delim)
    }

    /// Like [`chop_right_by_delim`](Str::chop_right_by_delim), splitting at the last byte for
    /// which `predicate` holds.
    pub fn chop_right_by_predicate(&mut self, mut predicate: impl FnMut(u8) -> bool) -> Str<'a> {
        let bytes = self.bytes;
        let (rest, chunk) = match bytes.iter().rposition(|byte| predicate(*byte)) {
            Some(index) => (&bytes[..index], &bytes[index + 1..]),
            None => (&bytes[..0], bytes),
        };

        *self = Str::from_bytes(rest).trim_right_by_predicate(predicate);
        Str::from_bytes(chunk)
    }

    /// Like [`chop_by_delim`](Str::chop_by_delim), but returns [`None`] if self is already empty.
    pub fn try_chop_by_delim(&mut self, delim: u8) -> Option<Str<'a>> {
        self.try_chop_by_predicate(|byte| byte == delim)
    }

    /// Like [`chop_by_predicate`](Str::chop_by_predicate), but returns [`None`] if self is already
    /// empty.
    pub fn try_chop_by_predicate(&mut self, predicate: impl FnMut(u8) -> bool) -> Option<Str<'a>> {
        if self.is_empty() {
            None
        } else {
            Some(self.chop_by_predicate(predicate))
        }
    }

    /// Returns an iterator over the pieces produced by repeatedly chopping self by `delim`.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::text::Str;
    /// let words: Vec<_> = Str::new("one  two three").split_by_delim(b' ').collect();
    /// assert_eq!(words, ["one", "two", "three"]);
    /// ```
    pub const fn split_by_delim(self, delim: u8) -> SplitByDelim<'a> {
        SplitByDelim { rest: self, delim }
    }

    /// Copies self into `arena`.
    pub fn copy<'b>(self, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        concat(arena, &[self.bytes])
    }

    /// Returns a new Str holding self followed by `suffix`.
    pub fn append<'b>(self, suffix: Str<'_>, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        concat(arena, &[self.bytes, suffix.bytes])
    }

    /// Returns a new Str holding `prefix` followed by self.
    pub fn prepend<'b>(self, prefix: Str<'_>, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        concat(arena, &[prefix.bytes, self.bytes])
    }

    /// Returns a new Str holding self with `wrap` on both sides.
    pub fn wrap<'b>(self, wrap: Str<'_>, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        concat(arena, &[wrap.bytes, self.bytes, wrap.bytes])
    }

    /// Joins `parts` with self as the separator. Joining no parts gives an empty Str.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::text::Str;
    /// let arena = Arena::new();
    /// let parts = [Str::new("Hello"), Str::new("World")];
    /// assert_eq!(Str::new(", ").join(&parts, &arena).unwrap(), "Hello, World");
    /// ```
    pub fn join<'b>(self, parts: &[Str<'_>], arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        self.join_wrap(Str::default(), parts, arena)
    }

    /// Concatenates `parts`, each followed by self.
    pub fn join_suffix<'b>(
        self,
        parts: &[Str<'_>],
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        let len = checked_sum(parts.iter().map(|part| part.len().checked_add(self.len())))?;
        build(arena, len, |writer| {
            for part in parts {
                writer.push(part.bytes);
                writer.push(self.bytes);
            }
        })
    }

    /// Concatenates `parts`, each preceded by self.
    pub fn join_prefix<'b>(
        self,
        parts: &[Str<'_>],
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        let len = checked_sum(parts.iter().map(|part| part.len().checked_add(self.len())))?;
        build(arena, len, |writer| {
            for part in parts {
                writer.push(self.bytes);
                writer.push(part.bytes);
            }
        })
    }

    /// Joins `parts` with self as the separator, wrapping each part in `wrap`.
    pub fn join_wrap<'b>(
        self,
        wrap: Str<'_>,
        parts: &[Str<'_>],
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        if parts.is_empty() {
            return Ok(Str::default());
        }

        let wrapped = checked_sum(parts.iter().map(|part| {
            wrap.len().checked_mul(2).and_then(|wraps| wraps.checked_add(part.len()))
        }))?;
        let separators = self.len().checked_mul(parts.len() - 1).ok_or(CapacityOverflow)?;
        let len = wrapped.checked_add(separators).ok_or(CapacityOverflow)?;

        build(arena, len, |writer| {
            for (i, part) in parts.iter().enumerate() {
                if i != 0 {
                    writer.push(self.bytes);
                }
                writer.push(wrap.bytes);
                writer.push(part.bytes);
                writer.push(wrap.bytes);
            }
        })
    }

    /// Returns a copy of self with every ASCII letter in upper case.
    pub fn to_upper<'b>(self, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        let buffer = arena.alloc_copy(self.bytes)?;
        buffer.make_ascii_uppercase();
        Ok(Str::from_bytes(buffer))
    }

    /// Returns a copy of self with every ASCII letter in lower case.
    pub fn to_lower<'b>(self, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        let buffer = arena.alloc_copy(self.bytes)?;
        buffer.make_ascii_lowercase();
        Ok(Str::from_bytes(buffer))
    }

    /// Returns a copy of self with every non-overlapping occurrence of `old` replaced by `new`,
    /// scanning left to right. An empty `old` matches nothing.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::text::Str;
    /// let arena = Arena::new();
    /// let s = Str::new("test test test");
    /// let replaced = s.replace(Str::new("test"), Str::new("result"), &arena).unwrap();
    /// assert_eq!(replaced, "result result result");
    /// ```
    pub fn replace<'b>(
        self,
        old: Str<'_>,
        new: Str<'_>,
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        let count = self.count(old);
        let len = (self.len() - count * old.len())
            .checked_add(count.checked_mul(new.len()).ok_or(CapacityOverflow)?)
            .ok_or(CapacityOverflow)?;

        build(arena, len, |writer| {
            let mut rest = self;
            while let Some(index) = rest.find(old).filter(|_| !old.is_empty()) {
                writer.push(&rest.bytes[..index]);
                writer.push(new.bytes);
                rest = Str::from_bytes(&rest.bytes[index + old.len()..]);
            }
            writer.push(rest.bytes);
        })
    }

    /// Returns a copy of self centered in `width` bytes of `fill`. When the padding is odd, the
    /// extra byte goes on the right. If self is wider than `width`, a plain copy is returned.
    pub fn center<'b>(
        self,
        width: usize,
        fill: u8,
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        let padding = width.saturating_sub(self.len());
        self.pad(padding / 2, padding - padding / 2, fill, arena)
    }

    /// Returns a copy of self padded on the right with `fill` up to `width` bytes.
    pub fn ljust<'b>(
        self,
        width: usize,
        fill: u8,
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        self.pad(0, width.saturating_sub(self.len()), fill, arena)
    }

    /// Returns a copy of self padded on the left with `fill` up to `width` bytes.
    pub fn rjust<'b>(
        self,
        width: usize,
        fill: u8,
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        self.pad(width.saturating_sub(self.len()), 0, fill, arena)
    }

    fn pad<'b>(
        self,
        left: usize,
        right: usize,
        fill: u8,
        arena: &'b Arena,
    ) -> Result<Str<'b>, ArenaError> {
        build(arena, self.len() + left + right, |writer| {
            writer.push_repeated(fill, left);
            writer.push(self.bytes);
            writer.push_repeated(fill, right);
        })
    }

    /// Returns self repeated `times` times.
    pub fn repeat<'b>(self, times: usize, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        let len = self.len().checked_mul(times).ok_or(CapacityOverflow)?;
        build(arena, len, |writer| {
            for _ in 0..times {
                writer.push(self.bytes);
            }
        })
    }

    /// Returns a copy of self with its bytes in reverse order.
    pub fn reverse<'b>(self, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        let buffer = arena.alloc_copy(self.bytes)?;
        buffer.reverse();
        Ok(Str::from_bytes(buffer))
    }
}

/// Allocates exactly `len` bytes in `arena` and hands them to `fill`, which must write all of them.
fn build<'b>(
    arena: &'b Arena,
    len: usize,
    fill: impl FnOnce(&mut SliceWriter<'_>),
) -> Result<Str<'b>, ArenaError> {
    let buffer = arena.alloc(len)?;
    let mut writer = SliceWriter::new(&mut *buffer);
    fill(&mut writer);
    debug_assert!(writer.is_full());
    Ok(Str::from_bytes(buffer))
}

fn concat<'b>(arena: &'b Arena, parts: &[&[u8]]) -> Result<Str<'b>, ArenaError> {
    let len = checked_sum(parts.iter().map(|part| Some(part.len())))?;
    build(arena, len, |writer| {
        for part in parts {
            writer.push(part);
        }
    })
}

fn checked_sum(mut lens: impl Iterator<Item = Option<usize>>) -> Result<usize, ArenaError> {
    lens.try_fold(0_usize, |total, len| total.checked_add(len?))
        .ok_or(CapacityOverflow.into())
}

/// The direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Returns a comparison function ordering Strs byte-wise in the given direction, for use with
/// [`Vector::sort_by`](crate::collections::contiguous::Vector::sort_by) or
/// [`slice::sort_by`].
pub fn comparator(order: SortOrder) -> fn(&Str<'_>, &Str<'_>) -> Ordering {
    fn ascending(a: &Str<'_>, b: &Str<'_>) -> Ordering {
        a.bytes.cmp(b.bytes)
    }

    fn descending(a: &Str<'_>, b: &Str<'_>) -> Ordering {
        b.bytes.cmp(a.bytes)
    }

    match order {
        SortOrder::Ascending => ascending,
        SortOrder::Descending => descending,
    }
}

/// The iterator returned by [`Str::split_by_delim`].
#[derive(Debug, Clone)]
pub struct SplitByDelim<'a> {
    rest: Str<'a>,
    delim: u8,
}

impl<'a> Iterator for SplitByDelim<'a> {
    type Item = Str<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rest.try_chop_by_delim(self.delim)
    }
}

impl FusedIterator for SplitByDelim<'_> {}

impl Hash for Str<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.bytes);
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(value: &'a str) -> Self {
        Str::new(value)
    }
}

impl<'a> From<&'a [u8]> for Str<'a> {
    fn from(value: &'a [u8]) -> Self {
        Str::from_bytes(value)
    }
}

impl AsRef<[u8]> for Str<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq<str> for Str<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Str<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<Str<'_>> for &str {
    fn eq(&self, other: &Str<'_>) -> bool {
        self.as_bytes() == other.bytes
    }
}

impl Display for Str<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match str::from_utf8(self.bytes) {
            Ok(s) => f.pad(s),
            Err(_) => f.pad(&String::from_utf8_lossy(self.bytes)),
        }
    }
}

impl Debug for Str<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.bytes.escape_ascii())
    }
}

/// Formats its arguments into a [`Str`] allocated in the given arena, like [`format!`] does into
/// a [`String`].
///
/// # Examples
/// ```
/// use arena_std::{Arena, str_format};
///
/// let arena = Arena::new();
/// let s = str_format!(&arena, "{} {}", 420, 69).unwrap();
/// assert_eq!(s, "420 69");
/// ```
#[macro_export]
macro_rules! str_format {
    ($arena:expr, $($arg:tt)*) => {
        $crate::text::Str::format($arena, ::std::format_args!($($arg)*))
    };
}
