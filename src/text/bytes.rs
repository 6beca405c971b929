use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::slice;

use super::format::SliceWriter;
use super::string::Str;
use crate::arena::Arena;
use crate::util::error::{ArenaError, CapacityOverflow};
use crate::util::hash;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A borrowed view of raw binary data.
///
/// Bytes is the binary counterpart of [`Str`]: the same pointer and length, without any of the
/// text operations. Converting between the two is free.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bytes<'a> {
    data: &'a [u8],
}

impl<'a> Bytes<'a> {
    pub const fn new(data: &'a [u8]) -> Bytes<'a> {
        Bytes { data }
    }

    /// Creates a view of `len` bytes starting at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes for the whole of `'a`, and the bytes must not
    /// be mutated during that time. See [`slice::from_raw_parts`] for the full requirements.
    pub const unsafe fn from_parts(ptr: *const u8, len: usize) -> Bytes<'a> {
        // SAFETY: Upheld by the caller.
        Bytes::new(unsafe { slice::from_raw_parts(ptr, len) })
    }

    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies the data into `arena`.
    pub fn copy<'b>(self, arena: &'b Arena) -> Result<Bytes<'b>, ArenaError> {
        Ok(Bytes::new(arena.alloc_copy(self.data)?))
    }

    /// Returns the bytes in `start..end`, or an empty view for any invalid range, as
    /// [`Str::substring`] does.
    pub fn slice(self, start: usize, end: usize) -> Bytes<'a> {
        Bytes::new(Str::from_bytes(self.data).substring(start, end).as_bytes())
    }

    /// Removes and returns the first `count` bytes, or all of them if there are fewer.
    pub fn take(&mut self, count: usize) -> Bytes<'a> {
        let (chunk, rest) = self.data.split_at(count.min(self.len()));
        self.data = rest;
        Bytes::new(chunk)
    }

    /// Hashes the data with 64-bit FNV-1a, matching [`Str::hash64`] for the same bytes.
    pub const fn hash64(self) -> u64 {
        hash::fnv1a(self.data)
    }

    /// Views the data as text.
    pub const fn to_str(self) -> Str<'a> {
        Str::from_bytes(self.data)
    }

    /// Encodes the data as lower case hexadecimal, two digits per byte.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::text::Bytes;
    /// let arena = Arena::new();
    /// let hex = Bytes::new(&[0x02, 0xff, 0xaa, 0xbb]).to_hex(&arena).unwrap();
    /// assert_eq!(hex, "02ffaabb");
    /// ```
    pub fn to_hex<'b>(self, arena: &'b Arena) -> Result<Str<'b>, ArenaError> {
        let buffer = arena.alloc(self.len().checked_mul(2).ok_or(CapacityOverflow)?)?;
        let mut writer = SliceWriter::new(&mut *buffer);
        for byte in self.data {
            writer.push_byte(HEX_DIGITS[usize::from(byte >> 4)]);
            writer.push_byte(HEX_DIGITS[usize::from(byte & 0xf)]);
        }
        Ok(Str::from_bytes(buffer))
    }

    /// Decodes hexadecimal text into bytes allocated in `arena`. A leading `0x` is skipped. An odd
    /// number of digits is read as if the first one had a leading zero, so `"0x101"` decodes to
    /// `[0x01, 0x01]`. Characters that aren't hex digits count as zero.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::text::{Bytes, Str};
    /// let arena = Arena::new();
    /// let bytes = Bytes::from_hex(Str::new("0x101"), &arena).unwrap();
    /// assert_eq!(bytes.as_slice(), &[0x01, 0x01]);
    /// ```
    pub fn from_hex<'b>(text: Str<'_>, arena: &'b Arena) -> Result<Bytes<'b>, ArenaError> {
        let mut digits = text;
        if digits.starts_with(Str::new("0x")) {
            digits.take(2);
        }

        let buffer = arena.calloc(digits.len().div_ceil(2))?;
        let mut first = digits.len() % 2;
        if first == 0 {
            first = 2;
        }

        let mut index = 0;
        while let Some(pair) = digits.try_take(first) {
            buffer[index] =
                pair.as_bytes().iter().fold(0, |acc, digit| (acc << 4) | hex_value(*digit));
            index += 1;
            first = 2;
        }
        Ok(Bytes::new(buffer))
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

impl Hash for Bytes<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.data);
    }
}

impl<'a> From<&'a [u8]> for Bytes<'a> {
    fn from(value: &'a [u8]) -> Self {
        Bytes::new(value)
    }
}

impl<'a> From<Str<'a>> for Bytes<'a> {
    fn from(value: Str<'a>) -> Self {
        Bytes::new(value.as_bytes())
    }
}

impl AsRef<[u8]> for Bytes<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

impl Debug for Bytes<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, byte) in self.data.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{byte:#04x}")?;
        }
        f.write_str("]")
    }
}
