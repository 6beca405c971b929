//! Hash functions producing the `u64` keys used by [`HashMap`](crate::collections::hash::HashMap)
//! and [`Set`](crate::collections::hash::Set).
//!
//! Strings and byte slices hash with 64-bit FNV-1a. Integers go through a short multiply-xorshift
//! mixer instead, so that small consecutive values land in unrelated buckets.
use std::hash::{BuildHasher, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const MIX_MODULUS: u64 = 0x3A_A387_A8B1;
const MIX_MULTIPLIER: u64 = 0x045d_9f3b;

/// Hashes `bytes` with 64-bit FNV-1a.
///
/// # Examples
/// ```
/// use arena_std::hash::fnv1a;
///
/// assert_eq!(fnv1a(b"Hello"), 0x63f0bfacf2c00f6b);
/// assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
/// ```
pub const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Mixes an integer into a well distributed `u64`. Deterministic across runs and platforms.
pub const fn hash_u64(value: u64) -> u64 {
    let mut hash = value.wrapping_add(1);
    hash = (((hash >> 16) ^ hash) % MIX_MODULUS).wrapping_mul(MIX_MULTIPLIER);
    hash = (((hash >> 16) ^ hash) % MIX_MODULUS).wrapping_mul(MIX_MULTIPLIER);
    (hash >> 16) ^ hash
}

/// [`hash_u64`] for `usize`.
pub const fn hash_usize(value: usize) -> u64 {
    hash_u64(value as u64)
}

/// [`hash_u64`] applied to the two's complement bits of `value`.
pub const fn hash_i64(value: i64) -> u64 {
    hash_u64(value as u64)
}

/// A streaming FNV-1a [`Hasher`]. Feeding it the bytes of a string in any number of writes gives
/// the same result as [`fnv1a`] over the whole string.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    pub const fn new() -> Fnv1aHasher {
        Fnv1aHasher {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= *byte as u64;
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Builds [`Fnv1aHasher`]s. Use it with [`BuildHasher::hash_one`] to key arena tables by anything
/// that implements [`Hash`](std::hash::Hash).
#[derive(Debug, Default, Clone, Copy)]
pub struct Fnv1aBuildHasher;

impl BuildHasher for Fnv1aBuildHasher {
    type Hasher = Fnv1aHasher;

    fn build_hasher(&self) -> Self::Hasher {
        Fnv1aHasher::new()
    }
}
