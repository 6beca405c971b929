use std::fmt::{self, Debug, Formatter};

use crate::arena::Arena;
use crate::collections::hash::map::{HashMap, Keys};
use crate::util::error::ArenaError;

/// A set of `u64` hashes, based on [`HashMap<u64, ()>`](HashMap).
///
/// The binary operations allocate their result in an arena of the caller's choosing, which may be
/// different from the arenas of either operand. Operations that only need to walk one operand and
/// look up into the other walk whichever set has fewer buckets.
///
/// # Time Complexity
/// See [`HashMap`] for the complexity of the single element operations. For the set operations,
/// `n` is the length of self and `m` the length of other.
///
/// | Method | Complexity |
/// |-|-|
/// | `union` | `O(n+m)` |
/// | `intersection` | `O(min(n, m))` |
/// | `difference` | `O(n)` |
/// | `is_subset` | `O(n)` |
/// | `is_disjoint` | `O(min(n, m))` |
/// | `set_eq` | `O(min(n, m))` |
///
/// # Examples
/// ```
/// use arena_std::Arena;
/// use arena_std::collections::hash::Set;
///
/// let arena = Arena::new();
/// let mut a = Set::new(&arena);
/// a.extend(&[1, 2, 3]).unwrap();
/// let mut b = Set::new(&arena);
/// b.extend(&[2, 3, 4]).unwrap();
///
/// let both = a.intersection(&b, &arena).unwrap();
/// assert_eq!(both.len(), 2);
/// assert!(both.is_subset(&a) && both.is_subset(&b));
/// ```
pub struct Set<'a> {
    map: HashMap<'a, ()>,
}

impl<'a> Set<'a> {
    /// Creates a new Set with capacity 0. Buckets are allocated from `arena` on the first
    /// insertion.
    pub const fn new(arena: &'a Arena) -> Set<'a> {
        Set {
            map: HashMap::new(arena),
        }
    }

    /// Creates a new Set with `max(cap, 8)` buckets.
    pub fn with_cap(arena: &'a Arena, cap: usize) -> Result<Set<'a>, ArenaError> {
        Ok(Set {
            map: HashMap::with_cap(arena, cap)?,
        })
    }

    /// Creates a new Set containing every hash in `hashes`.
    pub fn from_hashes(arena: &'a Arena, hashes: &[u64]) -> Result<Set<'a>, ArenaError> {
        let mut set = Set::new(arena);
        set.extend(hashes)?;
        Ok(set)
    }

    pub const fn len(&self) -> usize {
        self.map.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.map.cap()
    }

    pub const fn deleted(&self) -> usize {
        self.map.deleted()
    }

    /// Adds `hash` to the Set, returning true if it wasn't already present.
    pub fn add(&mut self, hash: u64) -> Result<bool, ArenaError> {
        Ok(self.map.insert(hash, ())?.is_none())
    }

    /// Removes `hash` from the Set, returning true if it was present.
    pub fn remove(&mut self, hash: u64) -> bool {
        self.map.remove(hash).is_some()
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.map.contains(hash)
    }

    /// Adds every hash in `hashes`.
    pub fn extend(&mut self, hashes: &[u64]) -> Result<(), ArenaError> {
        self.map.reserve(hashes.len())?;
        for hash in hashes {
            self.add(*hash)?;
        }
        Ok(())
    }

    /// Adds every hash in `other`.
    pub fn update(&mut self, other: &Set<'_>) -> Result<(), ArenaError> {
        self.map.update(&other.map)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Ensures that `extra` more hashes can be added without the Set growing.
    pub fn reserve(&mut self, extra: usize) -> Result<(), ArenaError> {
        self.map.reserve(extra)
    }

    /// Rehashes into `new_cap` buckets. See [`HashMap::resize`].
    pub fn resize(&mut self, new_cap: usize) -> Result<(), ArenaError> {
        self.map.resize(new_cap)
    }

    /// Copies this Set into `arena`, keeping its capacity.
    pub fn copy_to<'b>(&self, arena: &'b Arena) -> Result<Set<'b>, ArenaError> {
        Ok(Set {
            map: self.map.copy_to(arena)?,
        })
    }

    /// Returns an iterator over the hashes in the Set, in bucket order.
    pub fn iter(&self) -> Keys<'_, ()> {
        self.map.keys()
    }

    /// Orders two sets so that the one with fewer buckets comes first.
    fn by_cap<'s>(&'s self, other: &'s Set<'s>) -> (&'s Set<'s>, &'s Set<'s>) {
        if other.cap() < self.cap() {
            (other, self)
        } else {
            (self, other)
        }
    }

    /// Returns a new Set in `arena` holding every hash in either self or `other`.
    pub fn union<'b>(&self, other: &Set<'_>, arena: &'b Arena) -> Result<Set<'b>, ArenaError> {
        let (small, large) = self.by_cap(other);
        let mut result = large.copy_to(arena)?;
        result.reserve(small.len())?;
        for hash in small.iter() {
            result.add(hash)?;
        }
        Ok(result)
    }

    /// Returns a new Set in `arena` holding the hashes present in both self and `other`.
    pub fn intersection<'b>(
        &self,
        other: &Set<'_>,
        arena: &'b Arena,
    ) -> Result<Set<'b>, ArenaError> {
        let (small, large) = self.by_cap(other);
        let mut result = Set::with_cap(arena, small.len().saturating_mul(2))?;
        for hash in small.iter().filter(|hash| large.contains(*hash)) {
            result.add(hash)?;
        }
        Ok(result)
    }

    /// Returns a new Set in `arena` holding the hashes of self that are not in `other`.
    pub fn difference<'b>(
        &self,
        other: &Set<'_>,
        arena: &'b Arena,
    ) -> Result<Set<'b>, ArenaError> {
        let mut result = Set::with_cap(arena, self.len().saturating_mul(2))?;
        for hash in self.iter().filter(|hash| !other.contains(*hash)) {
            result.add(hash)?;
        }
        Ok(result)
    }

    /// Returns true if every hash in self is also in `other`.
    pub fn is_subset(&self, other: &Set<'_>) -> bool {
        self.len() <= other.len() && self.iter().all(|hash| other.contains(hash))
    }

    /// Returns true if self and `other` share no hash.
    pub fn is_disjoint(&self, other: &Set<'_>) -> bool {
        let (small, large) = self.by_cap(other);
        small.iter().all(|hash| !large.contains(hash))
    }

    /// Returns true if self and `other` hold exactly the same hashes.
    pub fn set_eq(&self, other: &Set<'_>) -> bool {
        let (small, large) = self.by_cap(other);
        self.len() == other.len() && small.iter().all(|hash| large.contains(hash))
    }
}

impl PartialEq<Set<'_>> for Set<'_> {
    fn eq(&self, other: &Set<'_>) -> bool {
        self.set_eq(other)
    }
}

impl Eq for Set<'_> {}

impl<'s> IntoIterator for &'s Set<'_> {
    type Item = u64;
    type IntoIter = Keys<'s, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Set<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
