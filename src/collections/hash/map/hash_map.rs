use std::fmt::{self, Debug, Formatter};

use super::iter::{Iter, Keys, Values};
use super::slot::{Probe, Slot, Slots};
use crate::arena::Arena;
use crate::util::error::{ArenaError, CapacityOverflow};
use crate::util::option::OptionExtension;

/// The capacity of a table's first allocation, and the smallest capacity a table ever has.
pub const DEFAULT_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// An open addressing hash table mapping `u64` hashes to [`Copy`] values, with its buckets stored
/// in an [`Arena`].
///
/// Collisions are resolved by quadratic probing. Removal leaves a tombstone behind, which later
/// insertions reuse and rehashing discards. The table grows to twice its capacity before an
/// insertion would leave it without an empty slot, so `len + deleted < cap` holds whenever the
/// table has any capacity at all.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the HashMap.
/// - `m`: The number of entries in the other HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`*, `O(n)` |
/// | `get` | `O(1)` |
/// | `contains` | `O(1)` |
/// | `remove` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `update` | `O(m)`*, `O(n+m)` |
///
/// \* If the HashMap has to grow, all entries are rehashed into the new buckets, taking `O(n)`.
///
/// \** If the HashMap already has capacity for the additional entries, `reserve` is `O(1)`.
///
/// # Examples
/// ```
/// use arena_std::Arena;
/// use arena_std::collections::hash::HashMap;
/// use arena_std::text::Str;
///
/// let arena = Arena::new();
/// let mut counts = HashMap::new(&arena);
/// for word in Str::new("the cat and the hat").split_by_delim(b' ') {
///     let hash = word.hash64();
///     let count = counts.get(hash).copied().unwrap_or(0);
///     counts.insert(hash, count + 1).unwrap();
/// }
/// assert_eq!(counts.get(Str::new("the").hash64()), Some(&2));
/// assert_eq!(counts.len(), 4);
/// ```
pub struct HashMap<'a, V: Copy> {
    arena: &'a Arena,
    slots: Option<Slots<'a, V>>,
    len: usize,
    deleted: usize,
}

impl<'a, V: Copy> HashMap<'a, V> {
    /// Creates a new HashMap with capacity 0. Buckets are allocated from `arena` on the first
    /// insertion.
    pub const fn new(arena: &'a Arena) -> HashMap<'a, V> {
        HashMap {
            arena,
            slots: None,
            len: 0,
            deleted: 0,
        }
    }

    /// Creates a new HashMap with `max(cap, 8)` buckets.
    pub fn with_cap(arena: &'a Arena, cap: usize) -> Result<HashMap<'a, V>, ArenaError> {
        Ok(HashMap {
            arena,
            slots: Some(Slots::new(arena, cap.max(DEFAULT_CAP))?),
            len: 0,
            deleted: 0,
        })
    }

    /// Returns the number of entries in the HashMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn cap(&self) -> usize {
        self.slots().len()
    }

    /// Returns the number of tombstones left behind by removals since the last rehash.
    pub const fn deleted(&self) -> usize {
        self.deleted
    }

    /// Returns the arena this HashMap allocates from.
    pub const fn arena(&self) -> &'a Arena {
        self.arena
    }

    pub(crate) fn slots(&self) -> &[Slot<V>] {
        match &self.slots {
            Some(slots) => slots.as_slice(),
            None => &[],
        }
    }

    fn slots_mut(&mut self) -> &mut [Slot<V>] {
        match &mut self.slots {
            Some(slots) => slots.as_mut_slice(),
            None => &mut [],
        }
    }

    fn probe(&self, hash: u64) -> Probe {
        match &self.slots {
            Some(slots) => slots.probe(hash),
            None => Probe::Full,
        }
    }

    fn find(&self, hash: u64) -> Option<usize> {
        match self.probe(hash) {
            Probe::Found(index) => Some(index),
            _ => None,
        }
    }

    /// Inserts `value` under `hash`, returning the value it replaced, if any. Replacing a value
    /// never grows the table.
    pub fn insert(&mut self, hash: u64, value: V) -> Result<Option<V>, ArenaError> {
        if let Some(index) = self.find(hash) {
            return Ok(self.replace_at(index, hash, value));
        }

        if self.len + self.deleted + 1 >= self.cap() {
            self.grow()?;
        }

        loop {
            match self.probe(hash) {
                Probe::Found(index) => return Ok(self.replace_at(index, hash, value)),
                Probe::Vacant(index) => {
                    if self.slots()[index].is_tombstone() {
                        self.deleted -= 1;
                    }
                    self.slots_mut()[index] = Slot::Occupied { hash, value };
                    self.len += 1;
                    return Ok(None);
                },
                Probe::Full => {
                    trace!("probe for {:#x} found no free slot in {} buckets", hash, self.cap());
                    self.grow()?;
                },
            }
        }
    }

    fn replace_at(&mut self, index: usize, hash: u64, value: V) -> Option<V> {
        let slot = &mut self.slots_mut()[index];
        let previous = slot.value();
        *slot = Slot::Occupied { hash, value };
        previous
    }

    /// Returns a reference to the value stored under `hash`.
    pub fn get(&self, hash: u64) -> Option<&V> {
        match &self.slots()[self.find(hash)?] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored under `hash`.
    pub fn get_mut(&mut self, hash: u64) -> Option<&mut V> {
        let index = self.find(hash)?;
        match &mut self.slots_mut()[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.find(hash).is_some()
    }

    /// Removes the entry for `hash`, returning its value. The bucket becomes a tombstone until the
    /// next rehash.
    pub fn remove(&mut self, hash: u64) -> Option<V> {
        let index = self.find(hash)?;
        let slot = &mut self.slots_mut()[index];
        let previous = slot.value();
        *slot = Slot::Tombstone;

        self.len -= 1;
        self.deleted += 1;
        previous
    }

    /// Removes every entry and tombstone, keeping the buckets.
    pub fn clear(&mut self) {
        self.slots_mut().fill(Slot::Empty);
        self.len = 0;
        self.deleted = 0;
    }

    /// Ensures that `extra` more entries can be inserted without the table growing.
    pub fn reserve(&mut self, extra: usize) -> Result<(), ArenaError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required.saturating_add(self.deleted) < self.cap() {
            return Ok(());
        }

        let mut new_cap = self.cap().max(DEFAULT_CAP);
        while new_cap <= required {
            new_cap = new_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?;
        }
        self.resize(new_cap)
    }

    /// Rehashes every entry into `new_cap` fresh buckets (at least 8), discarding tombstones. A
    /// capacity below the current one is ignored, an equal one just clears out the tombstones.
    ///
    /// If some entry can't be placed because its probe sequence only meets occupied buckets, the
    /// attempt is repeated with twice the capacity.
    pub fn resize(&mut self, new_cap: usize) -> Result<(), ArenaError> {
        if new_cap < self.cap() {
            return Ok(());
        }

        let mut target = new_cap.max(DEFAULT_CAP);
        loop {
            let mut fresh = Slots::new(self.arena, target)?;
            if self.rehash_into(&mut fresh) {
                debug!(
                    "hash table resized from {} to {} buckets ({} entries, {} tombstones dropped)",
                    self.cap(),
                    target,
                    self.len,
                    self.deleted,
                );
                if let Some(old) = self.slots.replace(fresh) {
                    old.free();
                }
                self.deleted = 0;
                return Ok(());
            }

            fresh.free();
            target = target.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?;
        }
    }

    fn rehash_into(&self, fresh: &mut Slots<'a, V>) -> bool {
        for slot in self.slots() {
            if let Slot::Occupied { hash, value } = *slot {
                match fresh.probe(hash) {
                    Probe::Vacant(index) => {
                        fresh.as_mut_slice()[index] = Slot::Occupied { hash, value };
                    },
                    Probe::Found(_) | Probe::Full => return false,
                }
            }
        }
        true
    }

    fn grow(&mut self) -> Result<(), ArenaError> {
        let new_cap = match self.cap() {
            0 => DEFAULT_CAP,
            cap => cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?,
        };
        self.resize(new_cap)
    }

    /// Inserts every entry of `other`, overwriting values stored under the same hash.
    pub fn update(&mut self, other: &HashMap<'_, V>) -> Result<(), ArenaError> {
        self.reserve(other.len)?;
        for (hash, value) in other.iter() {
            self.insert(hash, *value)?;
        }
        Ok(())
    }

    /// Copies this HashMap into `arena`, keeping its capacity.
    pub fn copy_to<'b>(&self, arena: &'b Arena) -> Result<HashMap<'b, V>, ArenaError> {
        let mut copy = HashMap::with_cap(arena, self.cap())?;
        for (hash, value) in self.iter() {
            copy.insert(hash, *value)?;
        }
        Ok(copy)
    }

    /// Returns an iterator over `(hash, &value)` pairs, in bucket order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.slots(), self.len)
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    /// Returns the value stored under `hash`, inserting `value` first if there is none.
    pub fn get_or_insert(&mut self, hash: u64, value: V) -> Result<&mut V, ArenaError> {
        if !self.contains(hash) {
            self.insert(hash, value)?;
        }
        // SAFETY: The entry was either present or has just been inserted.
        Ok(unsafe { self.get_mut(hash).unreachable() })
    }
}

impl<'m, V: Copy> IntoIterator for &'m HashMap<'_, V> {
    type Item = (u64, &'m V);
    type IntoIter = Iter<'m, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Copy + Debug> Debug for HashMap<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
