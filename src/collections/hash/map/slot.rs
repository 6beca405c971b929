use std::alloc::Layout;
use std::marker::PhantomData;
use std::slice;

use crate::arena::{Arena, OwnedChunk};
use crate::util::error::ArenaError;

/// A single bucket of a table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Slot<V> {
    Empty,
    /// Left behind by a removal, so that probe sequences passing through it keep going.
    Tombstone,
    Occupied {
        hash: u64,
        value: V,
    },
}

impl<V: Copy> Slot<V> {
    pub(crate) const fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub(crate) fn value(&self) -> Option<V> {
        match self {
            Slot::Occupied { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// The outcome of walking a probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The slot holding the hash.
    Found(usize),
    /// The hash is absent and this is where it should go: the first tombstone passed, or else the
    /// empty slot that ended the walk.
    Vacant(usize),
    /// The hash is absent and the walk found nowhere to put it.
    Full,
}

/// The bucket array of a table: `cap` slots stored in an owned chunk, all of them initialized.
pub(crate) struct Slots<'a, V> {
    chunk: OwnedChunk<'a>,
    cap: usize,
    _phantom: PhantomData<V>,
}

impl<'a, V: Copy> Slots<'a, V> {
    pub(crate) fn new(arena: &'a Arena, cap: usize) -> Result<Slots<'a, V>, ArenaError> {
        let chunk = arena.alloc_chunk_layout(Layout::array::<Slot<V>>(cap)?)?;
        let ptr = chunk.as_ptr().cast::<Slot<V>>();
        for i in 0..cap {
            // SAFETY: The chunk was allocated for exactly cap slots with the alignment of Slot<V>.
            unsafe { ptr.add(i).write(Slot::Empty) };
        }

        Ok(Slots {
            chunk,
            cap,
            _phantom: PhantomData,
        })
    }

    const fn ptr(&self) -> *mut Slot<V> {
        self.chunk.as_ptr().cast().as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[Slot<V>] {
        // SAFETY: All cap slots were initialized in new and the chunk is never reallocated.
        unsafe { slice::from_raw_parts(self.ptr(), self.cap) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Slot<V>] {
        // SAFETY: As for as_slice, and the unique borrow of self rules out any other access.
        unsafe { slice::from_raw_parts_mut(self.ptr(), self.cap) }
    }

    pub(crate) fn free(self) {
        self.chunk.free();
    }

    /// Walks the quadratic probe sequence of `hash`: starting at `hash % cap`, the i-th step
    /// advances the index by i². At most cap slots are inspected.
    pub(crate) fn probe(&self, hash: u64) -> Probe {
        let slots = self.as_slice();
        let cap = slots.len() as u64;
        if cap == 0 {
            return Probe::Full;
        }

        let mut index = hash % cap;
        let mut tombstone = None;
        for i in 1..=cap {
            match slots[index as usize] {
                Slot::Empty => return Probe::Vacant(tombstone.unwrap_or(index as usize)),
                Slot::Occupied { hash: existing, .. } if existing == hash => {
                    return Probe::Found(index as usize);
                },
                Slot::Tombstone if tombstone.is_none() => tombstone = Some(index as usize),
                _ => {},
            }
            index = (index + i.wrapping_mul(i) % cap) % cap;
        }

        match tombstone {
            Some(index) => Probe::Vacant(index),
            None => Probe::Full,
        }
    }
}
