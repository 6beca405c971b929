use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};
use std::slice;

use super::Arena;
use crate::util::error::{ArenaError, OutOfMemory};

/// The alignment of every chunk the arena requests for itself, unless a larger one is needed.
pub(crate) const CHUNK_ALIGN: usize = 16;

/// A single block obtained from the global allocator and released when dropped.
///
/// For bump chunks `used` is the offset of the first free byte. For owned chunks it is always the
/// full size.
pub(crate) struct Chunk {
    pub(crate) ptr: NonNull<u8>,
    pub(crate) layout: Layout,
    pub(crate) used: usize,
}

impl Chunk {
    /// Requests a block for `layout`, zeroed if asked. Zero sized layouts never reach the
    /// allocator and receive a dangling, suitably aligned pointer instead.
    pub(crate) fn allocate(layout: Layout, zeroed: bool) -> Result<Chunk, ArenaError> {
        if layout.size() == 0 {
            return Ok(Chunk {
                ptr: dangling(layout.align()),
                layout,
                used: 0,
            });
        }

        // SAFETY: The layout has a non-zero size.
        let raw = unsafe {
            if zeroed {
                alloc::alloc_zeroed(layout)
            } else {
                alloc::alloc(layout)
            }
        };

        Ok(Chunk {
            ptr: NonNull::new(raw).ok_or(OutOfMemory { layout })?,
            layout,
            used: 0,
        })
    }

    pub(crate) const fn size(&self) -> usize {
        self.layout.size()
    }

    /// Carves `layout` out of the unused tail of this chunk, or returns [`None`] if it doesn't fit
    /// once padded to `layout.align()`.
    pub(crate) fn bump(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let addr = self.ptr.as_ptr().addr().checked_add(self.used)?;
        let padding = addr.wrapping_neg() & (layout.align() - 1);
        let start = self.used.checked_add(padding)?;
        let end = start.checked_add(layout.size())?;

        if end > self.size() {
            return None;
        }

        self.used = end;
        // SAFETY: start <= end <= size, so the offset stays within the allocation.
        Some(unsafe { self.ptr.add(start) })
    }

    /// Grows the block to `new_size` bytes, keeping its alignment and contents. On failure the
    /// block is left untouched.
    pub(crate) fn grow(&mut self, new_size: usize) -> Result<(), ArenaError> {
        if new_size <= self.size() {
            return Ok(());
        }

        let new_layout = Layout::from_size_align(new_size, self.layout.align())?;
        let raw = if self.size() == 0 {
            // SAFETY: new_size is greater than zero.
            unsafe { alloc::alloc(new_layout) }
        } else {
            // SAFETY: ptr was allocated with self.layout by the global allocator, new_size is
            // non-zero and was validated by Layout::from_size_align.
            unsafe { alloc::realloc(self.ptr.as_ptr(), self.layout, new_size) }
        };

        self.ptr = NonNull::new(raw).ok_or(OutOfMemory { layout: new_layout })?;
        self.layout = new_layout;
        self.used = new_size;
        Ok(())
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        if self.size() != 0 {
            // SAFETY: ptr was allocated with exactly this layout and is never used again.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
        }
    }
}

// SAFETY: A Chunk uniquely owns its allocation, like a Box<[u8]>.
unsafe impl Send for Chunk {}

fn dangling(align: usize) -> NonNull<u8> {
    // SAFETY: Layout guarantees that align is a non-zero power of two.
    unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(align)) }
}

/// Owned chunks, addressed by a stable index so that handles stay valid while others are freed.
#[derive(Default)]
pub(crate) struct ChunkSlots {
    slots: Vec<Option<Chunk>>,
    vacant: Vec<usize>,
}

impl ChunkSlots {
    pub(crate) const fn new() -> ChunkSlots {
        ChunkSlots {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, chunk: Chunk) -> usize {
        match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = Some(chunk);
                index
            },
            None => {
                self.slots.push(Some(chunk));
                self.slots.len() - 1
            },
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Chunk> {
        self.slots.get_mut(index)?.as_mut()
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Chunk> {
        let chunk = self.slots.get_mut(index)?.take()?;
        self.vacant.push(index);
        Some(chunk)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.slots.iter().flatten()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }
}

/// A handle to a block that the [`Arena`] allocated on its own, outside of the bump chunks.
///
/// Unlike bump allocations, an owned chunk can grow in place of its old contents with
/// [`OwnedChunk::realloc`] and be returned early with [`OwnedChunk::free`]. Whatever is not freed
/// explicitly is released together with the arena. The handle is neither [`Clone`] nor [`Copy`];
/// it is the only way to reach the block.
///
/// The contents are exposed as [`MaybeUninit<u8>`], because only a chunk obtained through
/// [`Arena::calloc_chunk`] starts out initialized, and growing a chunk never initializes the new
/// tail.
pub struct OwnedChunk<'a> {
    pub(crate) arena: &'a Arena,
    pub(crate) index: usize,
    pub(crate) ptr: NonNull<u8>,
    pub(crate) size: usize,
}

impl<'a> OwnedChunk<'a> {
    /// Returns a pointer to the start of the block, aligned to at least the alignment the chunk
    /// was requested with.
    pub const fn as_ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    pub const fn len(&self) -> usize {
        self.size
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the block as a slice of possibly uninitialized bytes.
    pub fn as_uninit_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: The chunk is valid for reads and writes of `size` bytes for as long as the
        // handle exists, and MaybeUninit<u8> has no validity requirements.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.size) }
    }

    /// Grows the block to at least `new_size` bytes, moving it if needed. The first
    /// [`len`](Self::len) bytes are preserved. Shrinking is a no-op.
    pub fn realloc(&mut self, new_size: usize) -> Result<(), ArenaError> {
        let arena = self.arena;
        arena.realloc_chunk(self, new_size)
    }

    /// Returns the block to the global allocator before the arena itself is freed.
    pub fn free(self) {
        let arena = self.arena;
        arena.free_chunk(self)
    }
}

impl Debug for OwnedChunk<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedChunk")
            .field("index", &self.index)
            .field("ptr", &self.ptr)
            .field("size", &self.size)
            .finish()
    }
}
