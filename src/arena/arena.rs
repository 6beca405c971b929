use std::alloc::Layout;
use std::cell::RefCell;
use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use super::chunk::{CHUNK_ALIGN, Chunk, ChunkSlots, OwnedChunk};
use crate::util::error::{ArenaError, CapacityOverflow};
use crate::util::option::OptionExtension;

/// The size of each bump chunk an [`Arena`] requests, unless a single allocation needs more.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

const WORD: usize = mem::size_of::<usize>();

/// A region allocator. Allocations are cheap pointer bumps inside large chunks, are never freed
/// individually, and all become invalid together when the arena is [`reset`](Arena::reset),
/// [`free`d](Arena::free) or dropped.
///
/// Two kinds of memory are handed out:
/// - Bump allocations ([`alloc`](Arena::alloc), [`calloc`](Arena::calloc),
///   [`alloc_layout`](Arena::alloc_layout), [`alloc_copy`](Arena::alloc_copy)) are carved out of
///   shared chunks, first fit, newest chunk first. When none of the existing chunks has room, a
///   new one of `max(requested, chunk_size)` bytes is added.
/// - Owned chunks ([`alloc_chunk`](Arena::alloc_chunk) and friends) are dedicated blocks behind an
///   [`OwnedChunk`] handle, which can be grown or released before the arena is. Growable
///   containers keep their storage in one.
///
/// Every allocating method takes `&self` and ties its result to that borrow, while
/// [`reset`](Arena::reset) and [`free`](Arena::free) take `&mut self`. The borrow checker therefore
/// rejects any use of arena memory after it has been reclaimed.
///
/// An arena is [`Send`] but not [`Sync`]: it can be moved to another thread, not shared between
/// threads.
///
/// # Time Complexity
/// For this analysis, c is the number of chunks currently held by the arena.
///
/// | Method | Complexity |
/// |-|-|
/// | `alloc` | O(c) worst case, O(1) while the newest chunk has room |
/// | `alloc_chunk` | O(1)* |
/// | `realloc_chunk` | O(n) if moved |
/// | `free_chunk` | O(1) |
/// | `reset` | O(c) |
///
/// # Examples
/// ```
/// use arena_std::Arena;
///
/// let arena = Arena::new();
/// let bytes = arena.alloc(5).unwrap();
/// bytes.copy_from_slice(b"Hello");
/// assert_eq!(bytes, b"Hello");
/// assert_eq!(arena.chunk_count(), 1);
/// ```
pub struct Arena {
    chunk_size: usize,
    bump: RefCell<Vec<Chunk>>,
    owned: RefCell<ChunkSlots>,
}

impl Arena {
    /// Creates an empty arena using [`DEFAULT_CHUNK_SIZE`]. No memory is requested until the
    /// first allocation.
    pub const fn new() -> Arena {
        Arena::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Creates an empty arena whose bump chunks hold at least `chunk_size` bytes. Sizes below a
    /// machine word are raised to one.
    pub const fn with_chunk_size(chunk_size: usize) -> Arena {
        Arena {
            chunk_size: if chunk_size < WORD { WORD } else { chunk_size },
            bump: RefCell::new(Vec::new()),
            owned: RefCell::new(ChunkSlots::new()),
        }
    }

    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Allocates `size` bytes aligned to a machine word. The space reserved is `size` rounded up
    /// to a multiple of the word size. A request for zero bytes returns an empty slice without
    /// touching any chunk.
    ///
    /// The bytes are initialized but their values are unspecified: a fresh chunk is zeroed, a
    /// chunk reused after [`reset`](Arena::reset) still holds whatever was written before.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> Result<&mut [u8], ArenaError> {
        if size == 0 {
            return Ok(&mut []);
        }

        let reserved = size.checked_next_multiple_of(WORD).ok_or(CapacityOverflow)?;
        let ptr = self.alloc_layout(Layout::from_size_align(reserved, WORD)?)?;

        // SAFETY: The pointer refers to `reserved >= size` bytes of this arena that were
        // initialized when their chunk was created and are handed out to nobody else. They stay
        // valid until the arena is reset or freed, which requires the shared borrow to end.
        Ok(unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), size) })
    }

    /// Like [`alloc`](Arena::alloc), but the returned bytes are all zero.
    #[allow(clippy::mut_from_ref)]
    pub fn calloc(&self, size: usize) -> Result<&mut [u8], ArenaError> {
        let bytes = self.alloc(size)?;
        bytes.fill(0);
        Ok(bytes)
    }

    /// Allocates a block matching `layout` from the bump chunks and returns a pointer to it.
    ///
    /// The block is valid for reads and writes of `layout.size()` bytes until the arena is reset
    /// or freed. A zero sized layout yields a dangling pointer aligned to `layout.align()`.
    pub fn alloc_layout(&self, layout: Layout) -> Result<NonNull<u8>, ArenaError> {
        if layout.size() == 0 {
            let dangling = ptr::without_provenance_mut(layout.align());
            // SAFETY: Layout guarantees that align is a non-zero power of two.
            return Ok(unsafe { NonNull::new_unchecked(dangling) });
        }

        let mut chunks = self.bump.borrow_mut();
        for chunk in chunks.iter_mut().rev() {
            if let Some(ptr) = chunk.bump(layout) {
                trace!("bump allocation of {} bytes", layout.size());
                return Ok(ptr);
            }
        }

        let chunk_layout = Layout::from_size_align(
            cmp::max(layout.size(), self.chunk_size),
            cmp::max(layout.align(), CHUNK_ALIGN),
        )?;
        let mut chunk = Chunk::allocate(chunk_layout, true)?;
        debug!("new bump chunk of {} bytes (chunk {})", chunk.size(), chunks.len() + 1);

        // SAFETY: The chunk is at least layout.size() bytes long and its start is aligned to at
        // least layout.align(), so the first bump always fits.
        let ptr = unsafe { chunk.bump(layout).unreachable() };
        chunks.push(chunk);
        Ok(ptr)
    }

    /// Copies `items` into the arena and returns the copy.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_copy<T: Copy>(&self, items: &[T]) -> Result<&mut [T], ArenaError> {
        let ptr = self.alloc_layout(Layout::array::<T>(items.len())?)?.cast::<T>();

        // SAFETY: The destination is a fresh block, aligned and sized for items.len() values of
        // T, which cannot overlap the source.
        unsafe {
            ptr::copy_nonoverlapping(items.as_ptr(), ptr.as_ptr(), items.len());
            Ok(slice::from_raw_parts_mut(ptr.as_ptr(), items.len()))
        }
    }

    /// Allocates a dedicated block of `size` bytes, aligned to 16. Its contents are
    /// uninitialized.
    pub fn alloc_chunk(&self, size: usize) -> Result<OwnedChunk<'_>, ArenaError> {
        self.acquire_chunk(Layout::from_size_align(size, CHUNK_ALIGN)?, false)
    }

    /// Like [`alloc_chunk`](Arena::alloc_chunk), but the block is zeroed.
    pub fn calloc_chunk(&self, size: usize) -> Result<OwnedChunk<'_>, ArenaError> {
        self.acquire_chunk(Layout::from_size_align(size, CHUNK_ALIGN)?, true)
    }

    /// Allocates a dedicated block for `layout`. Its contents are uninitialized.
    pub fn alloc_chunk_layout(&self, layout: Layout) -> Result<OwnedChunk<'_>, ArenaError> {
        self.acquire_chunk(layout, false)
    }

    fn acquire_chunk(&self, layout: Layout, zeroed: bool) -> Result<OwnedChunk<'_>, ArenaError> {
        let mut chunk = Chunk::allocate(layout, zeroed)?;
        chunk.used = layout.size();
        let ptr = chunk.ptr;

        let index = self.owned.borrow_mut().insert(chunk);
        trace!("owned chunk {} of {} bytes", index, layout.size());

        Ok(OwnedChunk {
            arena: self,
            index,
            ptr,
            size: layout.size(),
        })
    }

    /// Grows `chunk` to `new_size` bytes, preserving its contents and alignment. Does nothing if
    /// the chunk is already at least that large. If the allocation fails, the chunk is left as it
    /// was.
    ///
    /// # Panics
    /// Panics if `chunk` was allocated by a different arena.
    pub fn realloc_chunk(
        &self,
        chunk: &mut OwnedChunk<'_>,
        new_size: usize,
    ) -> Result<(), ArenaError> {
        self.check_owner(chunk);
        if new_size <= chunk.size {
            return Ok(());
        }

        let mut slots = self.owned.borrow_mut();
        // SAFETY: A live handle always refers to an occupied slot: its slot is only vacated by
        // free_chunk, which consumes the handle, or by reset and free, which need &mut self.
        let block = unsafe { slots.get_mut(chunk.index).unreachable() };
        block.grow(new_size)?;
        trace!("owned chunk {} grown from {} to {} bytes", chunk.index, chunk.size, new_size);

        chunk.ptr = block.ptr;
        chunk.size = new_size;
        Ok(())
    }

    /// Releases `chunk` immediately.
    ///
    /// # Panics
    /// Panics if `chunk` was allocated by a different arena.
    pub fn free_chunk(&self, chunk: OwnedChunk<'_>) {
        self.check_owner(&chunk);
        drop(self.owned.borrow_mut().remove(chunk.index));
        trace!("owned chunk {} freed", chunk.index);
    }

    #[track_caller]
    fn check_owner(&self, chunk: &OwnedChunk<'_>) {
        assert!(ptr::eq(chunk.arena, self), "chunk belongs to a different arena");
    }

    /// Makes every bump chunk empty again without returning it to the allocator, and releases all
    /// owned chunks.
    pub fn reset(&mut self) {
        let bump = self.bump.get_mut();
        for chunk in bump.iter_mut() {
            chunk.used = 0;
        }
        self.owned.get_mut().clear();
        debug!("arena reset, keeping {} bump chunks", bump.len());
    }

    /// Returns every chunk to the allocator. The arena can be used again afterwards and will
    /// request new chunks on demand.
    pub fn free(&mut self) {
        self.bump.get_mut().clear();
        self.owned.get_mut().clear();
        debug!("arena freed");
    }

    /// The number of bytes currently handed out, counting word padding and the full size of owned
    /// chunks.
    pub fn allocated_bytes(&self) -> usize {
        let bump: usize = self.bump.borrow().iter().map(|chunk| chunk.used).sum();
        let owned: usize = self.owned.borrow().iter().map(Chunk::size).sum();
        bump + owned
    }

    /// The number of bytes obtained from the global allocator.
    pub fn reserved_bytes(&self) -> usize {
        let bump: usize = self.bump.borrow().iter().map(Chunk::size).sum();
        let owned: usize = self.owned.borrow().iter().map(Chunk::size).sum();
        bump + owned
    }

    /// The number of live chunks, bump and owned.
    pub fn chunk_count(&self) -> usize {
        self.bump.borrow().len() + self.owned.borrow().len()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Arena {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("chunk_size", &self.chunk_size)
            .field("bump_chunks", &self.bump.borrow().len())
            .field("owned_chunks", &self.owned.borrow().len())
            .field("allocated_bytes", &self.allocated_bytes())
            .field("reserved_bytes", &self.reserved_bytes())
            .finish()
    }
}
