use std::alloc::{Layout, LayoutError};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was used on a collection that has no element at that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl IndexOutOfBounds {
    /// Checks that `index` is strictly less than `len`.
    pub(crate) const fn check(index: usize, len: usize) -> Result<(), IndexOutOfBounds> {
        if index >= len {
            Err(IndexOutOfBounds { index, len })
        } else {
            Ok(())
        }
    }
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A requested size could not be represented, either because the arithmetic overflowed or
/// because the resulting [`Layout`] would exceed `isize::MAX` bytes.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Capacity overflow!")]
pub struct CapacityOverflow;

/// The global allocator refused to hand out a block for `layout`.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display(
    "Out of memory: failed to allocate {} bytes aligned to {}!",
    layout.size(),
    layout.align()
)]
pub struct OutOfMemory {
    pub layout: Layout,
}

/// Every way an allocation made through an [`Arena`](crate::Arena) can fail.
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    OutOfMemory(OutOfMemory),
    CapacityOverflow(CapacityOverflow),
}

impl From<LayoutError> for ArenaError {
    fn from(_: LayoutError) -> Self {
        ArenaError::CapacityOverflow(CapacityOverflow)
    }
}
