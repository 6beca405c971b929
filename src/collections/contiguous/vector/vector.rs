use std::alloc::Layout;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::arena::{Arena, OwnedChunk};
use crate::util::error::{ArenaError, CapacityOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;
use crate::util::sort;

pub(crate) const MIN_CAP: usize = 5;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection of [`Copy`] values, stored in an [`OwnedChunk`] of an
/// [`Arena`].
///
/// Capacity starts at 0 and the first growth jumps to 5 elements, after which it doubles until the
/// requested length fits. Capacity never shrinks. Every operation that may grow the Vector returns
/// a [`Result`], leaving the Vector unchanged on failure.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being appended.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `extend_from_slice` | `O(m)`*, `O(n+m)` |
/// | `reverse` | `O(n)` |
/// | `sort` | `O(n log n)` average |
///
/// \* If the Vector doesn't have enough capacity for the new elements, the push will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
///
/// # Examples
/// ```
/// use arena_std::Arena;
/// use arena_std::collections::contiguous::Vector;
///
/// let arena = Arena::new();
/// let mut vec = Vector::new(&arena);
/// for i in 0..10 {
///     vec.push(i).unwrap();
/// }
/// vec.map_in_place(|x| x * 2);
/// assert_eq!(vec[9], 18);
/// assert_eq!(vec.cap(), 10);
/// ```
pub struct Vector<'a, T: Copy> {
    arena: &'a Arena,
    chunk: Option<OwnedChunk<'a>>,
    len: usize,
    cap: usize,
    _phantom: PhantomData<T>,
}

impl<'a, T: Copy> Vector<'a, T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated from `arena` when
    /// the capacity changes.
    pub const fn new(arena: &'a Arena) -> Vector<'a, T> {
        Vector {
            arena,
            chunk: None,
            len: 0,
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::collections::contiguous::Vector;
    /// let arena = Arena::new();
    /// let mut vec: Vector<u8> = Vector::with_cap(&arena, 3).unwrap();
    /// assert_eq!(vec.cap(), 3);
    /// vec.extend_from_slice(&[1, 2, 3]).unwrap();
    /// assert_eq!(vec.cap(), 3);
    /// ```
    pub fn with_cap(arena: &'a Arena, cap: usize) -> Result<Vector<'a, T>, ArenaError> {
        let mut vec = Vector::new(arena);
        vec.resize(cap)?;
        Ok(vec)
    }

    /// Creates a new Vector holding a copy of `items`, with capacity equal to their count.
    pub fn from_slice(arena: &'a Arena, items: &[T]) -> Result<Vector<'a, T>, ArenaError> {
        let mut vec = Vector::with_cap(arena, items.len())?;
        vec.extend_from_slice(items)?;
        Ok(vec)
    }

    /// Returns the length of the Vector.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the Vector can hold before it needs to reallocate.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the arena this Vector allocates from.
    pub const fn arena(&self) -> &'a Arena {
        self.arena
    }

    fn ptr(&self) -> NonNull<T> {
        match &self.chunk {
            Some(chunk) => chunk.as_ptr().cast(),
            None => NonNull::dangling(),
        }
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::collections::contiguous::Vector;
    /// let arena = Arena::new();
    /// let mut vec = Vector::new(&arena);
    /// for i in 0..=5_u8 {
    ///     vec.push(i).unwrap();
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) -> Result<(), ArenaError> {
        self.reserve(1)?;
        // SAFETY: reserve guarantees that len < cap, so the write is within the chunk.
        unsafe { self.ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Pops the last value off the end of the Vector, if there is one.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: The old last index is below cap and holds an initialized value.
            Some(unsafe { self.ptr().add(self.len).read() })
        }
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    /// Inserting at `len` is the same as a push.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::collections::contiguous::Vector;
    /// let arena = Arena::new();
    /// let mut vec = Vector::from_slice(&arena, &[0, 1, 2]).unwrap();
    /// vec.insert(1, 100).unwrap();
    /// vec.insert(1, 200).unwrap();
    /// vec.insert(5, 300).unwrap();
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ArenaError> {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }

        self.reserve(1)?;
        let ptr = self.ptr();
        // SAFETY: len < cap after the reservation, so shifting [index, len) up by one stays inside
        // the chunk. ptr::copy handles the overlap.
        unsafe {
            ptr::copy(ptr.add(index).as_ptr(), ptr.add(index + 1).as_ptr(), self.len - index);
            ptr.add(index).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        IndexOutOfBounds::check(index, self.len).throw();

        let ptr = self.ptr();
        // SAFETY: index < len, so the read is of an initialized value and the shifted range
        // (index, len) lies within the chunk.
        let value = unsafe {
            let value = ptr.add(index).read();
            ptr::copy(ptr.add(index + 1).as_ptr(), ptr.add(index).as_ptr(), self.len - index - 1);
            value
        };
        self.len -= 1;
        value
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements. If it doesn't,
    /// the capacity is raised to at least 5 and then doubled until `len + extra` fits.
    ///
    /// # Examples
    /// ```
    /// # use arena_std::Arena;
    /// # use arena_std::collections::contiguous::Vector;
    /// let arena = Arena::new();
    /// let mut vec: Vector<u32> = Vector::new(&arena);
    /// vec.reserve(5).unwrap();
    /// assert_eq!(vec.cap(), 5);
    /// vec.reserve(6).unwrap();
    /// assert_eq!(vec.cap(), 10);
    /// ```
    pub fn reserve(&mut self, extra: usize) -> Result<(), ArenaError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }

        let mut new_cap = self.cap.max(MIN_CAP);
        while new_cap < required {
            new_cap = new_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?;
        }

        self.resize(new_cap)
    }

    /// Sets the capacity to exactly `new_cap`, if that is larger than the current one. Smaller
    /// values are ignored.
    pub fn resize(&mut self, new_cap: usize) -> Result<(), ArenaError> {
        if new_cap <= self.cap {
            return Ok(());
        }

        let layout = Layout::array::<T>(new_cap)?;
        match self.chunk.as_mut() {
            Some(chunk) => chunk.realloc(layout.size())?,
            None => self.chunk = Some(self.arena.alloc_chunk_layout(layout)?),
        }

        trace!("vector resized from {} to {} elements", self.cap, new_cap);
        self.cap = new_cap;
        Ok(())
    }

    /// Removes every element, keeping the capacity.
    pub const fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends a copy of every element of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), ArenaError> {
        self.reserve(items.len())?;
        // SAFETY: The reservation makes room for items.len() values after len. A shared slice
        // can't alias the uniquely borrowed storage of self.
        unsafe {
            let dst = self.ptr().add(self.len).as_ptr();
            ptr::copy_nonoverlapping(items.as_ptr(), dst, items.len());
        }
        self.len += items.len();
        Ok(())
    }

    /// Appends a copy of every element of `other`, which may live in a different arena.
    pub fn extend_from(&mut self, other: &Vector<'_, T>) -> Result<(), ArenaError> {
        self.extend_from_slice(other)
    }

    /// Appends every item produced by `iter`, stopping at the first allocation failure. Items
    /// pushed before the failure are kept.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), ArenaError> {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0)?;
        for item in iter {
            self.push(item)?;
        }
        Ok(())
    }

    /// Replaces the contents of `dest` with `f` applied to every element of self, in order.
    pub fn map_into<U: Copy>(
        &self,
        dest: &mut Vector<'_, U>,
        mut f: impl FnMut(T) -> U,
    ) -> Result<(), ArenaError> {
        dest.clear();
        dest.reserve(self.len)?;
        for item in self.iter() {
            dest.push(f(*item))?;
        }
        Ok(())
    }

    /// Replaces every element with `f` applied to it.
    pub fn map_in_place(&mut self, mut f: impl FnMut(T) -> T) {
        for item in self.iter_mut() {
            *item = f(*item);
        }
    }

    /// Replaces the contents of `dest` with the elements of self that satisfy `predicate`, in
    /// order.
    pub fn filter_into(
        &self,
        dest: &mut Vector<'_, T>,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> Result<(), ArenaError> {
        dest.clear();
        dest.reserve(self.len)?;
        for item in self.iter().filter(|item| predicate(item)) {
            dest.push(*item)?;
        }
        Ok(())
    }

    /// Keeps only the elements that satisfy `predicate`, preserving their order.
    pub fn filter_in_place(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        let mut kept = 0;
        for i in 0..self.len {
            let item = self[i];
            if predicate(&item) {
                self[kept] = item;
                kept += 1;
            }
        }
        self.len = kept;
    }

    /// Reverses the order of the elements in place, without allocating.
    pub fn reverse(&mut self) {
        let slice = self.as_mut_slice();
        let (mut low, mut high) = (0, slice.len());
        while low + 1 < high {
            high -= 1;
            slice.swap(low, high);
            low += 1;
        }
    }

    /// Sorts the elements with an unstable quicksort, ordered by `compare`.
    pub fn sort_by(&mut self, mut compare: impl FnMut(&T, &T) -> Ordering) {
        sort::quicksort_by(self.as_mut_slice(), &mut compare);
    }

    /// Copies this Vector into `arena`, with capacity equal to its length.
    pub fn copy_to<'b>(&self, arena: &'b Arena) -> Result<Vector<'b, T>, ArenaError> {
        Vector::from_slice(arena, self)
    }

    /// Consumes the Vector, returning its elements as a slice that lives as long as the arena
    /// borrow. The spare capacity stays allocated until the arena is reset or freed.
    pub fn into_slice(self) -> &'a mut [T] {
        // SAFETY: The chunk holds len initialized values and belongs to the arena for 'a. The
        // handle is consumed here, so nothing can reallocate or free the chunk while the returned
        // slice is alive.
        unsafe { slice::from_raw_parts_mut(self.ptr().as_ptr(), self.len) }
    }

    pub fn as_slice(&self) -> &[T] {
        self
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Copy + Ord> Vector<'_, T> {
    /// Sorts the elements in ascending order with an unstable quicksort.
    pub fn sort(&mut self) {
        self.sort_by(T::cmp);
    }
}

impl<T: Copy> Deref for Vector<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The pointer is non-null and aligned for T, either into a chunk holding len
        // initialized values or dangling with len == 0. The borrow of self prevents the chunk
        // from being reallocated while the slice is alive.
        unsafe { slice::from_raw_parts(self.ptr().as_ptr(), self.len) }
    }
}

impl<T: Copy> DerefMut for Vector<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, and the unique borrow of self rules out any other access.
        unsafe { slice::from_raw_parts_mut(self.ptr().as_ptr(), self.len) }
    }
}

impl<T: Copy> AsRef<[T]> for Vector<'_, T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T: Copy> AsMut<[T]> for Vector<'_, T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<'v, T: Copy> IntoIterator for &'v Vector<'_, T> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'v, T: Copy> IntoIterator for &'v mut Vector<'_, T> {
    type Item = &'v mut T;
    type IntoIter = slice::IterMut<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Copy + PartialEq> PartialEq<Vector<'_, T>> for Vector<'_, T> {
    fn eq(&self, other: &Vector<'_, T>) -> bool {
        **self == **other
    }
}

impl<T: Copy + Eq> Eq for Vector<'_, T> {}

impl<T: Copy + PartialEq> PartialEq<[T]> for Vector<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        **self == *other
    }
}

impl<T: Copy + Debug> Debug for Vector<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}
