use std::iter::FusedIterator;
use std::slice;

use super::slot::Slot;

/// An iterator over the `(hash, &value)` pairs of a [`HashMap`](super::HashMap), in bucket order.
pub struct Iter<'m, V> {
    slots: slice::Iter<'m, Slot<V>>,
    remaining: usize,
}

impl<'m, V> Iter<'m, V> {
    pub(crate) fn new(slots: &'m [Slot<V>], len: usize) -> Iter<'m, V> {
        Iter {
            slots: slots.iter(),
            remaining: len,
        }
    }
}

impl<'m, V> Iterator for Iter<'m, V> {
    type Item = (u64, &'m V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { hash, value } = slot {
                self.remaining -= 1;
                return Some((*hash, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// An iterator over the hashes stored in a [`HashMap`](super::HashMap).
pub struct Keys<'m, V>(pub(crate) Iter<'m, V>);

impl<V> Iterator for Keys<'_, V> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(hash, _)| hash)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values stored in a [`HashMap`](super::HashMap).
pub struct Values<'m, V>(pub(crate) Iter<'m, V>);

impl<'m, V> Iterator for Values<'m, V> {
    type Item = &'m V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}
