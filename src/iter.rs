use core::iter::FusedIterator;
use std::fmt;
use std::hash::Hash;
use std::slice;

use crate::{HeapEntry, IndexedMaxHeap};

/// An iterator over the entries of an `IndexedMaxHeap`, in heap (arbitrary)
/// order.
///
/// This `struct` is created by [`IndexedMaxHeap::iter()`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, E: 'a, P: 'a> {
    pub(crate) iter: slice::Iter<'a, HeapEntry<E, P>>,
}

impl<E: fmt::Debug, P: fmt::Debug> fmt::Debug for Iter<'_, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.iter.as_slice()).finish()
    }
}

impl<E, P> Clone for Iter<'_, E, P> {
    fn clone(&self) -> Self {
        Iter {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, E, P> Iterator for Iter<'a, E, P> {
    type Item = &'a HeapEntry<E, P>;

    #[inline]
    fn next(&mut self) -> Option<&'a HeapEntry<E, P>> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, E, P> DoubleEndedIterator for Iter<'a, E, P> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a HeapEntry<E, P>> {
        self.iter.next_back()
    }
}

impl<E, P> ExactSizeIterator for Iter<'_, E, P> {}

impl<E, P> FusedIterator for Iter<'_, E, P> {}

/// An owning iterator yielding entries in descending priority order.
///
/// This `struct` is created by [`IndexedMaxHeap::into_iter_sorted()`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct IntoIterSorted<E, P> {
    pub(crate) inner: IndexedMaxHeap<E, P>,
}

impl<E: Hash + Eq + Clone, P: Ord> Iterator for IntoIterSorted<E, P> {
    type Item = HeapEntry<E, P>;

    #[inline]
    fn next(&mut self) -> Option<HeapEntry<E, P>> {
        self.inner.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<E: Hash + Eq + Clone, P: Ord> ExactSizeIterator for IntoIterSorted<E, P> {}

impl<E: Hash + Eq + Clone, P: Ord> FusedIterator for IntoIterSorted<E, P> {}

/// A draining iterator yielding entries in descending priority order.
///
/// Entries not consumed before the iterator is dropped are discarded, so the
/// heap is always empty afterwards.
///
/// This `struct` is created by [`IndexedMaxHeap::drain_sorted()`].
#[derive(Debug)]
pub struct DrainSorted<'a, E, P> {
    pub(crate) inner: &'a mut IndexedMaxHeap<E, P>,
}

impl<E, P> Drop for DrainSorted<'_, E, P> {
    fn drop(&mut self) {
        self.inner.clear();
    }
}

impl<E: Hash + Eq + Clone, P: Ord> Iterator for DrainSorted<'_, E, P> {
    type Item = HeapEntry<E, P>;

    #[inline]
    fn next(&mut self) -> Option<HeapEntry<E, P>> {
        self.inner.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<E: Hash + Eq + Clone, P: Ord> ExactSizeIterator for DrainSorted<'_, E, P> {}

impl<E: Hash + Eq + Clone, P: Ord> FusedIterator for DrainSorted<'_, E, P> {}
