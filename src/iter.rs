//! Sorted traversal of a heap.
//!
//! Both iterators pop from a heap they own; an [`Iter`] owns a snapshot, an
//! [`IntoIterSorted`] owns the original.

use core::fmt;
use core::iter::FusedIterator;

use crate::error::HeapError;
use crate::raw::RawHeap;

/// An iterator over a snapshot of a [`KeyedHeap`](crate::KeyedHeap), in
/// heap order.
///
/// This `struct` is created by [`KeyedHeap::iter()`](crate::KeyedHeap::iter).
/// It owns a copy of the heap's storage and drains that copy, so the heap it
/// was created from is never touched. After yielding an error it is
/// exhausted.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<K, T> {
    inner: RawHeap<K, T>,
}

impl<K, T> Iter<K, T> {
    pub(crate) fn new(inner: RawHeap<K, T>) -> Self {
        Iter { inner }
    }
}

impl<K, T: fmt::Debug> fmt::Debug for Iter<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.inner.entries().map(|e| &e.value).collect::<Vec<_>>())
            .finish()
    }
}

impl<K: PartialOrd, T> Iterator for Iter<K, T> {
    type Item = Result<T, HeapError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        next_sorted(&mut self.inner)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        sorted_size_hint(&self.inner)
    }
}

impl<K: PartialOrd, T> FusedIterator for Iter<K, T> {}

/// An owning iterator over the elements of a
/// [`KeyedHeap`](crate::KeyedHeap), in heap order.
///
/// This `struct` is created by
/// [`KeyedHeap::into_iter_sorted()`](crate::KeyedHeap::into_iter_sorted).
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct IntoIterSorted<K, T> {
    inner: RawHeap<K, T>,
}

impl<K, T> IntoIterSorted<K, T> {
    pub(crate) fn new(inner: RawHeap<K, T>) -> Self {
        IntoIterSorted { inner }
    }
}

impl<K: PartialOrd, T> Iterator for IntoIterSorted<K, T> {
    type Item = Result<T, HeapError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        next_sorted(&mut self.inner)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        sorted_size_hint(&self.inner)
    }
}

impl<K: PartialOrd, T> FusedIterator for IntoIterSorted<K, T> {}

fn next_sorted<K: PartialOrd, T>(heap: &mut RawHeap<K, T>) -> Option<Result<T, HeapError>> {
    match heap.pop() {
        Ok(entry) => Some(Ok(entry.value)),
        Err(HeapError::Empty) => None,
        Err(err) => {
            heap.clear();
            Some(Err(err))
        }
    }
}

// An error ends the iteration early, so only one more item is certain.
fn sorted_size_hint<K, T>(heap: &RawHeap<K, T>) -> (usize, Option<usize>) {
    let len = heap.len();
    (len.min(1), Some(len))
}
