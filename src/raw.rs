//! Array-backed binary min-heap over `(key, sequence, value)` entries.
//!
//! Every operation first works out where entries have to go using only
//! shared borrows, and only then moves them. A comparison failure therefore
//! always happens before the storage is touched.

use core::cmp::Ordering;
use core::mem::{self, ManuallyDrop};
use core::ptr;

use crate::error::HeapError;

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, T> {
    pub(crate) key: K,
    seq: u64,
    pub(crate) value: T,
}

impl<K: PartialOrd, T> Entry<K, T> {
    /// Whether `self` must sit above `other`. Equal keys fall back to the
    /// order of insertion.
    #[inline]
    fn precedes(&self, other: &Self) -> Result<bool, HeapError> {
        match self.key.partial_cmp(&other.key) {
            Some(Ordering::Less) => Ok(true),
            Some(Ordering::Greater) => Ok(false),
            Some(Ordering::Equal) => Ok(self.seq < other.seq),
            None => Err(HeapError::Incomparable),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RawHeap<K, T> {
    data: Vec<Entry<K, T>>,
    next_seq: u64,
}

impl<K, T> RawHeap<K, T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RawHeap {
            data: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&Entry<K, T>> {
        self.data.first()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    pub(crate) fn into_entries(self) -> Vec<Entry<K, T>> {
        self.data
    }

    pub(crate) fn entries(&self) -> core::slice::Iter<'_, Entry<K, T>> {
        self.data.iter()
    }

    fn entry(&mut self, key: K, value: T) -> Entry<K, T> {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        Entry { key, seq, value }
    }
}

#[allow(unused_unsafe)]
impl<K: PartialOrd, T> RawHeap<K, T> {
    /// Inserts an entry, sifting it up from the bottom.
    pub(crate) fn push(&mut self, key: K, value: T) -> Result<(), HeapError> {
        let entry = self.entry(key, value);
        let pos = self.data.len();
        let target = self.rise_target(&entry, pos)?;

        self.data.push(entry);
        // SAFETY: `pos` is the index of the entry just pushed and `target`
        //  is `pos` or one of its ancestors.
        unsafe { self.lift(pos, target) };
        Ok(())
    }

    /// Removes the minimum entry, refilling the root from the last slot.
    pub(crate) fn pop(&mut self) -> Result<Entry<K, T>, HeapError> {
        let end = self.data.len().checked_sub(1).ok_or(HeapError::Empty)?;
        let target = self.sink_target(&self.data[end], end)?;

        let mut item = self.data.pop().ok_or(HeapError::Empty)?;
        if !self.data.is_empty() {
            mem::swap(&mut item, &mut self.data[0]);
            // SAFETY: `sink_target` only returns indices below `end`, which
            //  is now `self.len()`.
            unsafe { self.sink(target) };
        }
        Ok(item)
    }

    /// Inserts an entry and removes the minimum in a single pass.
    ///
    /// When the new entry precedes the current root it is handed straight
    /// back and the heap is left untouched.
    pub(crate) fn pushpop(&mut self, key: K, value: T) -> Result<Entry<K, T>, HeapError> {
        let mut entry = self.entry(key, value);
        match self.data.first() {
            Some(root) if root.precedes(&entry)? => {}
            _ => return Ok(entry),
        }

        let target = self.sink_target(&entry, self.data.len())?;
        mem::swap(&mut entry, &mut self.data[0]);
        // SAFETY: `target < self.len()`, see `sink_target`.
        unsafe { self.sink(target) };
        Ok(entry)
    }

    /// Checks that every entry is preceded by its parent.
    pub(crate) fn check_integrity(&self) -> bool {
        (1..self.data.len()).all(|i| {
            let parent = (i - 1) / 2;
            matches!(self.data[parent].precedes(&self.data[i]), Ok(true))
        })
    }

    /// Where `entry`, placed at `pos`, comes to rest when sifted up.
    fn rise_target(&self, entry: &Entry<K, T>, mut pos: usize) -> Result<usize, HeapError> {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !entry.precedes(&self.data[parent])? {
                break;
            }
            pos = parent;
        }
        Ok(pos)
    }

    /// Where `entry`, placed at the root, comes to rest when sifted down
    /// through `data[..end]`. The root slot itself is never looked at.
    fn sink_target(&self, entry: &Entry<K, T>, end: usize) -> Result<usize, HeapError> {
        let mut pos = 0;
        loop {
            let mut child = 2 * pos + 1;
            if child >= end {
                break;
            }
            if child + 1 < end && self.data[child + 1].precedes(&self.data[child])? {
                child += 1;
            }
            if !self.data[child].precedes(entry)? {
                break;
            }
            pos = child;
        }
        Ok(pos)
    }

    // Moving entries through a `Hole` instead of swapping halves the number
    // of moves. No comparison runs while a hole is open, so nothing can
    // unwind past it.

    /// Moves the entry at `pos` up to its ancestor slot `target`, shifting
    /// the ancestors in between down by one level.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.len()` and that `target`
    /// is `pos` or an ancestor of it.
    unsafe fn lift(&mut self, pos: usize, target: usize) {
        // SAFETY: the caller guarantees that pos < self.len().
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };
        while hole.pos() > target {
            let parent = (hole.pos() - 1) / 2;
            // SAFETY: parent < hole.pos() < self.len().
            unsafe { hole.move_to(parent) };
        }
    }

    /// Moves the root entry down to `target`, shifting every entry on the
    /// path up by one level.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `target < self.len()`.
    unsafe fn sink(&mut self, target: usize) {
        // SAFETY: target < self.len() implies the heap is non-empty.
        let mut hole = unsafe { Hole::new(&mut self.data, 0) };

        // The path from the root to `target` is spelled by the bits of
        // `target + 1` below its leading one.
        let depth = (usize::BITS - (target + 1).leading_zeros() - 1) as usize;
        for level in (0..depth).rev() {
            // SAFETY: every node on the path is at most `target`, and each
            //  step goes strictly deeper than the current hole.
            unsafe { hole.move_to(((target + 1) >> level) - 1) };
        }
    }
}

/// Hole represents a hole in a slice i.e., an index without valid value
/// (because it was moved from or duplicated).
/// In drop, `Hole` will restore the slice by filling the hole
/// position with the value that was originally removed.
struct Hole<'a, T: 'a> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Create a new `Hole` at index `pos`.
    ///
    /// Unsafe because pos must be within the data slice.
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFETY: the caller guarantees that pos < data.len(). The slot is
        //  treated as vacant until `drop` writes an element back into it.
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// Move hole to new location
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    #[allow(unused_unsafe)]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        // SAFETY: both indices are in bounds and distinct, so the copy does
        //  not overlap. The slot at `index` becomes the new hole.
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const _ = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `pos` is always a valid index (see `new` and `move_to`)
        //  and its slot holds a stale copy, so overwriting it neither leaks
        //  nor double-drops.
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}
