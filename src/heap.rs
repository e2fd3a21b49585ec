//! [`KeyedHeap`]: a key function and an order variant on top of the raw
//! binary heap, plus the [`MinHeap`] and [`MaxHeap`] aliases.

use core::fmt;
use core::marker::PhantomData;

use crate::error::HeapError;
use crate::iter::{IntoIterSorted, Iter};
use crate::order::{MaxOrder, MinOrder, Order};
use crate::raw::RawHeap;

/// Key function used when elements are their own keys.
pub type Identity<T> = fn(&T) -> T;

/// A priority queue ordered by a key extracted from each element.
///
/// The key function `F` is applied once per insertion and the result is stored
/// next to the element, so it has to be a pure function of the element.
/// Elements with equal keys leave the heap in the order they were inserted.
///
/// The order variant `O` decides whether the smallest ([`MinOrder`]) or the
/// largest ([`MaxOrder`]) key comes out first. Use the [`MinHeap`] and
/// [`MaxHeap`] aliases rather than naming `O` directly.
///
/// Keys only need [`PartialOrd`]. A key that cannot be compared with one it
/// meets while sifting (a NaN float, say) makes the operation fail with
/// [`HeapError::Incomparable`] and leaves the heap as it was.
///
/// # Examples
///
/// ```
/// use keyed_heap::{HeapError, MinHeap};
///
/// let mut heap = MinHeap::with_key(|task: &(&str, u32)| task.1);
///
/// // Nothing there yet, so peek has nothing to show.
/// assert_eq!(heap.peek(), None);
///
/// heap.push(("write docs", 3))?;
/// heap.push(("fix build", 1))?;
/// heap.push(("review", 2))?;
///
/// assert_eq!(heap.peek(), Some(&("fix build", 1)));
/// assert_eq!(heap.size(), 3);
///
/// // Iterating leaves the heap alone.
/// let names: Vec<_> = heap.iter().map(|t| t.map(|t| t.0)).collect::<Result<_, _>>()?;
/// assert_eq!(names, ["fix build", "review", "write docs"]);
/// assert_eq!(heap.size(), 3);
///
/// assert_eq!(heap.pop()?.0, "fix build");
/// assert_eq!(heap.pop()?.0, "review");
/// assert_eq!(heap.pop()?.0, "write docs");
/// assert_eq!(heap.pop(), Err(HeapError::Empty));
/// # Ok::<(), HeapError>(())
/// ```
///
/// # Time complexity
///
/// | [push]        | [pop]         | [pushpop]     | [peek]  |
/// |---------------|---------------|---------------|---------|
/// | *O*(log(*n*)) | *O*(log(*n*)) | *O*(log(*n*)) | *O*(1)  |
///
/// [push]: KeyedHeap::push
/// [pop]: KeyedHeap::pop
/// [pushpop]: KeyedHeap::pushpop
/// [peek]: KeyedHeap::peek
pub struct KeyedHeap<T, K = T, F = Identity<T>, O = MinOrder> {
    raw: RawHeap<K, T>,
    key: F,
    order: PhantomData<fn() -> O>,
}

/// A [`KeyedHeap`] that yields the smallest key first.
pub type MinHeap<T, K = T, F = Identity<T>> = KeyedHeap<T, K, F, MinOrder>;

/// A [`KeyedHeap`] that yields the largest key first.
///
/// Keys are negated on the way in, so the key type must implement
/// [`Negate`](crate::Negate).
///
/// ```
/// use keyed_heap::MaxHeap;
///
/// let mut heap = MaxHeap::from_items([5, 1, 3])?;
/// assert_eq!(heap.pop()?, 5);
/// assert_eq!(heap.pop()?, 3);
/// assert_eq!(heap.pop()?, 1);
/// # Ok::<(), keyed_heap::HeapError>(())
/// ```
pub type MaxHeap<T, K = T, F = Identity<T>> = KeyedHeap<T, K, F, MaxOrder>;

impl<T: Clone, O> KeyedHeap<T, T, Identity<T>, O> {
    /// Creates an empty heap whose elements are their own keys.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let mut heap = MinHeap::new();
    /// heap.push(4)?;
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_key(T::clone)
    }

    /// Creates an empty heap with room for `capacity` elements.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let mut heap = MinHeap::with_capacity(10);
    /// assert!(heap.capacity() >= 10);
    /// heap.push("x")?;
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        KeyedHeap {
            raw: RawHeap::with_capacity(capacity),
            key: T::clone,
            order: PhantomData,
        }
    }
}

impl<T, O> KeyedHeap<T, T, Identity<T>, O>
where
    T: Clone + PartialOrd,
    O: Order<T>,
{
    /// Builds a heap from `items`, pushing them one by one in iteration
    /// order.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let heap = MinHeap::from_items([5, 1, 3])?;
    /// assert_eq!(heap.peek(), Some(&1));
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    pub fn from_items<I>(items: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = Self::new();
        heap.try_extend(items)?;
        Ok(heap)
    }
}

impl<T, K, F, O> KeyedHeap<T, K, F, O> {
    /// Creates an empty heap ordered by `key`.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let mut heap = MinHeap::with_key(|s: &String| s.len());
    /// heap.push("three".to_string())?;
    /// heap.push("one".to_string())?;
    /// assert_eq!(heap.peek().map(String::as_str), Some("one"));
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    #[must_use]
    pub fn with_key(key: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        KeyedHeap {
            raw: RawHeap::with_capacity(0),
            key,
            order: PhantomData,
        }
    }

    /// Builds a heap ordered by `key` from `items`, pushing them one by one
    /// in iteration order.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let heap = MinHeap::from_items_with_key(["bb", "a", "ccc"], |s: &&str| s.len())?;
    /// let sorted: Vec<_> = heap.iter().collect::<Result<_, _>>()?;
    /// assert_eq!(sorted, ["a", "bb", "ccc"]);
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    pub fn from_items_with_key<I>(items: I, key: F) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> K,
        K: PartialOrd,
        O: Order<K>,
    {
        let mut heap = Self::with_key(key);
        heap.try_extend(items)?;
        Ok(heap)
    }

    /// Returns the element that [`pop`](Self::pop) would remove, or `None` if
    /// the heap is empty.
    ///
    /// # Time complexity
    ///
    /// Cost is *O*(1) in the worst case.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.raw.peek().map(|entry| &entry.value)
    }

    /// Returns the number of elements in the heap.
    #[must_use]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Same as [`size`](Self::size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the heap holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the heap can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }

    /// Discards as much additional capacity as possible.
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }

    /// Consumes the heap and returns its elements in arbitrary order.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_vec(self) -> Vec<T> {
        self.raw
            .into_entries()
            .into_iter()
            .map(|entry| entry.value)
            .collect()
    }
}

impl<T, K, F, O> KeyedHeap<T, K, F, O>
where
    F: Fn(&T) -> K,
    K: PartialOrd,
    O: Order<K>,
{
    fn wrap(&self, value: &T) -> Result<K, HeapError> {
        O::wrap((self.key)(value))
    }

    /// Pushes an element onto the heap.
    ///
    /// # Errors
    ///
    /// [`HeapError::Incomparable`] if the element's key cannot be ordered
    /// against the keys it is compared with, [`HeapError::Unnegatable`] if a
    /// max-ordered heap cannot negate it. The heap is unchanged on error.
    ///
    /// # Time complexity
    ///
    /// *O*(log(*n*)), plus an amortized reallocation.
    pub fn push(&mut self, value: T) -> Result<(), HeapError> {
        let key = self.wrap(&value)?;
        self.raw.push(key, value)
    }

    /// Removes the first element in heap order.
    ///
    /// # Errors
    ///
    /// [`HeapError::Empty`] if there is nothing to remove.
    ///
    /// ```
    /// use keyed_heap::{HeapError, MinHeap};
    ///
    /// let mut heap = MinHeap::from_items([1, 3])?;
    /// assert_eq!(heap.pop(), Ok(1));
    /// assert_eq!(heap.pop(), Ok(3));
    /// assert_eq!(heap.pop(), Err(HeapError::Empty));
    /// # Ok::<(), HeapError>(())
    /// ```
    ///
    /// # Time complexity
    ///
    /// The worst case cost of `pop` on a heap containing *n* elements is *O*(log(*n*)).
    pub fn pop(&mut self) -> Result<T, HeapError> {
        self.raw.pop().map(|entry| entry.value)
    }

    /// Pushes `value` and then pops, in a single pass over the heap.
    ///
    /// Returns `value` itself when it would come out first, including when
    /// the heap is empty; the heap is then left untouched.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let mut heap = MinHeap::new();
    /// assert_eq!(heap.pushpop(10)?, 10);
    /// assert_eq!(heap.size(), 0);
    ///
    /// heap.push(4)?;
    /// assert_eq!(heap.pushpop(7)?, 4);
    /// assert_eq!(heap.peek(), Some(&7));
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    pub fn pushpop(&mut self, value: T) -> Result<T, HeapError> {
        let key = self.wrap(&value)?;
        self.raw.pushpop(key, value).map(|entry| entry.value)
    }

    /// Pushes every item in iteration order, stopping at the first failure.
    ///
    /// Items pushed before the failing one stay in the heap.
    pub fn try_extend<I>(&mut self, items: I) -> Result<(), HeapError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = items.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);

        for value in iter {
            self.push(value)?;
        }
        Ok(())
    }

    /// Consumes the heap, yielding its elements in heap order.
    pub fn into_iter_sorted(self) -> IntoIterSorted<K, T> {
        IntoIterSorted::new(self.raw)
    }

    /// Consumes the heap and returns its elements in heap order.
    ///
    /// ```
    /// use keyed_heap::MaxHeap;
    ///
    /// let heap = MaxHeap::from_items_with_key(["bb", "a", "ccc"], |s: &&str| s.len() as i64)?;
    /// assert_eq!(heap.into_sorted_vec()?, ["ccc", "bb", "a"]);
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    pub fn into_sorted_vec(self) -> Result<Vec<T>, HeapError> {
        self.into_iter_sorted().collect()
    }

    /// Checks the heap-order invariant: every element is preceded by its
    /// parent.
    pub fn check_integrity(&self) -> bool {
        self.raw.check_integrity()
    }
}

impl<T: Clone, K: Clone + PartialOrd, F, O> KeyedHeap<T, K, F, O> {
    /// Returns an iterator over a snapshot of the heap, in heap order.
    ///
    /// The snapshot is taken when `iter` is called; the heap itself is never
    /// modified and can be iterated again. Each step is a `Result` because
    /// draining the snapshot compares keys.
    ///
    /// ```
    /// use keyed_heap::MinHeap;
    ///
    /// let heap = MinHeap::from_items([4, 1, 3, 2])?;
    /// let first: Vec<_> = heap.iter().collect::<Result<_, _>>()?;
    /// let second: Vec<_> = heap.iter().collect::<Result<_, _>>()?;
    /// assert_eq!(first, [1, 2, 3, 4]);
    /// assert_eq!(first, second);
    /// assert_eq!(heap.size(), 4);
    /// # Ok::<(), keyed_heap::HeapError>(())
    /// ```
    pub fn iter(&self) -> Iter<K, T> {
        Iter::new(self.raw.clone())
    }
}

impl<'a, T: Clone, K: Clone + PartialOrd, F, O> IntoIterator for &'a KeyedHeap<T, K, F, O> {
    type Item = Result<T, HeapError>;
    type IntoIter = Iter<K, T>;

    fn into_iter(self) -> Iter<K, T> {
        self.iter()
    }
}

impl<T: Clone, K: Clone, F: Clone, O> Clone for KeyedHeap<T, K, F, O> {
    fn clone(&self) -> Self {
        KeyedHeap {
            raw: self.raw.clone(),
            key: self.key.clone(),
            order: PhantomData,
        }
    }
}

impl<T: Clone, O> Default for KeyedHeap<T, T, Identity<T>, O> {
    /// Creates an empty identity-keyed heap.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, K, F, O> fmt::Debug for KeyedHeap<T, K, F, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.raw.entries().map(|entry| &entry.value))
            .finish()
    }
}
