//! Binary heaps ordered by a key extracted from each element.
//!
//! [`MinHeap`] hands out the element with the smallest key first, [`MaxHeap`]
//! the one with the largest. Both are aliases of [`KeyedHeap`], which stores
//! every element next to its ordering key in an array-backed binary heap.
//! A max-heap is a min-heap over negated keys.
//!
//! ```
//! use keyed_heap::{HeapError, MaxHeap, MinHeap};
//!
//! let mut min = MinHeap::from_items([5, 1, 3])?;
//! assert_eq!(min.peek(), Some(&1));
//! assert_eq!(min.pop()?, 1);
//! assert_eq!(min.pop()?, 3);
//! assert_eq!(min.pop()?, 5);
//! assert_eq!(min.pop(), Err(HeapError::Empty));
//!
//! let mut max = MaxHeap::from_items_with_key(["bb", "a", "ccc"], |s: &&str| s.len() as i32)?;
//! assert_eq!(max.pushpop("dddd")?, "dddd");
//! assert_eq!(max.pop()?, "ccc");
//! # Ok::<(), HeapError>(())
//! ```
//!
//! Elements whose keys are equal come out in the order they went in; the
//! elements themselves are never compared.

mod error;
mod heap;
mod iter;
mod order;
mod raw;

pub use error::HeapError;
pub use heap::{Identity, KeyedHeap, MaxHeap, MinHeap};
pub use iter::{IntoIterSorted, Iter};
pub use order::{MaxOrder, MinOrder, Negate, Order};
