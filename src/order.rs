//! Ordering strategies.
//!
//! A heap is always a min-heap over its *ordering keys*. What differs between
//! [`MinOrder`] and [`MaxOrder`] is only how the key extracted from an element
//! is wrapped before it is stored: unchanged, or negated.

use crate::error::HeapError;

/// Transforms an extracted key into the ordering key stored in the heap.
pub trait Order<K> {
    fn wrap(key: K) -> Result<K, HeapError>;
}

/// Smallest key first. Keys are stored as extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinOrder;

/// Largest key first. Keys are negated before they are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxOrder;

impl<K> Order<K> for MinOrder {
    #[inline]
    fn wrap(key: K) -> Result<K, HeapError> {
        Ok(key)
    }
}

impl<K: Negate> Order<K> for MaxOrder {
    #[inline]
    fn wrap(key: K) -> Result<K, HeapError> {
        key.checked_negate().ok_or(HeapError::Unnegatable)
    }
}

/// Key types usable with [`MaxOrder`].
///
/// Returns `None` when the negation is not representable, e.g. `i8::MIN`.
///
/// ```
/// use keyed_heap::Negate;
///
/// assert_eq!(5i32.checked_negate(), Some(-5));
/// assert_eq!(i32::MIN.checked_negate(), None);
/// assert_eq!(1.5f64.checked_negate(), Some(-1.5));
/// ```
pub trait Negate: Sized {
    fn checked_negate(self) -> Option<Self>;
}

macro_rules! negate_int {
    ($($t:ty)*) => {$(
        impl Negate for $t {
            #[inline]
            fn checked_negate(self) -> Option<Self> {
                self.checked_neg()
            }
        }
    )*};
}

macro_rules! negate_float {
    ($($t:ty)*) => {$(
        impl Negate for $t {
            #[inline]
            fn checked_negate(self) -> Option<Self> {
                Some(-self)
            }
        }
    )*};
}

negate_int! { i8 i16 i32 i64 i128 isize }
negate_float! { f32 f64 }
