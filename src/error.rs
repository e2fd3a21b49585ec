use thiserror::Error;

/// Errors reported by heap operations.
///
/// A failed operation never leaves the heap half-modified: every comparison
/// a mutation depends on is made before the backing storage is touched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `pop` was called on a heap with no elements.
    #[error("pop from an empty heap")]
    Empty,

    /// Two ordering keys had no relative order (for example a NaN float key).
    #[error("ordering keys are not comparable")]
    Incomparable,

    /// A max-ordered heap could not negate a key, e.g. `i32::MIN`.
    #[error("ordering key cannot be negated")]
    Unnegatable,
}
