use thiserror::Error;

/// Errors from buffer construction and layout validation.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// `product(extents)` overflowed `usize`.
    #[error("extent element count overflow")]
    ExtentOverflow,
    /// A storage ordering was not a permutation of the axes.
    #[error("storage ordering is not a permutation of the axes")]
    InvalidOrdering,
    /// A caller-supplied slice doesn't match the element count implied by the
    /// extents.
    #[error("wrong element count: expected {expected}, got {actual}")]
    WrongElementCount { expected: usize, actual: usize },
}
