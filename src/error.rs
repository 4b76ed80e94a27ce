use thiserror::Error;

/// Errors returned by fallible [`IntervalTree`] operations.
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The interval has a lower bound greater than its upper bound.
    ///
    /// The tree is left unchanged.
    #[error("invalid interval: low must be less than or equal to high")]
    InvalidInterval,
}
