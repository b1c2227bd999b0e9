//! Error types for ordtree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in ordtree.
///
/// The tree itself has exactly one runtime failure (allocation). The other
/// variants cover construction, self-checks and the line driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A node could not reserve its slots.
    ///
    /// Raised only while creating a node: a new leaf root, a new internal
    /// root, or the sibling produced by a split.
    #[error("out of memory: could not allocate node with {slots} slots")]
    OutOfMemory { slots: usize },

    /// Degree outside [`MIN_DEGREE`](crate::common::config::MIN_DEGREE)
    /// ..= [`MAX_DEGREE`](crate::common::config::MAX_DEGREE).
    #[error("invalid degree {0}: a B-tree needs 2 <= degree <= usize::MAX / 2")]
    InvalidDegree(usize),

    /// [`BTree::validate`](crate::BTree::validate) found a broken invariant.
    ///
    /// This indicates a bug or an inconsistent comparator.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O error from the sort driver.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error came from node allocation.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Error::OutOfMemory { .. })
    }
}
