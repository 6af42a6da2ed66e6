//! Errors reported by edit operations.

use thiserror::Error;

/// Reasons an edit is rejected.
///
/// Every check runs before the table is touched, so a rejected edit leaves
/// the table exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// A delete of zero characters.
    #[error("delete length must be at least 1")]
    InvalidLength,
    /// The deleted range `[position - length, position)` would start before
    /// the beginning of the document.
    #[error("cannot delete {length} chars ending at {position}: range starts before the document")]
    InvalidPosition { position: usize, length: usize },
    /// A delete position past the end of the document.
    #[error("position {position} is beyond the end of the document (length {len})")]
    PositionBeyondDocument { position: usize, len: usize },
}
