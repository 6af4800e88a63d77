//! The ways in which tree operations can fail.
//!
//! These are deterministic logic errors, not transient faults - retrying an
//! operation that returned one of these will fail the same way. The tree is
//! never left partially modified: an operation that fails has not touched
//! the tree at all.

/// Error returned by the fallible [`Tree`][crate::Tree] operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `min`, `max`, `pop`, and `popleft` need at least one value to work
    /// with.
    #[error("the tree is empty")]
    EmptyTree,
    /// The tree is a set - `insert` rejects values that are already present.
    #[error("the value is already in the tree")]
    DuplicateValue,
    /// `remove` was asked to remove a value the tree doesn't contain.
    #[error("the value is not in the tree")]
    ValueNotFound,
}
