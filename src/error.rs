use thiserror::Error;

/// Errors that can occur when configuring a tree.
///
/// Once a tree is built, every well-typed key is a legal input to every
/// operation: a missing key on lookup or removal and a duplicate key on
/// insertion are ordinary outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The requested minimum degree cannot form a valid multiway node:
    /// with `t < 2` an internal node could not hold a single separator
    /// between two children.
    #[error("minimum degree must be at least 2, got {0}")]
    MinDegreeTooSmall(usize),
}
