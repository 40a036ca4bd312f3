//! Structural verification errors.
//!
//! A healthy tree never produces these. They exist for
//! [`Tree::verify`](crate::Tree::verify), which walks a snapshot and
//! reports the first invariant violation it finds — used as a test
//! oracle and as an optional runtime sanity check after bulk operations.

use thiserror::Error;

/// A violated B+tree invariant, with enough context to locate the fault.
///
/// Returned by [`Tree::verify`](crate::Tree::verify). Absence of every
/// variant is the definition of a structurally valid tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// Two leaves sit at different depths.
    #[error("leaf at depth {found} but earlier leaves at depth {expected}")]
    UnevenDepth {
        /// Depth of every leaf seen before the offending one.
        expected: usize,
        /// Depth of the offending leaf.
        found: usize,
    },

    /// Keys within a node are not strictly increasing, or a key falls
    /// outside the bounds its ancestors' separators impose.
    #[error("key order violated at depth {depth}, key index {index}")]
    KeyOrder {
        /// Depth of the offending node (root = 0).
        depth: usize,
        /// Index of the first out-of-order key.
        index: usize,
    },

    /// A branch separator does not equal the minimum key of the subtree
    /// to its right.
    #[error("separator {index} at depth {depth} is not its right subtree's minimum")]
    SeparatorMismatch {
        /// Depth of the branch holding the separator.
        depth: usize,
        /// Separator index within the branch.
        index: usize,
    },

    /// A non-root node holds too few or too many keys.
    #[error("node at depth {depth} holds {found} keys, allowed {min}..={max}")]
    Occupancy {
        /// Depth of the offending node.
        depth: usize,
        /// Actual key count.
        found: usize,
        /// Minimum keys allowed for this node.
        min: usize,
        /// Maximum keys allowed for this node.
        max: usize,
    },

    /// A branch's child count is not exactly one more than its key count.
    #[error("branch at depth {depth} has {kids} children for {keys} keys")]
    ChildCount {
        /// Depth of the offending branch.
        depth: usize,
        /// Number of separator keys.
        keys: usize,
        /// Number of children.
        kids: usize,
    },

    /// The tree's cached element count disagrees with a full walk.
    #[error("cached length {cached} but walk counted {counted} entries")]
    LengthMismatch {
        /// The `len()` the tree reports.
        cached: usize,
        /// Entries counted by the verification walk.
        counted: usize,
    },
}
