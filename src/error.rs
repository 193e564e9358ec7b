//! Error types reported by [`OrderedIndex::check_invariants`](crate::OrderedIndex::check_invariants).

/// A structural invariant of the AVL tree that does not hold.
///
/// Every operation of [`OrderedIndex`](crate::OrderedIndex) preserves these invariants, so
/// observing one of these errors means the tree was corrupted by a bug. `slot` identifies the
/// offending node by its position in the node arena, which is also its insertion order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvariantViolation {
    /// A key is not strictly between the keys of the ancestors it descends from.
    #[error("node in slot {slot} is out of order with respect to its ancestors")]
    OutOfOrder {
        /// The offending node.
        slot: usize,
    },

    /// The heights of a node's subtrees differ by more than one.
    #[error("node in slot {slot} has balance factor {balance}")]
    Unbalanced {
        /// The offending node.
        slot: usize,
        /// `height(left) - height(right)`.
        balance: isize,
    },

    /// A node's cached height does not match its subtrees.
    #[error("node in slot {slot} caches height {stored}, expected {expected}")]
    HeightMismatch {
        /// The offending node.
        slot: usize,
        /// The cached height.
        stored: usize,
        /// The height computed from the subtrees.
        expected: usize,
    },

    /// A node's cached subtree size does not match its subtrees.
    #[error("node in slot {slot} caches subtree size {stored}, expected {expected}")]
    SizeMismatch {
        /// The offending node.
        slot: usize,
        /// The cached size.
        stored: usize,
        /// The size computed from the subtrees.
        expected: usize,
    },

    /// A child's parent link does not point at the node holding it.
    #[error("node in slot {slot} does not link back to its parent")]
    ParentMismatch {
        /// The offending child.
        slot: usize,
    },

    /// The root node has a parent link.
    #[error("root node in slot {slot} has a parent")]
    RootHasParent {
        /// The root node.
        slot: usize,
    },

    /// Some allocated nodes cannot be reached from the root.
    #[error("only {reachable} of {allocated} allocated nodes are reachable from the root")]
    Unreachable {
        /// Nodes found by walking down from the root.
        reachable: usize,
        /// Nodes held by the arena.
        allocated: usize,
    },
}
