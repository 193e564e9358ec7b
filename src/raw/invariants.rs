//! Structural invariant checks for the AVL tree.
//!
//! The walk recomputes every height and size from scratch instead of trusting the cached
//! values, so it catches stale metadata as well as broken links.

use super::handle::Handle;
use super::raw_avl_tree::RawAvlTree;
use crate::InvariantViolation;

/// Height and size actually found below a node.
struct Subtree {
    height: isize,
    size: usize,
}

impl Subtree {
    const EMPTY: Self = Self { height: -1, size: 0 };
}

impl<K: Ord> RawAvlTree<K> {
    /// Walks the whole tree and reports the first violated invariant.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let allocated = self.allocated();
        let Some(root) = self.root() else {
            return if allocated == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::Unreachable { reachable: 0, allocated })
            };
        };

        if self.node(root).parent().is_some() {
            return Err(InvariantViolation::RootHasParent { slot: root.to_index() });
        }

        let reachable = self.check_subtree(root, None, None)?.size;
        if reachable != allocated {
            return Err(InvariantViolation::Unreachable { reachable, allocated });
        }

        Ok(())
    }

    /// Checks the subtree rooted at `handle`, whose keys must lie strictly between `lower` and
    /// `upper`.
    fn check_subtree(&self, handle: Handle, lower: Option<&K>, upper: Option<&K>) -> Result<Subtree, InvariantViolation> {
        let node = self.node(handle);
        let slot = handle.to_index();

        if lower.is_some_and(|lower| node.key() <= lower) || upper.is_some_and(|upper| node.key() >= upper) {
            return Err(InvariantViolation::OutOfOrder { slot });
        }

        let left = match node.left() {
            Some(left) => {
                self.check_parent(left, handle)?;
                self.check_subtree(left, lower, Some(node.key()))?
            }
            None => Subtree::EMPTY,
        };
        let right = match node.right() {
            Some(right) => {
                self.check_parent(right, handle)?;
                self.check_subtree(right, Some(node.key()), upper)?
            }
            None => Subtree::EMPTY,
        };

        let balance = left.height - right.height;
        if balance.abs() > 1 {
            return Err(InvariantViolation::Unbalanced { slot, balance });
        }

        let height = 1 + left.height.max(right.height);
        let stored = usize::from(node.height());
        if stored != height.unsigned_abs() {
            return Err(InvariantViolation::HeightMismatch {
                slot,
                stored,
                expected: height.unsigned_abs(),
            });
        }

        let size = 1 + left.size + right.size;
        if node.size() != size {
            return Err(InvariantViolation::SizeMismatch {
                slot,
                stored: node.size(),
                expected: size,
            });
        }

        Ok(Subtree { height, size })
    }

    fn check_parent(&self, child: Handle, parent: Handle) -> Result<(), InvariantViolation> {
        if self.node(child).parent() == Some(parent) {
            Ok(())
        } else {
            Err(InvariantViolation::ParentMismatch { slot: child.to_index() })
        }
    }
}
