use alloc::string::String;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::fmt::{Display, Write};

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// Explicit stack for the iterative walks. An AVL tree that fits in the arena is far less than
/// 64 levels tall, so the stack never spills to the heap.
type Stack = SmallVec<[Handle; 64]>;

/// The core AVL tree backing `OrderedIndex`.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K> {
    /// Arena storing every node ever inserted. Nodes are never freed or moved.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K> RawAvlTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of keys in the tree.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no keys.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of allocated node slots.
    pub(crate) const fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the root handle, if any.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.nodes.get_mut(handle)
    }

    /// Returns the height of the whole tree in edges, or `None` when empty.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.map(|root| usize::from(self.nodes.get(root).height()))
    }

    /// Height of a possibly absent subtree; an absent subtree is -1 tall.
    #[inline]
    pub(crate) fn height_of(&self, handle: Option<Handle>) -> isize {
        handle.map_or(-1, |handle| isize::from(self.nodes.get(handle).height()))
    }

    /// Node count of a possibly absent subtree.
    #[inline]
    pub(crate) fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |handle| self.nodes.get(handle).size())
    }

    /// `height(left) - height(right)` for the node at `handle`.
    #[inline]
    pub(crate) fn balance_of(&self, handle: Handle) -> isize {
        let node = self.nodes.get(handle);
        self.height_of(node.left()) - self.height_of(node.right())
    }

    /// Recomputes the cached height of `handle` from its children.
    fn update_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        // Absent children count as -1, so this is never negative.
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height.unsigned_abs());
    }

    /// Recomputes the cached height and size of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        self.update_height(handle);
        let node = self.nodes.get(handle);
        let size = 1 + self.size_of(node.left()) + self.size_of(node.right());
        self.nodes.get_mut(handle).set_size(size);
    }

    /// Rotates the subtree rooted at `x` to the left and returns its new root.
    ///
    /// The new root inherits `x`'s parent link; reattaching it to that parent's child slot (or to
    /// `self.root`) is the caller's job.
    fn rotate_left(&mut self, x: Handle) -> Handle {
        let x_node = self.nodes.get(x);
        let y = x_node
            .right()
            .expect("`RawAvlTree::rotate_left()` - pivot has no right child!");
        let parent = x_node.parent();
        let size = x_node.size();
        let t2 = self.nodes.get(y).left();
        trace!(pivot = x.to_index(), "rotate left");

        self.nodes.get_mut(y).set_parent(parent);
        self.nodes.get_mut(x).set_parent(Some(y));
        if let Some(t2) = t2 {
            self.nodes.get_mut(t2).set_parent(Some(x));
        }

        self.nodes.get_mut(x).set_right(t2);
        self.nodes.get_mut(y).set_left(Some(x));

        // `x` now hangs below `y`, so it has to be fixed first.
        self.update(x);
        self.update_height(y);
        self.nodes.get_mut(y).set_size(size);

        y
    }

    /// Rotates the subtree rooted at `y` to the right and returns its new root.
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let y_node = self.nodes.get(y);
        let x = y_node
            .left()
            .expect("`RawAvlTree::rotate_right()` - pivot has no left child!");
        let parent = y_node.parent();
        let size = y_node.size();
        let t2 = self.nodes.get(x).right();
        trace!(pivot = y.to_index(), "rotate right");

        self.nodes.get_mut(x).set_parent(parent);
        self.nodes.get_mut(y).set_parent(Some(x));
        if let Some(t2) = t2 {
            self.nodes.get_mut(t2).set_parent(Some(y));
        }

        self.nodes.get_mut(y).set_left(t2);
        self.nodes.get_mut(x).set_right(Some(y));

        self.update(y);
        self.update_height(x);
        self.nodes.get_mut(x).set_size(size);

        x
    }

    /// Restores the balance of `n`, whose children are already balanced, and returns the root of
    /// the resulting subtree.
    fn rebalance(&mut self, n: Handle) -> Handle {
        let balance = self.balance_of(n);
        if balance > 1 {
            // A balance of +2 means the left subtree is at least one level tall.
            let left = self
                .nodes
                .get(n)
                .left()
                .expect("`RawAvlTree::rebalance()` - left-heavy node has no left child!");
            if self.balance_of(left) < 1 {
                let left = self.rotate_left(left);
                self.nodes.get_mut(n).set_left(Some(left));
            }
            self.rotate_right(n)
        } else if balance < -1 {
            let right = self
                .nodes
                .get(n)
                .right()
                .expect("`RawAvlTree::rebalance()` - right-heavy node has no right child!");
            if self.balance_of(right) > -1 {
                let right = self.rotate_right(right);
                self.nodes.get_mut(n).set_right(Some(right));
            }
            self.rotate_left(n)
        } else {
            n
        }
    }

    /// Renders every node as `key(h = height, s = size)` in preorder.
    pub(crate) fn preorder_dump(&self) -> String
    where
        K: Display,
    {
        let mut output = String::new();
        let mut stack: Stack = self.root.into_iter().collect();

        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle);
            // Formatting into a `String` cannot fail.
            let _ = write!(output, "{}(h = {}, s = {})", node.key(), node.height(), node.size());
            // Right first so that the left subtree is emitted first.
            stack.extend(node.right());
            stack.extend(node.left());
        }

        output
    }
}

impl<K: Ord> RawAvlTree<K> {
    /// Inserts `key` unless it is already present. Returns whether the key was inserted.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.alloc(Node::leaf(key, None)));
            return true;
        };

        match self.insert_below(root, key) {
            Some(new_root) => {
                self.root = Some(new_root);
                true
            }
            None => false,
        }
    }

    /// Inserts `key` into the subtree rooted at `start`.
    ///
    /// Returns the (possibly rotated) root of the subtree, or `None` if the key was already
    /// present, in which case nothing below `start` has been touched.
    fn insert_below(&mut self, start: Handle, key: K) -> Option<Handle> {
        let node = self.nodes.get(start);
        let go_left = match key.cmp(node.key()) {
            Less => true,
            Greater => false,
            Equal => {
                debug!(slot = start.to_index(), "duplicate key ignored");
                return None;
            }
        };

        let child = if go_left { node.left() } else { node.right() };
        let child = match child {
            Some(child) => self.insert_below(child, key)?,
            None => self.nodes.alloc(Node::leaf(key, Some(start))),
        };

        let node = self.nodes.get_mut(start);
        if go_left {
            node.set_left(Some(child));
        } else {
            node.set_right(Some(child));
        }

        self.update(start);
        Some(self.rebalance(start))
    }

    /// Searches for a key and returns the handle of its node if found.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }

        None
    }

    /// Counts the keys `<= key` in the subtree rooted at `start`.
    pub(crate) fn count_less_or_equal<Q>(&self, start: Option<Handle>, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = start else {
            return 0;
        };
        let node = self.nodes.get(handle);

        match node.key().borrow().cmp(key) {
            Equal => 1 + self.size_of(node.left()),
            Greater => self.count_less_or_equal(node.left(), key),
            Less => 1 + self.size_of(node.left()) + self.count_less_or_equal(node.right(), key),
        }
    }

    /// Counts the keys `>= key` in the subtree rooted at `start`.
    pub(crate) fn count_greater_or_equal<Q>(&self, start: Option<Handle>, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = start else {
            return 0;
        };
        let node = self.nodes.get(handle);

        match node.key().borrow().cmp(key) {
            Equal => 1 + self.size_of(node.right()),
            Less => self.count_greater_or_equal(node.right(), key),
            Greater => 1 + self.size_of(node.right()) + self.count_greater_or_equal(node.left(), key),
        }
    }

    /// Counts the keys in the closed interval `[low, high]`. An inverted interval is empty.
    pub(crate) fn range_count<Q>(&self, low: &Q, high: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if low > high {
            return 0;
        }
        self.range_count_below(self.root, low, high)
    }

    fn range_count_below<Q>(&self, start: Option<Handle>, low: &Q, high: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = start else {
            return 0;
        };
        let node = self.nodes.get(handle);
        let key: &Q = node.key().borrow();

        if high < key {
            self.range_count_below(node.left(), low, high)
        } else if low > key {
            self.range_count_below(node.right(), low, high)
        } else {
            // This node splits the interval: everything in the left subtree is below `high` and
            // everything in the right subtree is above `low`.
            1 + self.count_greater_or_equal(node.left(), low) + self.count_less_or_equal(node.right(), high)
        }
    }
}
