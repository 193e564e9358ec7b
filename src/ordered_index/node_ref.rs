use core::fmt;

use crate::raw::{Handle, Node, RawAvlTree};

/// A read-only view of one node of an [`OrderedIndex`](crate::OrderedIndex).
///
/// This `struct` is returned by [`OrderedIndex::find`](crate::OrderedIndex::find) and
/// [`OrderedIndex::root`](crate::OrderedIndex::root). From it, the tree can be navigated in every
/// direction, including upwards through [`parent`](Self::parent).
///
/// Two `NodeRef`s are equal when they designate the same node of the same index.
///
/// # Examples
///
/// ```
/// use avl_index::OrderedIndex;
///
/// let index = OrderedIndex::from(["d", "b", "f", "a"]);
/// let a = index.find("a").unwrap();
///
/// assert_eq!(a.height(), 0);
/// assert_eq!(a.subtree_size(), 1);
///
/// let b = a.parent().unwrap();
/// assert_eq!(*b.key(), "b");
/// assert_eq!(b.balance_factor(), 1);
/// assert_eq!(b.left(), Some(a));
/// assert_eq!(b.parent(), index.root());
/// ```
pub struct NodeRef<'a, K> {
    tree: &'a RawAvlTree<K>,
    handle: Handle,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) const fn new(tree: &'a RawAvlTree<K>, handle: Handle) -> Self {
        NodeRef { tree, handle }
    }

    fn node(&self) -> &'a Node<K> {
        self.tree.node(self.handle)
    }

    fn to(&self, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| NodeRef::new(self.tree, handle))
    }

    /// Returns the key stored in this node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    /// Returns the height of this node: the number of edges on the longest path down to a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.node().height())
    }

    /// Returns the number of keys in the subtree rooted at this node, including its own.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        self.node().size()
    }

    /// Returns `height(left) - height(right)`, where a missing child has height -1. Always
    /// within `-1..=1`.
    #[must_use]
    pub fn balance_factor(&self) -> isize {
        self.tree.balance_of(self.handle)
    }

    /// Returns the parent of this node, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.to(self.node().parent())
    }

    /// Returns the left child, whose subtree holds only smaller keys.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.to(self.node().left())
    }

    /// Returns the right child, whose subtree holds only greater keys.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.to(self.node().right())
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .field("subtree_size", &self.subtree_size())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
