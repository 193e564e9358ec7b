//! An ordered set of unique keys with O(log n) range counting.

use alloc::string::String;
use core::borrow::Borrow;
use core::fmt::{self, Display};

use crate::InvariantViolation;
use crate::raw::RawAvlTree;

mod capacity;
mod node_ref;

pub use node_ref::NodeRef;

/// An ordered set of unique keys based on an AVL tree.
///
/// Besides membership, every node caches the height and size of its subtree, so the number of
/// keys inside any closed interval can be computed in O(log n) with
/// [`range_count`](Self::range_count).
///
/// Keys default to [`String`], and every query accepts a borrowed form of the key, so an
/// `OrderedIndex<String>` is queried with `&str`.
///
/// Keys can only be added: there is no removal, and inserting a key that is already present is a
/// no-op that drops the new key.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the index. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `OrderedIndex` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use avl_index::OrderedIndex;
///
/// let mut words: OrderedIndex = OrderedIndex::new();
///
/// words.insert("pear".to_owned());
/// words.insert("apple".to_owned());
/// words.insert("fig".to_owned());
///
/// assert!(words.contains("fig"));
/// assert_eq!(words.range_count("b", "g"), 1);
/// assert_eq!(words.count_less_or_equal("fig"), 2);
/// ```
///
/// An `OrderedIndex` with a known list of keys can be initialized from an array:
///
/// ```
/// use avl_index::OrderedIndex;
///
/// let index = OrderedIndex::from([3, 1, 2]);
/// assert_eq!(index.root().map(|root| *root.key()), Some(2));
/// ```
pub struct OrderedIndex<K = String> {
    tree: RawAvlTree<K>,
}

impl<K> OrderedIndex<K> {
    /// Makes a new, empty `OrderedIndex`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// index.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OrderedIndex { tree: RawAvlTree::new() }
    }

    /// Returns the number of keys in the index.
    ///
    /// This is the subtree size cached at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// assert_eq!(index.len(), 0);
    /// index.insert(1);
    /// index.insert(1);
    /// assert_eq!(index.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the index contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// assert!(index.is_empty());
    /// index.insert(1);
    /// assert!(!index.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the height of the tree, counted in edges from the root to the deepest leaf, or
    /// `None` if the index is empty.
    ///
    /// A single key has height 0. The AVL balance keeps the height below
    /// `1.44 * log2(len + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index: OrderedIndex<u32> = (1..=7).collect();
    /// assert_eq!(index.height(), Some(2));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.tree.height()
    }

    /// Returns the root node, or `None` if the index is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.tree.root().map(|root| NodeRef::new(&self.tree, root))
    }

    /// Renders the tree in preorder for debugging, one `key(h = height, s = size)` group per node
    /// with no separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from(["a", "b", "c"]);
    /// assert_eq!(index.preorder_dump(), "b(h = 1, s = 3)a(h = 0, s = 1)c(h = 0, s = 1)");
    /// ```
    #[must_use]
    pub fn preorder_dump(&self) -> String
    where
        K: Display,
    {
        self.tree.preorder_dump()
    }
}

impl<K: Ord> OrderedIndex<K> {
    /// Adds a key to the index.
    ///
    /// Returns whether the key was newly inserted. That is:
    ///
    /// - If the index did not previously contain an equal key, `true` is returned.
    /// - If the index already contained an equal key, `false` is returned, and the index is
    ///   not modified: the stored key is kept and `key` is dropped.
    ///
    /// # Complexity
    ///
    /// O(log n), with at most two rotations.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    ///
    /// assert_eq!(index.insert(2), true);
    /// assert_eq!(index.insert(2), false);
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(key)
    }

    /// Returns the node holding a key equal to `key`, or `None` if there is none.
    ///
    /// The key may be any borrowed form of the index's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index: OrderedIndex = ["m", "a"].into_iter().map(String::from).collect();
    ///
    /// let node = index.find("a").expect("`a` was inserted");
    /// assert_eq!(node.key(), "a");
    /// assert_eq!(node.parent().map(|parent| parent.key().as_str()), Some("m"));
    /// assert!(index.find("x").is_none());
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.search(key).map(|handle| NodeRef::new(&self.tree, handle))
    }

    /// Returns `true` if the index contains a key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([1, 2, 3]);
    /// assert!(index.contains(&1));
    /// assert!(!index.contains(&4));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.search(key).is_some()
    }

    /// Returns the number of keys `k` with `low <= k <= high`.
    ///
    /// Both bounds are inclusive and need not be present in the index. If `low > high` the
    /// interval is empty and `0` is returned.
    ///
    /// # Complexity
    ///
    /// O(log n), independent of how many keys fall inside the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from(["d", "b", "f", "a", "c", "e", "g"]);
    ///
    /// assert_eq!(index.range_count("b", "f"), 5);
    /// assert_eq!(index.range_count("bb", "dd"), 2);
    /// assert_eq!(index.range_count("d", "d"), 1);
    /// assert_eq!(index.range_count("f", "b"), 0);
    /// ```
    #[must_use]
    pub fn range_count<Q>(&self, low: &Q, high: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.range_count(low, high)
    }

    /// Returns the number of keys less than or equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([10, 20, 30]);
    /// assert_eq!(index.count_less_or_equal(&20), 2);
    /// assert_eq!(index.count_less_or_equal(&25), 2);
    /// assert_eq!(index.count_less_or_equal(&5), 0);
    /// ```
    #[must_use]
    pub fn count_less_or_equal<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.count_less_or_equal(self.tree.root(), key)
    }

    /// Returns the number of keys greater than or equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([10, 20, 30]);
    /// assert_eq!(index.count_greater_or_equal(&20), 2);
    /// assert_eq!(index.count_greater_or_equal(&15), 2);
    /// assert_eq!(index.count_greater_or_equal(&35), 0);
    /// ```
    #[must_use]
    pub fn count_greater_or_equal<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.count_greater_or_equal(self.tree.root(), key)
    }

    /// Walks the whole tree and checks every structural invariant: key order, AVL balance,
    /// cached heights and subtree sizes, parent links, and that every node is reachable.
    ///
    /// The operations of `OrderedIndex` preserve all of these, so this only fails if the
    /// tree has been corrupted. It is meant for tests and debugging.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index: OrderedIndex<u32> = (0..100).rev().collect();
    /// assert_eq!(index.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.tree.check_invariants()
    }
}

impl<K> Default for OrderedIndex<K> {
    /// Creates an empty `OrderedIndex`.
    fn default() -> OrderedIndex<K> {
        OrderedIndex::new()
    }
}

impl<K: Clone> Clone for OrderedIndex<K> {
    fn clone(&self) -> Self {
        OrderedIndex { tree: self.tree.clone() }
    }
}

impl<K: fmt::Debug> fmt::Debug for OrderedIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("len", &self.len())
            .field("root", &self.root())
            .finish()
    }
}

impl<K: Ord> FromIterator<K> for OrderedIndex<K> {
    /// Inserts the keys in iteration order; later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = OrderedIndex::new();
        index.extend(iter);
        index
    }
}

impl<K: Ord> Extend<K> for OrderedIndex<K> {
    #[inline]
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for OrderedIndex<K> {
    /// Converts a `[K; N]` into an `OrderedIndex<K>`, inserting the keys in array order.
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index1 = OrderedIndex::from([1, 2, 3, 4]);
    /// let index2: OrderedIndex<_> = [1, 2, 3, 4].into();
    /// assert_eq!(index1.preorder_dump(), index2.preorder_dump());
    /// ```
    fn from(arr: [K; N]) -> Self {
        let mut index = OrderedIndex::new();
        index.extend(arr);
        index
    }
}
