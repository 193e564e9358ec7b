use super::OrderedIndex;
use crate::raw::RawAvlTree;

impl<K> OrderedIndex<K> {
    /// Creates an empty index with room for at least `capacity` keys before the node arena
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let index: OrderedIndex<i32> = OrderedIndex::with_capacity(16);
    /// assert!(index.is_empty());
    /// assert!(index.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedIndex {
            tree: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns the number of keys the index can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::with_capacity(32);
    /// index.insert(1);
    /// assert!(index.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
