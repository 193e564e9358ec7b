use super::handle::Handle;
use super::size::Size;

/// One stored key together with its structural links and cached subtree metadata.
#[derive(Clone)]
pub(crate) struct Node<K> {
    key: K,
    left: Option<Handle>,
    right: Option<Handle>,
    // Non-owning back-reference; `None` for the root.
    parent: Option<Handle>,
    // Longest downward path in edges, so a leaf is 0.
    height: u8,
    // Number of nodes in the subtree rooted here, including this one.
    size: Size,
}

impl<K> Node<K> {
    /// Creates a detached leaf hanging below `parent`.
    pub(crate) const fn leaf(key: K, parent: Option<Handle>) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
            height: 0,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    /// Sets the cached height.
    ///
    /// An AVL tree addressable by `Handle` is at most ~1.44 * 32 levels tall, so the height always
    /// fits in a byte.
    pub(crate) fn set_height(&mut self, height: usize) {
        assert!(height <= usize::from(u8::MAX), "`Node::set_height()` - `height` > `u8::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let height = height as u8;
        self.height = height;
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size.to_usize()
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = Size::from_usize(size);
    }
}
