use super::handle::Handle;

/// Number of nodes in a subtree.
///
/// A `Size` shares the handle's representation (and its niche). The root's size counts every
/// node of the tree, so `Size::MAX` is also the most nodes a tree may hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }
}
