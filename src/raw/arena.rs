use alloc::vec::Vec;

use super::handle::Handle;
use super::size::Size;

/// Append-only slot storage.
///
/// Elements are never removed, so a handle stays valid for the lifetime of the arena and
/// structural changes only ever rewrite the links stored inside the elements.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    /// The most elements an arena holds. Every element is a tree node and the root's size has to
    /// fit in a `Size`, so the last handle is never handed out.
    pub(crate) const MAX_LEN: usize = Size::MAX;

    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(Self::MAX_LEN)),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        assert!(
            self.slots.len() < Self::MAX_LEN,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Self::MAX_LEN
        );
        self.slots.push(element);
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        &self.slots[handle.to_index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.slots[handle.to_index()]
    }
}
