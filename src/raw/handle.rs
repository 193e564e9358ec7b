use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Stable index of a node slot in the arena.
///
/// Stored off-by-one in a `NonZero` so that `Option<Handle>` (used for every child and parent
/// link) costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawHandle;
        // `index + 1` cannot be zero and cannot overflow.
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::{assert_eq_size, assert_not_impl_any};

    // Child and parent links are `Option<Handle>`, so the niche must hold.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);
    // Handles are only compared, never used as map keys.
    assert_not_impl_any!(Handle: core::hash::Hash, Ord);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn first_and_last_slots() {
        assert_eq!(Handle::from_index(0).to_index(), 0);
        assert_eq!(Handle::from_index(Handle::MAX).to_index(), Handle::MAX);
        assert_ne!(Handle::from_index(0), Handle::from_index(1));
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            prop_assert_eq!(handle.to_index(), index);
        }
    }
}
