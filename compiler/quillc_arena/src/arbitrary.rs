//! Arbitrary implementations for [`ID`] and [`Arena`].

use proptest::{
    collection::vec,
    prelude::{any, Arbitrary, BoxedStrategy, Strategy},
};

use crate::{Arena, Key, ID};

/// The largest index generated for an arbitrary [`ID`].
pub const MAX_INDEX: usize = 1024;

impl<T: 'static> Arbitrary for ID<T> {
    type Strategy = BoxedStrategy<Self>;
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        (0..=MAX_INDEX).prop_map(Self::new).boxed()
    }
}

impl<T: Arbitrary + 'static, Idx: Key> Arbitrary for Arena<T, Idx> {
    type Strategy = BoxedStrategy<Self>;
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        vec(any::<T>(), 0..16)
            .prop_map(|items| {
                let mut arena = Self::new();

                for item in items {
                    arena.insert(item);
                }

                arena
            })
            .boxed()
    }
}
