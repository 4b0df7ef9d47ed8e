//! Arbitrary implementations for the atomic types.

use proptest::{
    prelude::{Arbitrary, BoxedStrategy, Just, Strategy},
    sample::select,
};
use strum::IntoEnumIterator;

use super::Primitive;
use crate::variable::Variable;

impl Arbitrary for Primitive {
    type Strategy = BoxedStrategy<Self>;
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        select(Self::iter().collect::<Vec<_>>()).boxed()
    }
}

impl Arbitrary for Variable {
    type Strategy = BoxedStrategy<Self>;
    type Parameters = ();

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        Just(()).prop_map(|()| Self::new()).boxed()
    }
}
