//! Contains the definition of [`Variable`].

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::{Context, Display};

/// A type variable introduced during inference.
///
/// Two variables are equal only if they are the same variable; the identity
/// is unique for all variables created in the process.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Variable {
    id: usize,
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Variable({})", self.id)
    }
}

impl Variable {
    /// Creates a new type variable that is unique for all any created ones.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        Self { id: COUNTER.fetch_add(1, Ordering::SeqCst) }
    }

    /// Returns the unique identity of the variable.
    #[must_use]
    pub const fn id(&self) -> usize { self.id }
}

impl Display for Variable {
    fn fmt(
        &self,
        _: &Context,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "$T{}", self.id)
    }
}
