//! Contains the definition of [`SubstitutionTable`], the mapping from type
//! variables to types that the constraint solver builds while unifying.
//!
//! The table is a value: cloning it is cheap because clones share the same
//! storage until one of them binds a new variable, at which point the binding
//! table receives its own copy. This lets a backtracking solver hand a copy
//! of the table to each branch it explores.

use std::{
    collections::{hash_map, HashMap, HashSet},
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use getset::CopyGetters;
use quillc_term::{
    r#type::Type, variable::Variable, Context, Display, DisplayObject,
};

mod reify;

/// Determines how thoroughly [`SubstitutionTable::bind`] looks for the
/// variable being bound inside its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OccursCheck {
    /// Looks through function, union and metatype types of the replacement.
    ///
    /// Tuples are not looked into; recursive types are expressed through
    /// them and reification handles the cycles they form.
    #[default]
    Eager,

    /// Only compares the variable with the replacement after walking it.
    ///
    /// A table built this way may hold bindings such as `T = T -> Int` whose
    /// reification doesn't terminate.
    Shallow,
}

/// An error returned by [`SubstitutionTable::bind`].
///
/// Both variants mean that the solver derived contradicting bindings; the
/// table is left untouched when they are returned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
pub enum BindError {
    /// The variable is already substituted by a type other than the one
    /// requested.
    #[error(
        "the type variable {variable:?} is already substituted by {bound:?}, \
         which is inconsistent with {requested:?}"
    )]
    InconsistentSubstitution {
        /// The variable that was requested to be bound.
        variable: Variable,

        /// The type the variable is already substituted by.
        bound: Type,

        /// The type requested to be bound.
        requested: Type,
    },

    /// The replacement refers back to the variable being bound.
    #[error(
        "binding the type variable {variable:?} to {replacement:?} would make \
         its substitution cyclic"
    )]
    OccursCheckFailure {
        /// The unbound variable at the end of the requested variable's
        /// chain.
        variable: Variable,

        /// The type requested to be bound.
        replacement: Type,
    },
}

/// A mapping from type variables to their substitutions.
///
/// Equality compares the whole mappings; see
/// [`SubstitutionTable::is_equivalent`] for the comparison the solver cares
/// about.
#[derive(Debug, Clone, Default, CopyGetters)]
pub struct SubstitutionTable {
    mappings: Arc<HashMap<Variable, Type>>,

    /// The occurs check performed by [`SubstitutionTable::bind`].
    #[get_copy = "pub"]
    occurs_check: OccursCheck,
}

impl SubstitutionTable {
    /// Creates a new empty [`SubstitutionTable`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a new empty [`SubstitutionTable`] binding variables with the
    /// given occurs check.
    #[must_use]
    pub fn with_occurs_check(occurs_check: OccursCheck) -> Self {
        Self { mappings: Arc::default(), occurs_check }
    }

    /// Returns the number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize { self.mappings.len() }

    /// Returns `true` if no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.mappings.is_empty() }

    /// Returns the type the variable is directly bound to, without walking.
    #[must_use]
    pub fn get(&self, variable: Variable) -> Option<Type> {
        self.mappings.get(&variable).copied()
    }

    /// Returns an iterator over the bindings of the table.
    ///
    /// The order of the bindings is **not** specified.
    pub fn iter(&self) -> hash_map::Iter<'_, Variable, Type> {
        self.mappings.iter()
    }

    /// Follows the chain of bindings starting at `ty`.
    ///
    /// Returns the first type of the chain that is not a variable, or the
    /// last variable of the chain if it's unbound. Types other than
    /// variables are returned as is.
    #[must_use]
    pub fn walk(&self, ty: Type) -> Type {
        let mut current = ty;

        while let Type::Variable(variable) = current {
            match self.mappings.get(&variable) {
                Some(bound) => current = *bound,
                None => break,
            }
        }

        current
    }

    /// Binds the end of `variable`'s chain to `ty`.
    ///
    /// Binding a variable that already resolves to `ty` does nothing, this
    /// includes a bound variable whose chain ends at the unbound variable
    /// `ty` resolves to.
    ///
    /// # Errors
    ///
    /// - [`BindError::InconsistentSubstitution`] if `variable` already
    ///   resolves to a type other than `ty`.
    /// - [`BindError::OccursCheckFailure`] if `ty` resolves to the unbound
    ///   variable itself or, with [`OccursCheck::Eager`], refers to it.
    pub fn bind(
        &mut self,
        variable: Variable,
        ty: Type,
        context: &Context,
    ) -> Result<(), BindError> {
        let replacement = self.walk(ty);

        let key = match self.walk(Type::Variable(variable)) {
            Type::Variable(key) => key,

            bound if bound == replacement => return Ok(()),

            bound => {
                log::debug!(
                    "rejected binding {variable:?} to {ty:?}: already bound \
                     to {bound:?}"
                );

                return Err(BindError::InconsistentSubstitution {
                    variable,
                    bound,
                    requested: ty,
                });
            }
        };

        // already bound through a chain ending at the replacement
        if replacement == Type::Variable(key) && key != variable {
            return Ok(());
        }

        let occurs = match self.occurs_check {
            OccursCheck::Eager => {
                self.occurs(key, replacement, context, &mut HashSet::new())
            }
            OccursCheck::Shallow => replacement == Type::Variable(key),
        };

        if occurs {
            log::debug!("rejected binding {key:?} to {ty:?}: occurs check");

            return Err(BindError::OccursCheckFailure {
                variable: key,
                replacement: ty,
            });
        }

        log::trace!("binding {key:?} to {ty:?}");
        Arc::make_mut(&mut self.mappings).insert(key, ty);

        Ok(())
    }

    fn occurs(
        &self,
        variable: Variable,
        ty: Type,
        context: &Context,
        visited: &mut HashSet<Type>,
    ) -> bool {
        let ty = self.walk(ty);

        // shared subterms are looked into once
        if !matches!(ty, Type::Variable(_)) && !visited.insert(ty) {
            return false;
        }

        match ty {
            Type::Variable(found) => found == variable,

            Type::Function(id) => context.get_function(id).is_some_and(|x| {
                self.occurs(variable, x.domain, context, visited)
                    || self.occurs(variable, x.codomain, context, visited)
            }),

            Type::Union(id) => context.get_union(id).is_some_and(|x| {
                x.cases
                    .iter()
                    .any(|case| self.occurs(variable, *case, context, visited))
            }),

            Type::Metatype(id) => context
                .get_metatype(id)
                .is_some_and(|x| self.occurs(variable, x.of, context, visited)),

            Type::Tuple(_) | Type::Primitive(_) | Type::Named(_) => false,
        }
    }

    /// Determines whether this table agrees with `other` on every variable
    /// that both of them bind.
    ///
    /// Variables bound by only one of the tables are intermediate results of
    /// the solver and are ignored.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.mappings, &other.mappings) {
            return true;
        }

        let (smaller, larger) = if self.len() <= other.len() {
            (&self.mappings, &other.mappings)
        } else {
            (&other.mappings, &self.mappings)
        };

        smaller.iter().all(|(variable, ty)| {
            larger.get(variable).is_none_or(|other| other == ty)
        })
    }
}

impl PartialEq for SubstitutionTable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.mappings, &other.mappings)
            || self.mappings == other.mappings
    }
}

impl Eq for SubstitutionTable {}

impl Hash for SubstitutionTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // order independent
        let combined = self.mappings.keys().fold(0u64, |combined, variable| {
            let mut hasher = DefaultHasher::new();
            variable.hash(&mut hasher);

            combined.wrapping_add(hasher.finish())
        });

        state.write_usize(self.mappings.len());
        state.write_u64(combined);
    }
}

impl From<HashMap<Variable, Type>> for SubstitutionTable {
    fn from(mappings: HashMap<Variable, Type>) -> Self {
        Self { mappings: Arc::new(mappings), occurs_check: OccursCheck::Eager }
    }
}

impl<const N: usize> From<[(Variable, Type); N]> for SubstitutionTable {
    /// Creates a table from a literal list of bindings.
    ///
    /// # Panics
    ///
    /// Panics if a variable appears more than once.
    fn from(bindings: [(Variable, Type); N]) -> Self {
        let mut mappings = HashMap::with_capacity(N);

        for (variable, ty) in bindings {
            assert!(
                mappings.insert(variable, ty).is_none(),
                "the variable {variable:?} is bound more than once"
            );
        }

        Self::from(mappings)
    }
}

impl FromIterator<(Variable, Type)> for SubstitutionTable {
    fn from_iter<I: IntoIterator<Item = (Variable, Type)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<_, _>>())
    }
}

impl<'a> IntoIterator for &'a SubstitutionTable {
    type IntoIter = hash_map::Iter<'a, Variable, Type>;
    type Item = (&'a Variable, &'a Type);

    fn into_iter(self) -> Self::IntoIter { self.mappings.iter() }
}

impl Display for SubstitutionTable {
    fn fmt(
        &self,
        context: &Context,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let mut bindings = self.mappings.iter().collect::<Vec<_>>();
        bindings.sort_by_key(|(variable, _)| **variable);

        for (variable, ty) in bindings {
            writeln!(
                f,
                "{} => {}",
                DisplayObject { context, display: variable },
                DisplayObject { context, display: ty }
            )?;
        }

        Ok(())
    }
}
