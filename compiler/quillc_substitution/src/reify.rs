//! Contains the logic for reifying types through a [`SubstitutionTable`].
//!
//! Reification is a graph rewrite rather than a pure function: the elements
//! of every tuple met along the way are replaced in the [`Context`], so every
//! holder of the tuple's handle observes the reified elements afterwards.

use std::{collections::HashSet, sync::Arc};

use quillc_arena::ID;
use quillc_term::{
    r#type::{Tuple, TupleElement, Type},
    Context,
};

use crate::SubstitutionTable;

impl SubstitutionTable {
    /// Replaces every variable in `ty` by its substitution, recursively.
    ///
    /// Function, union and metatype types are rebuilt through the context.
    /// Tuples are rewritten in place and their handle is returned; a tuple
    /// that is reached again while its elements are being reified is returned
    /// as is, which makes reification terminate on recursive types.
    pub fn reify(&self, ty: Type, context: &mut Context) -> Type {
        self.reify_with(ty, context, &mut HashSet::new())
    }

    /// Creates a new table with the same variables, each bound to its
    /// reified substitution.
    #[must_use]
    pub fn reified(&self, context: &mut Context) -> Self {
        let mut visited = HashSet::new();

        let mappings = self
            .mappings
            .iter()
            .map(|(variable, ty)| {
                (*variable, self.reify_with(*ty, context, &mut visited))
            })
            .collect();

        log::trace!(
            "reified {} bindings through {} tuples",
            self.len(),
            visited.len()
        );

        Self { mappings: Arc::new(mappings), occurs_check: self.occurs_check }
    }

    fn reify_with(
        &self,
        ty: Type,
        context: &mut Context,
        visited: &mut HashSet<ID<Tuple>>,
    ) -> Type {
        let walked = self.walk(ty);

        match walked {
            Type::Variable(_) | Type::Primitive(_) | Type::Named(_) => walked,

            Type::Metatype(id) => {
                let Some(of) = context.get_metatype(id).map(|x| x.of) else {
                    return walked;
                };

                let of = self.reify_with(of, context, visited);
                context.metatype(of)
            }

            Type::Function(id) => {
                let Some(function) = context.get_function(id).copied() else {
                    return walked;
                };

                let domain = self.reify_with(function.domain, context, visited);
                let codomain =
                    self.reify_with(function.codomain, context, visited);

                context.function(domain, codomain)
            }

            Type::Union(id) => {
                let Some(cases) = context.get_union(id).map(|x| x.cases.clone())
                else {
                    return walked;
                };

                let cases = cases
                    .into_iter()
                    .map(|case| self.reify_with(case, context, visited))
                    .collect();

                context.union(cases)
            }

            Type::Tuple(id) => {
                if !visited.insert(id) {
                    return walked;
                }

                let Some(elements) =
                    context.get_tuple(id).map(|x| x.elements().clone())
                else {
                    return walked;
                };

                let elements = elements
                    .into_iter()
                    .map(|element| {
                        TupleElement::new(
                            element.label,
                            self.reify_with(element.r#type, context, visited),
                        )
                    })
                    .collect();

                if let Some(tuple) = context.get_tuple_mut(id) {
                    tuple.replace_elements(elements);
                }

                walked
            }
        }
    }
}
