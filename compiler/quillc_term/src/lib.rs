//! Contains the type terms consumed by the type inference engine and the
//! [`Context`] that constructs them.

use std::collections::BTreeSet;

use quillc_arena::{Arena, Map, ID};

use crate::r#type::{
    Function, Metatype, Named, Tuple, TupleElement, Type, Union,
};

pub mod r#type;
pub mod variable;

/// Owns every composite type of an inference problem.
///
/// Function, union and metatype types are interned: constructing a type
/// structurally equal to an existing one returns the existing handle. Tuples
/// are allocated fresh each time and can be rewritten in place through
/// [`Context::get_tuple_mut`].
#[derive(Debug, Clone, Default)]
pub struct Context {
    functions: Map<Function>,
    unions: Map<Union>,
    metatypes: Map<Metatype>,
    tuples: Arena<Tuple>,
    named: Arena<Named>,
}

impl Context {
    /// Creates a new empty [`Context`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Gets the function type from `domain` to `codomain`.
    pub fn function(&mut self, domain: Type, codomain: Type) -> Type {
        Type::Function(self.functions.intern(Function::new(domain, codomain)))
    }

    /// Gets the union type of the given cases.
    pub fn union(&mut self, cases: BTreeSet<Type>) -> Type {
        Type::Union(self.unions.intern(Union::new(cases)))
    }

    /// Gets the metatype of the given type.
    pub fn metatype(&mut self, of: Type) -> Type {
        Type::Metatype(self.metatypes.intern(Metatype::new(of)))
    }

    /// Allocates a new tuple type.
    ///
    /// The tuple is distinct from every other tuple even if they share the
    /// same elements.
    pub fn tuple(
        &mut self,
        name: Option<String>,
        elements: Vec<TupleElement>,
    ) -> Type {
        Type::Tuple(self.tuples.insert(Tuple::new(name, elements)))
    }

    /// Allocates a new opaque nominal type.
    pub fn named(&mut self, name: impl Into<String>) -> Type {
        Type::Named(self.named.insert(Named::new(name.into())))
    }

    /// Returns the function type with the given ID.
    #[must_use]
    pub fn get_function(&self, id: ID<Function>) -> Option<&Function> {
        self.functions.get(id)
    }

    /// Returns the union type with the given ID.
    #[must_use]
    pub fn get_union(&self, id: ID<Union>) -> Option<&Union> {
        self.unions.get(id)
    }

    /// Returns the metatype with the given ID.
    #[must_use]
    pub fn get_metatype(&self, id: ID<Metatype>) -> Option<&Metatype> {
        self.metatypes.get(id)
    }

    /// Returns the tuple type with the given ID.
    #[must_use]
    pub fn get_tuple(&self, id: ID<Tuple>) -> Option<&Tuple> {
        self.tuples.get(id)
    }

    /// Returns a mutable reference to the tuple type with the given ID.
    ///
    /// Every holder of the tuple's handle observes the modification.
    #[must_use]
    pub fn get_tuple_mut(&mut self, id: ID<Tuple>) -> Option<&mut Tuple> {
        self.tuples.get_mut(id)
    }

    /// Returns the opaque nominal type with the given ID.
    #[must_use]
    pub fn get_named(&self, id: ID<Named>) -> Option<&Named> {
        self.named.get(id)
    }
}

/// Contains the display object that requires the context.
///
/// Primarily used for implementing [`std::fmt::Display`] trait.
#[derive(Debug, Clone, Copy)]
pub struct DisplayObject<'a, D: ?Sized> {
    /// The context in which the display object will refer to.
    pub context: &'a Context,

    /// The display object that requires the context.
    pub display: &'a D,
}

impl<D: Display + ?Sized> std::fmt::Display for DisplayObject<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.display.fmt(self.context, f)
    }
}

/// Similar to [`std::fmt::Display`] but with the context that owns the types.
pub trait Display {
    #[allow(missing_docs, clippy::missing_errors_doc)]
    fn fmt(
        &self,
        context: &Context,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result;
}

#[cfg(test)]
mod test;
