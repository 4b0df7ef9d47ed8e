//! Contains the definition of the [`Type`] term.

use std::{collections::BTreeSet, fmt};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use getset::Getters;
use quillc_arena::ID;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::{variable::Variable, Context, Display};

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

/// Contains all primitive types in the language.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumAsInner,
    Serialize,
    Deserialize,
    derive_more::Display,
    EnumIter,
)]
#[allow(missing_docs)]
pub enum Primitive {
    #[display(fmt = "Int")]
    Int,
    #[display(fmt = "Float")]
    Float,
    #[display(fmt = "Bool")]
    Bool,
    #[display(fmt = "String")]
    String,
    #[display(fmt = "Nothing")]
    Nothing,
}

/// Represents a function type, denoted by `DOMAIN -> CODOMAIN` syntax.
///
/// Function types are interned by the [`Context`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    new,
)]
pub struct Function {
    /// The type of the argument of the function.
    pub domain: Type,

    /// The type of the value returned by the function.
    pub codomain: Type,
}

/// An element of a [`Tuple`], optionally labeled.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    new,
)]
pub struct TupleElement {
    /// The label of the element, if any.
    pub label: Option<String>,

    /// The type of the element.
    pub r#type: Type,
}

/// Represents a tuple type, denoted by `(label: TYPE, TYPE, ...)` syntax.
///
/// Unlike the other structural types, tuples are **not** interned: each tuple
/// is a node in the [`Context`] that can be rewritten in place. Nominal types
/// are modeled as named tuples, which is how recursive types come to exist.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new,
)]
pub struct Tuple {
    /// The nominal name of the tuple, if it models a nominal type.
    #[get = "pub"]
    name: Option<String>,

    /// The ordered list of elements.
    #[get = "pub"]
    elements: Vec<TupleElement>,
}

impl Tuple {
    /// Replaces the elements of the tuple, returning the previous ones.
    pub fn replace_elements(
        &mut self,
        elements: Vec<TupleElement>,
    ) -> Vec<TupleElement> {
        std::mem::replace(&mut self.elements, elements)
    }
}

/// Represents a union type, denoted by `CASE | CASE | ...` syntax.
///
/// The cases form a set: their order carries no meaning and duplicates are
/// not representable.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    new,
)]
pub struct Union {
    /// The alternatives of the union.
    pub cases: BTreeSet<Type>,
}

/// Represents the type of a type, denoted by `TYPE.Type` syntax.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    new,
)]
pub struct Metatype {
    /// The type described by the metatype.
    pub of: Type,
}

/// An opaque nominal type that substitution never looks into.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Getters,
    new,
)]
pub struct Named {
    /// The name of the type.
    #[get = "pub"]
    name: String,
}

/// Represents a type term.
///
/// A [`Type`] is a cheap handle. Variables and tuples compare by identity;
/// functions, unions and metatypes are interned by the [`Context`] so that
/// comparing their handles compares their structure.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumAsInner,
    Serialize,
    Deserialize,
    derive_more::From,
)]
#[allow(missing_docs)]
pub enum Type {
    Variable(Variable),
    Function(ID<Function>),
    Tuple(ID<Tuple>),
    Union(ID<Union>),
    Metatype(ID<Metatype>),
    Primitive(Primitive),
    Named(ID<Named>),
}

impl Display for Type {
    fn fmt(
        &self,
        context: &Context,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fmt_type(*self, context, &mut Vec::new(), f)
    }
}

fn fmt_type(
    ty: Type,
    context: &Context,
    tuples: &mut Vec<ID<Tuple>>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match ty {
        Type::Variable(variable) => variable.fmt(context, f),
        Type::Primitive(primitive) => write!(f, "{primitive}"),

        Type::Named(id) => match context.get_named(id) {
            Some(named) => write!(f, "{}", named.name),
            None => write!(f, "<unknown>"),
        },

        Type::Function(id) => {
            let Some(function) = context.get_function(id) else {
                return write!(f, "<unknown>");
            };

            write!(f, "(")?;
            fmt_type(function.domain, context, tuples, f)?;
            write!(f, ") -> ")?;
            fmt_type(function.codomain, context, tuples, f)
        }

        Type::Metatype(id) => {
            let Some(metatype) = context.get_metatype(id) else {
                return write!(f, "<unknown>");
            };

            fmt_type(metatype.of, context, tuples, f)?;
            write!(f, ".Type")
        }

        Type::Union(id) => {
            let Some(union) = context.get_union(id) else {
                return write!(f, "<unknown>");
            };

            for (i, case) in union.cases.iter().enumerate() {
                if i != 0 {
                    write!(f, " | ")?;
                }

                fmt_type(*case, context, tuples, f)?;
            }

            Ok(())
        }

        Type::Tuple(id) => {
            let Some(tuple) = context.get_tuple(id) else {
                return write!(f, "<unknown>");
            };

            if let Some(name) = &tuple.name {
                return write!(f, "{name}");
            }

            // recursive anonymous tuple
            if tuples.contains(&id) {
                return write!(f, "...");
            }

            tuples.push(id);
            write!(f, "(")?;

            for (i, element) in tuple.elements.iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }

                if let Some(label) = &element.label {
                    write!(f, "{label}: ")?;
                }

                fmt_type(element.r#type, context, tuples, f)?;
            }

            tuples.pop();
            write!(f, ")")
        }
    }
}
