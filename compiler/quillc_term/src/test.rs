use std::collections::BTreeSet;

use proptest::{prop_assert_eq, prop_assert_ne, proptest};

use crate::{
    r#type::{Primitive, TupleElement, Type},
    variable::Variable,
    Context, DisplayObject,
};

fn display(context: &Context, ty: &Type) -> String {
    DisplayObject { context, display: ty }.to_string()
}

#[test]
fn function_types_are_interned() {
    let mut context = Context::new();
    let int = Type::Primitive(Primitive::Int);
    let bool = Type::Primitive(Primitive::Bool);

    let first = context.function(int, bool);
    let second = context.function(int, bool);
    let flipped = context.function(bool, int);

    assert_eq!(first, second);
    assert_ne!(first, flipped);

    let function = context.get_function(*first.as_function().unwrap()).unwrap();
    assert_eq!(function.domain, int);
    assert_eq!(function.codomain, bool);
}

#[test]
fn union_types_are_interned_by_case_set() {
    let mut context = Context::new();
    let int = Type::Primitive(Primitive::Int);
    let string = Type::Primitive(Primitive::String);

    let first = context.union([int, string].into_iter().collect());
    let second = context.union([string, int, string].into_iter().collect());

    assert_eq!(first, second);
    assert_eq!(
        context.get_union(*first.as_union().unwrap()).unwrap().cases.len(),
        2
    );
}

#[test]
fn tuples_are_never_interned() {
    let mut context = Context::new();
    let element = TupleElement::new(None, Type::Primitive(Primitive::Int));

    let first = context.tuple(None, vec![element.clone()]);
    let second = context.tuple(None, vec![element]);

    assert_ne!(first, second);
}

#[test]
fn tuple_rewrite_is_visible_through_every_handle() {
    let mut context = Context::new();
    let tuple = context.tuple(None, Vec::new());
    let alias = tuple;

    let previous = context
        .get_tuple_mut(*tuple.as_tuple().unwrap())
        .unwrap()
        .replace_elements(vec![TupleElement::new(
            Some("x".to_owned()),
            Type::Primitive(Primitive::Float),
        )]);

    assert!(previous.is_empty());
    assert_eq!(
        context.get_tuple(*alias.as_tuple().unwrap()).unwrap().elements(),
        &[TupleElement::new(
            Some("x".to_owned()),
            Type::Primitive(Primitive::Float)
        )]
    );
}

#[test]
fn display_types() {
    let mut context = Context::new();
    let int = Type::Primitive(Primitive::Int);
    let bool = Type::Primitive(Primitive::Bool);
    let variable = Variable::new();

    let function = context.function(int, Type::Variable(variable));
    assert_eq!(
        display(&context, &function),
        format!("(Int) -> $T{}", variable.id())
    );

    let metatype = context.metatype(bool);
    assert_eq!(display(&context, &metatype), "Bool.Type");

    let union = context.union(BTreeSet::from([int, bool]));
    assert_eq!(display(&context, &union), "Int | Bool");

    let point = context.tuple(None, vec![
        TupleElement::new(Some("x".to_owned()), int),
        TupleElement::new(None, bool),
    ]);
    assert_eq!(display(&context, &point), "(x: Int, Bool)");

    let named = context.named("Foo");
    assert_eq!(display(&context, &named), "Foo");
}

#[test]
fn display_recursive_tuple_terminates() {
    let mut context = Context::new();
    let tuple = context.tuple(None, Vec::new());

    context
        .get_tuple_mut(*tuple.as_tuple().unwrap())
        .unwrap()
        .replace_elements(vec![TupleElement::new(
            Some("next".to_owned()),
            tuple,
        )]);

    assert_eq!(display(&context, &tuple), "(next: ...)");

    let list = context.tuple(Some("List".to_owned()), vec![
        TupleElement::new(Some("tail".to_owned()), tuple),
    ]);
    assert_eq!(display(&context, &list), "List");
}

proptest! {
    #[test]
    fn fresh_variables_are_distinct(first: Variable, second: Variable) {
        prop_assert_ne!(first, second);
    }

    #[test]
    fn metatype_interning(primitive: Primitive) {
        let mut context = Context::new();

        let first = context.metatype(Type::Primitive(primitive));
        let second = context.metatype(Type::Primitive(primitive));

        prop_assert_eq!(first, second);
    }
}
