#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::any::Any;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::value::TypeDomain;

struct Fixed(Vec<(Rc<str>, i64)>, Rc<TypeDomain>);

impl Structured for Fixed {
    fn get(&self, key: &str) -> Option<TypedValue> {
        self.0
            .iter()
            .find(|(name, _)| &**name == key)
            .map(|(_, n)| self.1.int(*n))
    }

    fn keys(&self) -> Vec<Rc<str>> {
        self.0.iter().map(|(name, _)| Rc::clone(name)).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn lookup_by_trait_kind() {
    let domain = TypeDomain::new();
    let members = Fixed(vec![(Rc::from("a"), 1)], Rc::clone(&domain));
    let composite = Composite::builder("obj")
        .with(Capability::Structured(Rc::new(members)))
        .with(Capability::VarPlaceholder(Rc::from("x")))
        .build();

    assert!(composite.has(TraitKind::Structured));
    assert!(composite.has(TraitKind::VarPlaceholder));
    assert!(!composite.has(TraitKind::Callable));
    assert!(composite.get_optional(TraitKind::Decomposable).is_none());
    assert_eq!(
        composite.trait_kinds().collect::<Vec<_>>(),
        vec![TraitKind::Structured, TraitKind::VarPlaceholder]
    );

    let Capability::Structured(members) = composite.get(TraitKind::Structured).unwrap() else {
        panic!("expected structured trait");
    };
    assert_eq!(domain.as_int(&members.get("a").unwrap(), "a").unwrap(), 1);
}

#[test]
fn missing_trait_is_an_error() {
    let composite = Composite::single("thing", Capability::VarPlaceholder(Rc::from("x")));
    assert_eq!(
        composite.get(TraitKind::Callable).unwrap_err(),
        EvalError::MissingTrait {
            composite: "thing".to_string(),
            trait_name: "callable",
        }
    );
}

#[test]
fn later_trait_replaces_same_kind() {
    let composite = Composite::builder("obj")
        .with(Capability::VarPlaceholder(Rc::from("first")))
        .with(Capability::VarPlaceholder(Rc::from("second")))
        .build();

    assert_eq!(composite.trait_kinds().count(), 1);
    let Some(Capability::VarPlaceholder(name)) = composite.get_optional(TraitKind::VarPlaceholder)
    else {
        panic!("expected placeholder");
    };
    assert_eq!(&**name, "second");
}

#[test]
fn debug_lists_trait_kinds() {
    let composite = Composite::single("thing", Capability::VarPlaceholder(Rc::from("x")));
    assert_eq!(
        format!("{composite:?}"),
        "Composite { name: \"thing\", traits: [VarPlaceholder] }"
    );
}

#[test]
fn capability_debug_names_the_kind() {
    let placeholder = Capability::VarPlaceholder(Rc::from("x"));
    assert_eq!(format!("{placeholder:?}"), "VarPlaceholder(x)");

    let ctor = Capability::CtorPlaceholder {
        name: Rc::from("Pair"),
        args: Vec::new(),
    };
    assert_eq!(format!("{ctor:?}"), "CtorPlaceholder(Pair, 0 arg(s))");

    let composite = Composite::single("thing", placeholder);
    let found = composite.get(TraitKind::VarPlaceholder).unwrap();
    assert_eq!(format!("{:?}", found.kind()), "VarPlaceholder");
}
