#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::composite::TraitKind;
use crate::value::Kind;

fn int_of(domain: &Rc<TypeDomain>, symbol: Option<Symbol>) -> i64 {
    let value = symbol.unwrap().get(domain);
    domain.as_int(&value, "test").unwrap()
}

#[test]
fn local_shadows_parent() {
    let domain = TypeDomain::new();
    let top = SymbolMap::top();
    top.put_value("x", domain.int(1)).unwrap();
    top.put_value("y", domain.int(2)).unwrap();

    let local = SymbolMap::local(&top);
    local.put_value("x", domain.int(10)).unwrap();

    assert_eq!(int_of(&domain, local.get("x")), 10);
    assert_eq!(int_of(&domain, local.get("y")), 2);
    assert_eq!(int_of(&domain, top.get("x")), 1);
    assert!(local.get("z").is_none());
}

#[test]
fn nested_writes_go_to_parent() {
    let domain = TypeDomain::new();
    let top = SymbolMap::top();
    let nested = SymbolMap::nested(&top, [(Rc::from("member"), Symbol::Value(domain.int(5)))]);

    assert_eq!(int_of(&domain, nested.get("member")), 5);
    assert!(top.get("member").is_none());

    nested.put_value("out", domain.int(9)).unwrap();
    assert_eq!(int_of(&domain, top.get("out")), 9);
    assert!(nested.own_names().iter().all(|name| &**name != "out"));
}

#[test]
fn protection_is_read_only() {
    let domain = TypeDomain::new();
    let top = SymbolMap::top();
    top.put_value("x", domain.int(1)).unwrap();

    let protected = SymbolMap::protection(&top);
    assert_eq!(int_of(&domain, protected.get("x")), 1);
    assert_eq!(
        protected.put_value("x", domain.int(2)).unwrap_err(),
        EvalError::ProtectedScopeWrite("x".to_string())
    );
    assert_eq!(int_of(&domain, top.get("x")), 1);
}

#[test]
fn placeholders_for_unbound_names() {
    let domain = TypeDomain::new();
    let env = SymbolMap::top();
    env.put_value("ZERO", domain.int(0)).unwrap();
    let scope = SymbolMap::placeholders(&env);

    assert_eq!(int_of(&domain, scope.get("ZERO")), 0);

    let value = scope.get("n").unwrap().get(&domain);
    assert_eq!(value.kind(), Kind::COMPOSITE);
    let composite = value.as_composite().unwrap();
    assert_eq!(composite.name(), "patternBind");
    assert!(composite.has(TraitKind::VarPlaceholder));

    assert!(scope.put_value("n", domain.int(1)).is_err());
}

#[test]
fn placeholder_call_builds_constructor_placeholder() {
    let domain = TypeDomain::new();
    let mut frame = Frame::new(Rc::clone(&domain), SymbolMap::placeholders(&SymbolMap::top()));
    frame.stack_mut().push(domain.int(1));
    frame.stack_mut().push(domain.int(2));

    let symbol = frame.symbols().get("Point").unwrap();
    symbol.call(&mut frame, Some(2), Some(1)).unwrap();

    let values = frame.into_values();
    assert_eq!(values.len(), 1);
    let composite = values[0].as_composite().unwrap();
    assert_eq!(composite.name(), "patternCtor");
    let Some(Capability::CtorPlaceholder { name, args }) =
        composite.get_optional(TraitKind::CtorPlaceholder)
    else {
        panic!("expected constructor placeholder");
    };
    assert_eq!(&**name, "Point");
    assert_eq!(args.len(), 2);
}

#[test]
fn placeholder_call_requires_count() {
    let domain = TypeDomain::new();
    let mut frame = Frame::new(Rc::clone(&domain), SymbolMap::placeholders(&SymbolMap::top()));
    let symbol = frame.symbols().get("f").unwrap();
    assert_eq!(
        symbol.call(&mut frame, None, Some(1)).unwrap_err(),
        EvalError::MissingArgumentCount("f".to_string())
    );
    assert!(matches!(
        symbol.call(&mut frame, Some(0), Some(2)).unwrap_err(),
        EvalError::ReturnCount { .. }
    ));
}

#[test]
fn own_names_sorted() {
    let domain = TypeDomain::new();
    let top = SymbolMap::top();
    top.put_value("b", domain.null()).unwrap();
    top.put_value("a", domain.null()).unwrap();
    let names: Vec<String> = top.own_names().iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(top.kind(), ScopeKind::Top);
    assert!(SymbolMap::local(&top).parent().unwrap().ptr_eq(&top));
}
