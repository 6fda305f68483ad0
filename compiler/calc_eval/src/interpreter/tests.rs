#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalError;
use crate::print_handler::silent_handler;
use crate::value::Payload;

fn quiet() -> Interpreter {
    Interpreter::builder()
        .print_handler(silent_handler())
        .build()
        .unwrap()
}

fn run(interpreter: &Interpreter, source: &str) -> EvalResult<Vec<String>> {
    let ast = calc_parse::parse(source).unwrap();
    let code = interpreter.compile(&ast).unwrap();
    interpreter
        .execute(&code)
        .map(|values| values.iter().map(TypedValue::repr).collect())
}

#[test]
fn result_is_whole_stack() {
    let interpreter = quiet();
    assert_eq!(run(&interpreter, "1; 2 + 3; \"x\"").unwrap(), vec!["1", "5", "\"x\""]);
    assert_eq!(run(&interpreter, "").unwrap(), Vec::<String>::new());
    assert_eq!(run(&interpreter, "x = 1").unwrap(), Vec::<String>::new());
}

#[test]
fn globals_persist_between_runs() {
    let interpreter = quiet();
    run(&interpreter, "x = 20").unwrap();
    assert_eq!(run(&interpreter, "x + 1").unwrap(), vec!["21"]);
    run(&interpreter, "x = x * 2").unwrap();
    assert_eq!(run(&interpreter, "x").unwrap(), vec!["40"]);
}

#[test]
fn closures_capture_defining_scope() {
    let interpreter = quiet();
    assert_eq!(
        run(&interpreter, "make = (n) -> (x) -> x + n; add2 = make(2); add2(5); add2(10)").unwrap(),
        vec!["7", "12"]
    );
}

#[test]
fn undefined_symbol() {
    let interpreter = quiet();
    assert_eq!(
        run(&interpreter, "1; missing").unwrap_err(),
        EvalError::UndefinedSymbol("missing".to_string())
    );
    assert_eq!(
        run(&interpreter, "missing(1)").unwrap_err(),
        EvalError::UndefinedSymbol("missing".to_string())
    );
}

#[test]
fn arity_errors_surface() {
    let interpreter = quiet();
    assert!(matches!(
        run(&interpreter, "car(1, 2)").unwrap_err(),
        EvalError::ArgumentCount { expected: 1, actual: 2, .. }
    ));
    assert!(matches!(
        run(&interpreter, "f = (a) -> a; f(1, 2)").unwrap_err(),
        EvalError::ArgumentCount { expected: 1, actual: 2, .. }
    ));
}

#[test]
fn define_host_value() {
    let interpreter = quiet();
    let value = interpreter.domain().string("host");
    interpreter.define("greeting", value).unwrap();
    assert_eq!(run(&interpreter, "greeting + \"!\"").unwrap(), vec!["\"host!\""]);
}

#[test]
fn register_host_callable() {
    let interpreter = quiet();
    interpreter
        .register(Callable::fixed("twice", 1, 1, |frame| {
            let value = frame.stack_mut().pop()?;
            let n = frame.domain().as_int(&value, "twice")?;
            let doubled = frame.domain().int(n * 2);
            frame.stack_mut().push(doubled);
            Ok(())
        }))
        .unwrap();
    assert_eq!(run(&interpreter, "twice(4) + 1").unwrap(), vec!["9"]);
}

#[test]
fn prelude_can_be_disabled() {
    let interpreter = Interpreter::builder()
        .print_handler(silent_handler())
        .prelude(false)
        .build()
        .unwrap();
    assert_eq!(
        run(&interpreter, "list(1)").unwrap_err(),
        EvalError::UndefinedSymbol("list".to_string())
    );
    assert_eq!(
        interpreter
            .globals()
            .own_names()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec!["match", "pattern"]
    );
    assert_eq!(run(&interpreter, "f = match((n) -> n + 1); f(1)").unwrap(), vec!["2"]);
}

#[test]
fn prelude_installs_builtins() {
    let interpreter = quiet();
    let names: Vec<String> = interpreter
        .globals()
        .own_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    for name in ["apply", "with", "record", "print", "match", "pattern", "int"] {
        assert!(names.iter().any(|n| n == name), "missing builtin {name}");
    }
}

#[test]
fn shared_domain_with_host_kind() {
    let domain = TypeDomain::new();
    let handle = domain.register_kind("handle", None).unwrap();
    let interpreter = Interpreter::builder()
        .with_domain(Rc::clone(&domain))
        .print_handler(silent_handler())
        .build()
        .unwrap();

    interpreter
        .define("h", domain.opaque(handle, Rc::new(7_u8)).unwrap())
        .unwrap();
    assert_eq!(run(&interpreter, "type(h)").unwrap(), vec!["\"handle\""]);

    let ast = calc_parse::parse("h").unwrap();
    let values = interpreter.execute(&interpreter.compile(&ast).unwrap()).unwrap();
    assert!(matches!(values[0].payload(), Payload::Opaque(_)));
    assert_eq!(*domain.as_opaque::<u8>(&values[0], handle, "h").unwrap(), 7);
}

#[test]
fn pattern_env_is_separate_from_globals() {
    let builder = Interpreter::builder().print_handler(silent_handler());
    let one = builder.domain().int(1);
    let interpreter = builder.pattern_constant("ONE", one).build().unwrap();
    assert!(interpreter.pattern_env().get("ONE").is_some());
    assert!(interpreter.globals().get("ONE").is_none());
}

#[test]
fn compiled_code_is_reusable() {
    let interpreter = quiet();
    run(&interpreter, "counter = 0").unwrap();
    let ast = calc_parse::parse("counter = counter + 1; counter").unwrap();
    let code = interpreter.compile(&ast).unwrap();
    interpreter.execute(&code).unwrap();
    let values = interpreter.execute(&code).unwrap();
    assert_eq!(values[0].repr(), "2");
}
