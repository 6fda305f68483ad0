//! Property-based tests for the calc pipeline.
//!
//! The front end must never panic, and integer arithmetic must agree with
//! Rust's checked operations (overflow and division by zero surface as
//! errors).

use calc_eval::{silent_handler, EvalError, Interpreter};
use calcc::{run_source, CalcError};
use proptest::prelude::*;

fn quiet() -> Interpreter {
    match Interpreter::builder().print_handler(silent_handler()).build() {
        Ok(interpreter) => interpreter,
        Err(error) => panic!("interpreter setup failed: {error}"),
    }
}

fn arb_int() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(0i64),
        Just(1i64),
        Just(-1i64),
        Just(i64::MAX),
        Just(i64::MIN),
        -1000i64..1000i64,
        any::<i64>(),
    ]
}

fn arb_op() -> impl Strategy<Value = (&'static str, fn(i64, i64) -> Option<i64>)> {
    prop_oneof![
        Just(("+", i64::checked_add as fn(i64, i64) -> Option<i64>)),
        Just(("-", i64::checked_sub as fn(i64, i64) -> Option<i64>)),
        Just(("*", i64::checked_mul as fn(i64, i64) -> Option<i64>)),
        Just(("/", i64::checked_div as fn(i64, i64) -> Option<i64>)),
        Just(("%", i64::checked_rem as fn(i64, i64) -> Option<i64>)),
    ]
}

fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,4}",
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
        Just("\"s\"".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(",".to_string()),
        Just(";".to_string()),
        Just("->".to_string()),
        Just("\\".to_string()),
        Just(":".to_string()),
        Just(".".to_string()),
        Just("=".to_string()),
        Just("+".to_string()),
        Just("*".to_string()),
        Just("match".to_string()),
    ]
}

/// Writes an integer so it lexes back to the same value; `i64::MIN` has no
/// positive literal.
fn literal(n: i64) -> String {
    if n == i64::MIN {
        format!("({} - 1)", i64::MIN + 1)
    } else if n < 0 {
        format!("({n})")
    } else {
        n.to_string()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parser_never_panics_on_arbitrary_text(source in "\\PC{0,64}") {
        let _ = calc_parse::parse(&source);
    }

    #[test]
    fn pipeline_never_panics_on_token_soup(tokens in prop::collection::vec(arb_token(), 0..24)) {
        let source = tokens.join(" ");
        let _ = run_source(&quiet(), &source);
    }

    #[test]
    fn integer_arithmetic_matches_checked_ops(a in arb_int(), b in arb_int(), (op, expected) in arb_op()) {
        let source = format!("{} {op} {}", literal(a), literal(b));
        let result = run_source(&quiet(), &source);
        match expected(a, b) {
            Some(n) => {
                let values = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(values.len(), 1);
                prop_assert_eq!(values[0].repr(), n.to_string());
            }
            None if b == 0 => {
                prop_assert_eq!(result.err(), Some(CalcError::Eval(EvalError::DivisionByZero)));
            }
            None => {
                prop_assert!(matches!(
                    result,
                    Err(CalcError::Eval(EvalError::IntegerOverflow(_)))
                ));
            }
        }
    }

    #[test]
    fn first_declared_alternative_wins(n in -50i64..50) {
        let source = format!(
            "f = match((x) \\ x > 0 -> \"a\" \\ x > -100 -> \"b\", (x) -> \"c\"); f({})",
            literal(n)
        );
        let values = run_source(&quiet(), &source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected = if n > 0 { "\"a\"" } else { "\"b\"" };
        prop_assert_eq!(values[0].repr(), expected);
    }

    #[test]
    fn list_length_by_pattern(items in prop::collection::vec(-100i64..100, 0..12)) {
        let args: Vec<String> = items.iter().map(|n| literal(*n)).collect();
        let source = format!(
            "len = match((null) -> 0, (h : t) -> 1 + len(t)); len(list({}))",
            args.join(", ")
        );
        let values = run_source(&quiet(), &source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(values[0].repr(), items.len().to_string());
    }
}
