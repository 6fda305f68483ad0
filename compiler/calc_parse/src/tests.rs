#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use calc_ir::{BinaryOp, ExprKind, Literal, UnaryOp};
use pretty_assertions::assert_eq;

/// Render a tree as an s-expression so shapes can be compared compactly.
fn sexpr(node: &ExprNode) -> String {
    fn list(items: &[ExprNode]) -> String {
        items.iter().map(sexpr).collect::<Vec<_>>().join(" ")
    }

    match &node.kind {
        ExprKind::Literal(Literal::Int(n)) => n.to_string(),
        ExprKind::Literal(Literal::Float(f)) => f.to_string(),
        ExprKind::Literal(Literal::Str(s)) => format!("{s:?}"),
        ExprKind::Literal(Literal::Bool(b)) => b.to_string(),
        ExprKind::Literal(Literal::Null) => "null".to_string(),
        ExprKind::SymbolGet(name) => name.clone(),
        ExprKind::SymbolCall { name, args } => format!("(call {name} [{}])", list(args)),
        ExprKind::Call { target, args } => format!("(apply {} [{}])", sexpr(target), list(args)),
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", op.as_symbol(), sexpr(left), sexpr(right))
        }
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), sexpr(operand)),
        ExprKind::Bracket(items) => format!("[{}]", list(items)),
        ExprKind::RawCode(body) => format!("{{{}}}", sexpr(body)),
        ExprKind::Match(clauses) => format!("(match {})", list(clauses)),
        ExprKind::Assign { name, value } => format!("(= {name} {})", sexpr(value)),
        ExprKind::Sequence(items) => format!("(seq {})", list(items)),
    }
}

fn parse_sexpr(source: &str) -> String {
    sexpr(&parse(source).unwrap())
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(parse_sexpr("1 + 2 * 3 - 4"), "(- (+ 1 (* 2 3)) 4)");
    assert_eq!(parse_sexpr("(1 + 2) * 3"), "(* [(+ 1 2)] 3)");
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(
        parse_sexpr("a < 1 || b == c && !d"),
        "(|| (< a 1) (&& (== b c) (! d)))"
    );
}

#[test]
fn test_cons_is_right_associative_and_below_additive() {
    assert_eq!(parse_sexpr("1 + 1 : 2 : null"), "(: (+ 1 1) (: 2 null))");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let node = parse("-x * 2").unwrap();
    let (op, left, _) = node.as_binary().unwrap();
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
}

#[test]
fn test_dot_forms() {
    assert_eq!(parse_sexpr("obj.field"), "(. obj field)");
    assert_eq!(parse_sexpr("obj.method(1, 2)"), "(. obj (call method [1 2]))");
    assert_eq!(parse_sexpr("a.b.c"), "(. (. a b) c)");
    assert_eq!(parse_sexpr("obj.{ x + 1 }"), "(. obj {(+ x 1)})");
    assert_eq!(parse_sexpr("obj.m(1)(2)"), "(. obj (apply (call m [1]) [2]))");
}

#[test]
fn test_call_forms() {
    assert_eq!(parse_sexpr("f()"), "(call f [])");
    assert_eq!(parse_sexpr("f(1)(2)"), "(apply (call f [1]) [2])");
    assert_eq!(parse_sexpr("(g)(x)"), "(apply [g] [x])");
}

#[test]
fn test_lambda() {
    assert_eq!(parse_sexpr("(a, b) -> a + b"), "(-> [a b] (+ a b))");
    assert_eq!(parse_sexpr("x -> y -> x"), "(-> x (-> y x))");
}

#[test]
fn test_match_clauses() {
    assert_eq!(
        parse_sexpr("match((x, y) -> x + y, () -> 0)"),
        "(match (-> [x y] (+ x y)) (-> [] 0))"
    );
    assert_eq!(
        parse_sexpr(r"match((n) \ n > 0 -> 1 \ n < 0 -> -1 \ 0)"),
        r"(match (\ [n] (\ (-> (> n 0) 1) (\ (-> (< n 0) (- 1)) 0))))"
    );
}

#[test]
fn test_statements() {
    assert_eq!(parse_sexpr("x = 1; y = x + 1; y"), "(seq (= x 1) (= y (+ x 1)) y)");
    assert_eq!(parse_sexpr("x = 1;"), "(= x 1)");
    assert_eq!(parse_sexpr(""), "(seq )");
}

#[test]
fn test_block_body() {
    assert_eq!(parse_sexpr("{ a = 1; a }"), "{(seq (= a 1) a)}");
    assert_eq!(parse_sexpr("{}"), "{(seq )}");
}

#[test]
fn test_literals() {
    assert_eq!(parse_sexpr(r#"f(1.5, "s", true, null)"#), r#"(call f [1.5 "s" true null])"#);
}

#[test]
fn test_error_unclosed_paren() {
    let err = parse("f(1, 2").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            found: TokenKind::Eof,
            ..
        }
    ));
}

#[test]
fn test_error_invalid_token() {
    let err = parse("1 + #").unwrap_err();
    assert_eq!(err, ParseError::InvalidToken { span: Span::new(4, 5) });
}

#[test]
fn test_error_assign_to_expression() {
    let err = parse("a.b = 1").unwrap_err();
    assert!(matches!(err, ParseError::InvalidAssignTarget { .. }));
}

#[test]
fn test_error_trailing_tokens() {
    assert!(parse("1 2").is_err());
    assert!(parse("}").is_err());
}

#[test]
fn test_deeply_nested_brackets() {
    let depth = 2000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert!(parse(&source).is_ok());
}
