use super::*;
use pretty_assertions::assert_eq;

fn sym(name: &str) -> ExprNode {
    ExprNode::new(ExprKind::SymbolGet(name.to_string()), Span::DUMMY)
}

fn int(n: i64) -> ExprNode {
    ExprNode::new(ExprKind::Literal(Literal::Int(n)), Span::DUMMY)
}

#[test]
fn test_children_of_call_start_with_target() {
    let node = ExprNode::new(
        ExprKind::Call {
            target: Box::new(sym("f")),
            args: vec![int(1), int(2)],
        },
        Span::DUMMY,
    );
    let children = node.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].as_symbol(), Some("f"));
}

#[test]
fn test_children_of_leaves_are_empty() {
    assert!(sym("x").children().is_empty());
    assert!(int(3).children().is_empty());
}

#[test]
fn test_as_binary() {
    let node = ExprNode::new(
        ExprKind::Binary {
            op: BinaryOp::Lambda,
            left: Box::new(ExprNode::new(ExprKind::Bracket(vec![sym("x")]), Span::DUMMY)),
            right: Box::new(sym("x")),
        },
        Span::DUMMY,
    );
    let (op, left, right) = node.as_binary().unwrap_or_else(|| panic!("expected binary"));
    assert_eq!(op, BinaryOp::Lambda);
    assert_eq!(left.children().len(), 1);
    assert_eq!(right.as_symbol(), Some("x"));
}

#[test]
fn test_operator_symbols() {
    assert_eq!(BinaryOp::Split.as_symbol(), "\\");
    assert_eq!(BinaryOp::Cons.to_string(), ":");
    assert!(BinaryOp::Lambda.is_compile_time());
    assert!(!BinaryOp::Dot.is_compile_time());
    assert_eq!(UnaryOp::Not.to_string(), "!");
}
