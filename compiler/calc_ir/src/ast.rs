//! Expression tree for the calc language.
//!
//! The parser builds `ExprNode`s; the compiler in `calc_eval` flattens them
//! into instruction sequences. The tree keeps sugared forms (method calls,
//! member access, inline blocks, `match`) as distinct shapes because the
//! compiler picks instruction layouts by node shape, not by runtime value.

use std::fmt;

use crate::Span;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Structural
    /// `a : b` builds a cons cell.
    Cons,
    /// `a.b` member access and method-call sugar.
    Dot,

    // Compile-time only
    /// `params -> body` (lambda, or pattern/guard separator inside `match`).
    Lambda,
    /// `pattern \ clause` (guarded clause separator inside `match`).
    Split,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Cons => ":",
            BinaryOp::Dot => ".",
            BinaryOp::Lambda => "->",
            BinaryOp::Split => "\\",
        }
    }

    /// Whether the operator only has meaning to the compiler.
    pub fn is_compile_time(self) -> bool {
        matches!(self, BinaryOp::Lambda | BinaryOp::Split)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Literal in syntactic form.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// An expression node with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub span: Span,
}

/// Shapes of expression nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Constant value.
    Literal(Literal),
    /// Bare identifier: `x`.
    SymbolGet(String),
    /// Call of a named symbol: `f(a, b)`.
    SymbolCall { name: String, args: Vec<ExprNode> },
    /// Call of an arbitrary expression: `f(a)(b)`, `(g)(x)`.
    Call {
        target: Box<ExprNode>,
        args: Vec<ExprNode>,
    },
    /// Binary operator, including `.`, `:`, `->` and `\`.
    Binary {
        op: BinaryOp,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
    /// Prefix operator.
    Unary { op: UnaryOp, operand: Box<ExprNode> },
    /// Parenthesized list `(a, b, ...)`; also plain grouping.
    Bracket(Vec<ExprNode>),
    /// Inline block `{ ... }`, evaluated to a code value.
    RawCode(Box<ExprNode>),
    /// `match(clause, ...)`; clauses are validated by the compiler.
    Match(Vec<ExprNode>),
    /// `name = value` statement.
    Assign { name: String, value: Box<ExprNode> },
    /// Statements separated by `;`.
    Sequence(Vec<ExprNode>),
}

impl ExprNode {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        ExprNode { kind, span }
    }

    /// Direct children in evaluation order.
    ///
    /// Used for structural inspection (e.g. extracting `match` clauses)
    /// without flattening.
    pub fn children(&self) -> Vec<&ExprNode> {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::SymbolGet(_) => Vec::new(),
            ExprKind::SymbolCall { args, .. } => args.iter().collect(),
            ExprKind::Call { target, args } => {
                let mut children = Vec::with_capacity(args.len() + 1);
                children.push(target.as_ref());
                children.extend(args.iter());
                children
            }
            ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExprKind::Unary { operand, .. } => vec![operand.as_ref()],
            ExprKind::RawCode(body) => vec![body.as_ref()],
            ExprKind::Assign { value, .. } => vec![value.as_ref()],
            ExprKind::Bracket(items) | ExprKind::Match(items) | ExprKind::Sequence(items) => {
                items.iter().collect()
            }
        }
    }

    /// Symbol name if this is a bare identifier.
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::SymbolGet(name) => Some(name),
            _ => None,
        }
    }

    /// Operator and operands if this is a binary node.
    pub fn as_binary(&self) -> Option<(BinaryOp, &ExprNode, &ExprNode)> {
        match &self.kind {
            ExprKind::Binary { op, left, right } => Some((*op, left, right)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
