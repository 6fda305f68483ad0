//! Calc IR - syntax-level data structures for the calc language.
//!
//! This crate contains:
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - The expression tree (`ExprNode`) produced by the parser and consumed
//!   by the compiler in `calc_eval`
//!
//! Nothing here knows about runtime values. Literals are kept in their
//! syntactic form and only turned into typed values when the compiler
//! flattens a tree.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, ExprKind, ExprNode, Literal, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
