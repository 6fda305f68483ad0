//! Grammar rules.
//!
//! - `mod.rs`: statements and sequences
//! - `expr.rs`: binary operator precedence chain
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: literals, identifiers, calls, brackets, blocks, postfix

mod expr;
mod operators;
mod primary;

use calc_ir::{ExprKind, ExprNode, Span, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse `;`-separated statements up to end of input or `}`.
    ///
    /// A single statement is returned as-is; anything else becomes a
    /// `Sequence`. Empty statements are skipped.
    pub(crate) fn parse_statements(&mut self) -> Result<ExprNode, ParseError> {
        let start = self.current_span();
        let mut statements = Vec::new();

        loop {
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.check(&TokenKind::Eof) || self.check(&TokenKind::RBrace) {
                break;
            }

            statements.push(self.parse_statement()?);

            if !self.check(&TokenKind::Semicolon) {
                break;
            }
        }

        if statements.len() == 1 {
            if let Some(single) = statements.pop() {
                return Ok(single);
            }
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::point(start.start),
        };
        Ok(ExprNode::new(ExprKind::Sequence(statements), span))
    }

    /// `name = expr` or an expression.
    fn parse_statement(&mut self) -> Result<ExprNode, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            if matches!(self.cursor.peek_next_kind(), TokenKind::Assign) {
                let start = self.advance();
                self.advance();
                let value = self.parse_expr()?;
                let span = start.merge(value.span);
                return Ok(ExprNode::new(
                    ExprKind::Assign {
                        name: name.clone(),
                        value: Box::new(value),
                    },
                    span,
                ));
            }
        }

        let expr = self.parse_expr()?;
        if self.check(&TokenKind::Assign) {
            return Err(ParseError::InvalidAssignTarget { span: expr.span });
        }
        Ok(expr)
    }
}
