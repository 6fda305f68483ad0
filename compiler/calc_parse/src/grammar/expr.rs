//! Binary operator precedence chain.
//!
//! Lowest to highest: `\`, `->`, `||`, `&&`, equality, comparison, `:`,
//! additive, multiplicative, unary, postfix.

use calc_ir::{BinaryOp, ExprKind, ExprNode, TokenKind};

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

fn binary(op: BinaryOp, left: ExprNode, right: ExprNode) -> ExprNode {
    let span = left.span.merge(right.span);
    ExprNode::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprNode, ParseError> {
        ensure_sufficient_stack(|| self.parse_split())
    }

    /// `a \ b` (right associative).
    fn parse_split(&mut self) -> Result<ExprNode, ParseError> {
        let left = self.parse_lambda()?;
        if self.check(&TokenKind::Backslash) {
            self.advance();
            let right = self.parse_split()?;
            return Ok(binary(BinaryOp::Split, left, right));
        }
        Ok(left)
    }

    /// `params -> body` (right associative).
    fn parse_lambda(&mut self) -> Result<ExprNode, ParseError> {
        let left = self.parse_binary_or()?;
        if self.check(&TokenKind::Arrow) {
            self.advance();
            let right = ensure_sufficient_stack(|| self.parse_lambda())?;
            return Ok(binary(BinaryOp::Lambda, left, right));
        }
        Ok(left)
    }

    fn parse_binary_or(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.check(&TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_binary_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_binary_and(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_equality()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_comparison()?;
        while let Some(op) = self.match_equality_op() {
            self.advance();
            let right = self.parse_comparison()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_cons()?;
        while let Some(op) = self.match_comparison_op() {
            self.advance();
            let right = self.parse_cons()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `h : t` (right associative).
    fn parse_cons(&mut self) -> Result<ExprNode, ParseError> {
        let left = self.parse_additive()?;
        if self.check(&TokenKind::Colon) {
            self.advance();
            let right = ensure_sufficient_stack(|| self.parse_cons())?;
            return Ok(binary(BinaryOp::Cons, left, right));
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprNode, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprNode, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let start = self.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(operand.span);
            return Ok(ExprNode::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_postfix()
    }
}
