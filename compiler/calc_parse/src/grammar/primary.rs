//! Primary expressions and postfix suffixes.

use calc_ir::{BinaryOp, ExprKind, ExprNode, Literal, Span, TokenKind};

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

/// Identifier that introduces a match expression when followed by `(`.
const MATCH_KEYWORD: &str = "match";

impl Parser<'_> {
    /// Primary followed by any number of `(args)` and `.member` suffixes.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprNode, ParseError> {
        let mut expr = self.parse_call_chain()?;

        while self.check(&TokenKind::Dot) {
            self.advance();
            let member = self.parse_member()?;
            let span = expr.span.merge(member.span);
            expr = ExprNode::new(
                ExprKind::Binary {
                    op: BinaryOp::Dot,
                    left: Box::new(expr),
                    right: Box::new(member),
                },
                span,
            );
        }

        Ok(expr)
    }

    /// Right operand of `.`: a primary with call suffixes but no further dots.
    fn parse_member(&mut self) -> Result<ExprNode, ParseError> {
        self.parse_call_chain()
    }

    /// Primary followed by `(args)` suffixes.
    fn parse_call_chain(&mut self) -> Result<ExprNode, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.check(&TokenKind::LParen) {
            let (args, args_span) = self.parse_paren_list()?;
            let span = expr.span.merge(args_span);
            expr = ExprNode::new(
                ExprKind::Call {
                    target: Box::new(expr),
                    args,
                },
                span,
            );
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<ExprNode, ParseError> {
        let span = self.current_span();
        let literal = match self.current_kind() {
            TokenKind::Int(n) => Literal::Int(*n),
            TokenKind::Float(f) => Literal::Float(*f),
            TokenKind::Str(s) => Literal::Str(s.clone()),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Ident(name) => return self.parse_identifier(name),
            TokenKind::LParen => {
                let (items, span) = self.parse_paren_list()?;
                return Ok(ExprNode::new(ExprKind::Bracket(items), span));
            }
            TokenKind::LBrace => return self.parse_block(),
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(ExprNode::new(ExprKind::Literal(literal), span))
    }

    /// `name`, `name(args)` or `match(clauses)`.
    fn parse_identifier(&mut self, name: &str) -> Result<ExprNode, ParseError> {
        let start = self.advance();

        if !self.check(&TokenKind::LParen) {
            return Ok(ExprNode::new(ExprKind::SymbolGet(name.to_string()), start));
        }

        let (args, args_span) = self.parse_paren_list()?;
        let span = start.merge(args_span);
        let kind = if name == MATCH_KEYWORD {
            ExprKind::Match(args)
        } else {
            ExprKind::SymbolCall {
                name: name.to_string(),
                args,
            }
        };
        Ok(ExprNode::new(kind, span))
    }

    /// `( expr, ... )`, possibly empty. Returns the items and the full span.
    fn parse_paren_list(&mut self) -> Result<(Vec<ExprNode>, Span), ParseError> {
        let start = self.expect(&TokenKind::LParen, "`(`")?;
        let mut items = Vec::new();

        while !self.check(&TokenKind::RParen) {
            items.push(ensure_sufficient_stack(|| self.parse_expr())?);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        let end = self.expect(&TokenKind::RParen, "`,` or `)`")?;
        Ok((items, start.merge(end)))
    }

    /// `{ statements }` as a code literal.
    fn parse_block(&mut self) -> Result<ExprNode, ParseError> {
        let start = self.expect(&TokenKind::LBrace, "`{`")?;
        let body = ensure_sufficient_stack(|| self.parse_statements())?;
        let end = self.expect(&TokenKind::RBrace, "`;` or `}`")?;
        Ok(ExprNode::new(ExprKind::RawCode(Box::new(body)), start.merge(end)))
    }
}
