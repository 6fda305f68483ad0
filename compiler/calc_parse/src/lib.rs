//! Parser for the calc language.
//!
//! Recursive descent over a `TokenList`, one method per precedence level.
//! The result is a single `ExprNode`: a program with several statements is
//! an `ExprKind::Sequence`.

mod cursor;
mod error;
mod grammar;
mod stack;

use calc_ir::{ExprNode, Span, TokenKind, TokenList};
use cursor::Cursor;

pub use error::ParseError;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse a whole program. Trailing tokens are an error.
    pub fn parse_program(&mut self) -> Result<ExprNode, ParseError> {
        let program = self.parse_statements()?;
        if !self.cursor.is_at_end() {
            return Err(self.unexpected("`;` or end of input"));
        }
        Ok(program)
    }

    // Token helpers

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    fn advance(&mut self) -> Span {
        self.cursor.advance().span
    }

    /// Consume `kind` or fail with a description of what was expected.
    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.cursor.current();
        if matches!(token.kind, TokenKind::Error) {
            ParseError::InvalidToken { span: token.span }
        } else {
            ParseError::UnexpectedToken {
                expected,
                found: token.kind.clone(),
                span: token.span,
            }
        }
    }
}

/// Lex and parse source text.
pub fn parse(source: &str) -> Result<ExprNode, ParseError> {
    let tokens = calc_lexer::lex(source);
    tracing::debug!(tokens = tokens.len(), "parsing program");
    Parser::new(&tokens).parse_program()
}

#[cfg(test)]
mod tests;
