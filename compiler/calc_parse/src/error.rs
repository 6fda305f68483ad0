//! Parse error types.

use calc_ir::{Span, TokenKind};

/// A syntax error with its source location.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },

    #[error("invalid token at {span}")]
    InvalidToken { span: Span },

    #[error("assignment target must be an identifier at {span}")]
    InvalidAssignTarget { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidToken { span }
            | ParseError::InvalidAssignTarget { span } => *span,
        }
    }
}
