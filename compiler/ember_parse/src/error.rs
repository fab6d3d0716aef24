//! Parse error types.

use ember_ir::{Span, TokenKind};
use ember_lexer::{LexError, LexErrorKind};
use thiserror::Error;

/// A parse error with its source location.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("invalid left-hand side in for-{0} loop")]
    InvalidForTarget(&'static str),
    #[error("illegal newline after throw")]
    NewlineAfterThrow,
    #[error("missing catch or finally after try")]
    MissingCatchOrFinally,
    #[error("more than one default clause in switch statement")]
    DuplicateDefault,
    #[error("missing initializer in const declaration")]
    MissingConstInitializer,
    #[error("invalid parameter; expected an identifier")]
    InvalidParameter,
    /// Placeholder for input the lexer already rejected.
    #[error("invalid token")]
    InvalidToken,
    #[error("{0}")]
    Lex(LexErrorKind),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn unexpected(expected: &'static str, found: &TokenKind, span: Span) -> Self {
        let kind = if matches!(found, TokenKind::Error) {
            ParseErrorKind::InvalidToken
        } else {
            ParseErrorKind::UnexpectedToken {
                expected,
                found: found.display_name(),
            }
        };
        ParseError { kind, span }
    }

    /// Whether this error only restates a lexer error.
    pub fn is_lexer_echo(&self) -> bool {
        matches!(self.kind, ParseErrorKind::InvalidToken)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lex(err.kind),
            span: err.span,
        }
    }
}
