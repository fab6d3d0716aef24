//! Lexer error types.

use ember_ir::Span;
use thiserror::Error;

/// A lexical error. The lexer records it and keeps scanning, emitting an
/// `Error` token in place of the offending input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence `{0}`")]
    InvalidEscape(String),
    #[error("invalid numeric literal")]
    InvalidNumber,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}
