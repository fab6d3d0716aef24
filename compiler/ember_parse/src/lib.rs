//! Recursive descent parser for Ember.
//!
//! Produces a flat syntax tree stored in an `ExprArena`. Statements follow
//! the usual curly-brace grammar with automatic semicolon insertion;
//! expressions use precedence climbing for binary operators.
//!
//! Parsing never stops at the first error: a broken statement is recorded,
//! skipped, and parsing resumes at the next statement boundary.

mod cursor;
mod error;
mod grammar;
mod recovery;
mod stack;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use ember_ir::{
    Expr, ExprArena, ExprId, ExprKind, Program, SharedArena, Span, Stmt, StmtId, StmtKind,
    StringInterner, TokenKind, TokenList,
};
use tracing::debug;

/// Result of parsing a source file.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    /// Lexer and parser errors, in source order.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and parse `source`.
pub fn parse(source: &str, interner: &StringInterner) -> ParseOutput {
    let lexed = ember_lexer::lex_with_errors(source, interner);
    let parser = Parser::new(&lexed.tokens, interner);
    let (program, parse_errors) = parser.parse_program();

    let mut errors: Vec<ParseError> = lexed.errors.into_iter().map(ParseError::from).collect();
    errors.extend(parse_errors.into_iter().filter(|err| !err.is_lexer_echo()));
    errors.sort_by_key(|err| err.span.start);

    debug!(
        statements = program.body.len(),
        errors = errors.len(),
        "parsed program"
    );
    ParseOutput { program, errors }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            arena: ExprArena::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream as a program.
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let start = self.cursor.current_span();
        let body = self.parse_statement_list(|kind| matches!(kind, TokenKind::Eof));
        let span = start.merge(self.cursor.current_span());
        let program = Program {
            body,
            arena: SharedArena::new(self.arena),
            span,
        };
        (program, self.errors)
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Span {
        self.cursor.advance().span
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    fn expect_ident(&mut self) -> Result<ember_ir::Name, ParseError> {
        match self.cursor.current_ident() {
            Some(name) => {
                self.advance();
                Ok(name)
            }
            None => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::unexpected(expected, self.current_kind(), self.current_span())
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    // Arena helpers

    fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr { kind, span })
    }

    fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.arena.alloc_stmt(Stmt { kind, span })
    }
}
