//! Token cursor for navigating the token stream.

use ember_ir::{Name, Span, StringInterner, Token, TokenKind, TokenList};

/// Cursor over a token list.
///
/// Invariant: the list ends with `Eof` and the position never moves past
/// it, so `current()` is always valid.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position, for progress tracking during recovery.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Discriminant comparison; payloads of literal kinds are ignored.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Whether a line terminator precedes the current token.
    #[inline]
    pub fn newline_before(&self) -> bool {
        self.current().newline_before
    }

    /// Token `n` positions ahead (clamped to `Eof`).
    pub fn peek(&self, n: usize) -> &'a Token {
        let tokens = self.tokens;
        &tokens[(self.pos + n).min(tokens.len() - 1)]
    }

    pub fn peek_next_kind(&self) -> &'a TokenKind {
        &self.peek(1).kind
    }

    /// Move to the next token. Never moves past `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Name of the current identifier token, if it is one.
    pub fn current_ident(&self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(*name),
            _ => None,
        }
    }

    /// Name for the current token when used as a property name: an
    /// identifier or any keyword.
    pub fn current_property_name(&self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(*name),
            other => other.keyword_text().map(|text| self.interner.intern(text)),
        }
    }

    /// Whether the current token is `(` opening an arrow parameter list,
    /// i.e. the matching `)` is followed by `=>` on the same line.
    pub fn at_arrow_params(&self) -> bool {
        if !matches!(self.current_kind(), TokenKind::LParen) {
            return false;
        }
        let mut depth = 0usize;
        let mut offset = 0usize;
        loop {
            let token = self.peek(offset);
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let next = self.peek(offset + 1);
                        return matches!(next.kind, TokenKind::Arrow) && !next.newline_before;
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            offset += 1;
        }
    }
}
