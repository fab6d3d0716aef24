//! Lexer for Ember using logos.
//!
//! Produces a [`TokenList`] whose tokens carry a `newline_before` flag so the
//! parser can apply automatic semicolon insertion. Whitespace and comments
//! are dropped; a comment spanning lines counts as a line terminator.

mod cook;
mod lex_error;
mod raw_token;


use logos::Logos;

use ember_ir::{Span, StringInterner, Token, TokenKind, TokenList};

pub use lex_error::{LexError, LexErrorKind};

use raw_token::RawToken;

/// Tokens plus any errors found while producing them.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex `source`, discarding errors (they surface as `Error` tokens).
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    Lexer::new(source, interner).lex_all().tokens
}

/// Lex `source`, keeping the error list.
pub fn lex_with_errors(source: &str, interner: &StringInterner) -> LexOutput {
    Lexer::new(source, interner).lex_all()
}

/// Lexer that produces interned tokens.
pub struct Lexer<'src, 'i> {
    source: &'src str,
    interner: &'i StringInterner,
}

impl<'src, 'i> Lexer<'src, 'i> {
    pub fn new(source: &'src str, interner: &'i StringInterner) -> Self {
        Lexer { source, interner }
    }

    /// Lex all tokens from the source. The list always ends with `Eof`.
    pub fn lex_all(&self) -> LexOutput {
        let mut output = LexOutput::default();
        let mut logos = RawToken::lexer(self.source);
        let mut newline_before = false;

        while let Some(result) = logos.next() {
            let span = Span::from_range(logos.span());
            let slice = logos.slice();

            let kind = match result {
                Ok(RawToken::LineComment) => continue,
                Ok(RawToken::Newline) => {
                    newline_before = true;
                    continue;
                }
                Ok(RawToken::BlockComment) => {
                    if slice.contains(['\n', '\u{2028}', '\u{2029}']) {
                        newline_before = true;
                    }
                    continue;
                }
                Ok(RawToken::UnterminatedComment) => {
                    output
                        .errors
                        .push(LexError::new(LexErrorKind::UnterminatedComment, span));
                    // The rest of the file is inside the comment.
                    break;
                }
                Ok(RawToken::UnterminatedString) => {
                    output
                        .errors
                        .push(LexError::new(LexErrorKind::UnterminatedString, span));
                    TokenKind::Error
                }
                Ok(raw) => self.convert_token(raw, slice, span, &mut output.errors),
                Err(()) => {
                    let ch = slice.chars().next().unwrap_or('\0');
                    let kind = if ch.is_ascii_digit() {
                        LexErrorKind::InvalidNumber
                    } else {
                        LexErrorKind::UnexpectedCharacter(ch)
                    };
                    output.errors.push(LexError::new(kind, span));
                    TokenKind::Error
                }
            };

            let mut token = Token::new(kind, span);
            token.newline_before = std::mem::take(&mut newline_before);
            output.tokens.push(token);
        }

        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        let mut eof = Token::new(TokenKind::Eof, Span::point(end));
        eof.newline_before = newline_before;
        output.tokens.push(eof);
        output
    }

    fn convert_token(
        &self,
        raw: RawToken,
        slice: &str,
        span: Span,
        errors: &mut Vec<LexError>,
    ) -> TokenKind {
        match raw {
            RawToken::Number(value) | RawToken::RadixNumber(value) => TokenKind::Number(value),
            RawToken::String => {
                let body = &slice[1..slice.len() - 1];
                let (text, problems) = cook::unescape(body);
                for problem in problems {
                    let start = span.start as usize + 1 + problem.offset;
                    let end = start + problem.sequence.len();
                    errors.push(LexError::new(
                        LexErrorKind::InvalidEscape(problem.sequence),
                        Span::from_range(start..end),
                    ));
                }
                TokenKind::String(text.into())
            }
            RawToken::Ident => TokenKind::Ident(self.interner.intern(slice)),

            RawToken::Var => TokenKind::Var,
            RawToken::Let => TokenKind::Let,
            RawToken::Const => TokenKind::Const,
            RawToken::Function => TokenKind::Function,
            RawToken::Return => TokenKind::Return,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::While => TokenKind::While,
            RawToken::Do => TokenKind::Do,
            RawToken::For => TokenKind::For,
            RawToken::Break => TokenKind::Break,
            RawToken::Continue => TokenKind::Continue,
            RawToken::Switch => TokenKind::Switch,
            RawToken::Case => TokenKind::Case,
            RawToken::Default => TokenKind::Default,
            RawToken::Try => TokenKind::Try,
            RawToken::Catch => TokenKind::Catch,
            RawToken::Finally => TokenKind::Finally,
            RawToken::Throw => TokenKind::Throw,
            RawToken::Typeof => TokenKind::Typeof,
            RawToken::Void => TokenKind::Void,
            RawToken::Delete => TokenKind::Delete,
            RawToken::In => TokenKind::In,
            RawToken::Instanceof => TokenKind::Instanceof,
            RawToken::New => TokenKind::New,
            RawToken::This => TokenKind::This,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Null => TokenKind::Null,
            RawToken::Debugger => TokenKind::Debugger,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Question => TokenKind::Question,
            RawToken::Arrow => TokenKind::Arrow,

            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::PlusPlus => TokenKind::PlusPlus,
            RawToken::MinusMinus => TokenKind::MinusMinus,
            RawToken::Shl => TokenKind::Shl,
            RawToken::Shr => TokenKind::Shr,
            RawToken::UShr => TokenKind::UShr,
            RawToken::Amp => TokenKind::Amp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::EqEqEq => TokenKind::EqEqEq,
            RawToken::NotEqEq => TokenKind::NotEqEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::SlashEq => TokenKind::SlashEq,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::ShlEq => TokenKind::ShlEq,
            RawToken::ShrEq => TokenKind::ShrEq,
            RawToken::UShrEq => TokenKind::UShrEq,
            RawToken::AmpEq => TokenKind::AmpEq,
            RawToken::PipeEq => TokenKind::PipeEq,
            RawToken::CaretEq => TokenKind::CaretEq,

            // Trivia and unterminated forms are consumed by `lex_all`.
            RawToken::LineComment
            | RawToken::BlockComment
            | RawToken::UnterminatedComment
            | RawToken::Newline
            | RawToken::UnterminatedString => TokenKind::Error,
        }
    }
}
