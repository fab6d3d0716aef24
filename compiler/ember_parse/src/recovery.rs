//! Error recovery: skip to a point where statement parsing can resume.

use ember_ir::TokenKind;

use crate::cursor::Cursor;

/// Whether `kind` can only begin a statement.
fn starts_statement(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Var
            | TokenKind::Let
            | TokenKind::Const
            | TokenKind::Function
            | TokenKind::Return
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::For
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Switch
            | TokenKind::Try
            | TokenKind::Throw
            | TokenKind::Debugger
    )
}

/// Advance past the broken statement.
///
/// Stops after a `;`, before a `}` or end of input, or before a token
/// that starts a statement on a new line. Always consumes at least one
/// token when `start` equals the current position, so callers make
/// progress.
pub(crate) fn synchronize(cursor: &mut Cursor<'_>, start: usize) {
    if cursor.position() == start && !cursor.is_at_end() {
        let consumed = cursor.advance();
        if matches!(consumed.kind, TokenKind::Semicolon) {
            return;
        }
    }
    loop {
        let token = cursor.current();
        match token.kind {
            TokenKind::Eof | TokenKind::RBrace => return,
            TokenKind::Semicolon => {
                cursor.advance();
                return;
            }
            ref kind if token.newline_before && starts_statement(kind) => return,
            _ => {
                cursor.advance();
            }
        }
    }
}
