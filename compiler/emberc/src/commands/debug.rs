//! Debug commands: `parse` and `lex` for inspecting the front end.

use std::fmt::Write;

use ember_ir::{StringInterner, TokenList};
use ember_parse::ParseOutput;

use super::read_file;
use crate::CliError;

/// Parse a file and display a summary of its top-level statements.
///
/// Parse errors are listed, not treated as failure.
pub fn parse_file(path: &str) -> Result<(), CliError> {
    let text = read_file(path)?;
    let interner = StringInterner::new();
    let output = ember_parse::parse(&text, &interner);
    print!("{}", render_parse_summary(path, &output));
    Ok(())
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let text = read_file(path)?;
    let interner = StringInterner::new();
    let tokens = ember_lexer::lex(&text, &interner);
    print!("{}", render_tokens(path, &tokens));
    Ok(())
}

pub fn render_parse_summary(path: &str, output: &ParseOutput) -> String {
    let program = &output.program;
    let mut out = String::new();
    let _ = writeln!(out, "Parse result for '{path}':");
    let _ = writeln!(out, "  Statements: {}", program.body.len());
    let _ = writeln!(out, "  Expressions: {}", program.arena.expr_count());
    let _ = writeln!(out, "  Errors: {}", output.errors.len());

    if !program.body.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Statements:");
        for &id in &program.body {
            let stmt = program.arena.get_stmt(id);
            let _ = writeln!(out, "  {} @ {}", stmt.kind.kind_name(), stmt.span);
        }
    }

    if output.has_errors() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Errors:");
        for error in &output.errors {
            let _ = writeln!(out, "  {}: {error}", error.span);
        }
    }
    out
}

pub fn render_tokens(path: &str, tokens: &TokenList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tokens for '{path}' ({} tokens):", tokens.len());
    for token in tokens.iter() {
        let marker = if token.newline_before { " (newline)" } else { "" };
        let _ = writeln!(out, "  {:?} @ {}{marker}", token.kind, token.span);
    }
    out
}
