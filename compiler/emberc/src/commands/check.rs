//! The `check` command: lex and parse a file without running it.

use ember_ir::StringInterner;

use super::{parse_source, read_file};
use crate::CliError;

/// Report every lexer and parser error in `path`.
pub fn check_file(path: &str) -> Result<(), CliError> {
    let text = read_file(path)?;
    let interner = StringInterner::new();
    let (output, _) = parse_source(path, text, &interner)?;
    println!(
        "{path}: ok ({} statement(s))",
        output.program.body.len()
    );
    Ok(())
}
