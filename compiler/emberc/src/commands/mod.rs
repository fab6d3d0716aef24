//! Command handlers for the Ember CLI.
//!
//! Each submodule implements one command. Shared helpers for reading and
//! parsing a file live here.

use ember_ir::StringInterner;
use ember_parse::ParseOutput;

use crate::CliError;

mod check;
mod debug;
mod run;

pub use check::check_file;
pub use debug::{lex_file, parse_file, render_parse_summary, render_tokens};
pub use run::{run_file, RunOptions};

/// Read a source file, mapping I/O failures to user-facing errors.
pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|error| CliError::from_io(path, error))
}

/// Parse `text`, turning any lexer or parser error into `CliError::Parse`.
pub(crate) fn parse_source(
    path: &str,
    text: String,
    interner: &StringInterner,
) -> Result<(ParseOutput, String), CliError> {
    let output = ember_parse::parse(&text, interner);
    if output.has_errors() {
        return Err(CliError::Parse {
            path: path.to_string(),
            text,
            errors: output.errors,
        });
    }
    Ok((output, text))
}
