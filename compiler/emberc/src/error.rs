//! CLI error type.

use ember_eval::EvalError;
use ember_parse::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    FileNotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidFlagValue { flag: &'static str, value: String },
    #[error("missing file path")]
    MissingPath,
    /// Lexer or parser errors; `text` is the file contents for rendering.
    #[error("could not parse '{path}': {} error(s)", errors.len())]
    Parse {
        path: String,
        text: String,
        errors: Vec<ParseError>,
    },
    #[error("{error}")]
    Eval {
        path: String,
        text: String,
        error: EvalError,
    },
}

impl CliError {
    /// Map a failed read of `path` to a user-facing error.
    pub fn from_io(path: &str, error: std::io::Error) -> Self {
        let path = path.to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => CliError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, error },
        }
    }
}
