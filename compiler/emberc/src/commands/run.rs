//! The `run` command: evaluate a script or module.

use ember_eval::value::inspect;
use ember_eval::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
use ember_ir::StringInterner;
use tracing::debug;

use super::{parse_source, read_file};
use crate::CliError;

/// Options for `ember run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub path: String,
    /// Assigning to an undeclared name is a `ReferenceError`.
    pub strict: bool,
    /// `None` disables the call depth limit.
    pub max_depth: Option<usize>,
    /// Run as a module and print `module.exports`.
    pub exports: bool,
}

impl RunOptions {
    /// Parse the arguments following `run`.
    ///
    /// Accepts `--strict`, `--max-depth=<n|none>` and `--exports` in any
    /// position; the first non-flag argument is the file.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut path = None;
        let mut strict = false;
        let mut max_depth = Some(DEFAULT_MAX_CALL_DEPTH);
        let mut exports = false;

        for arg in args {
            if arg == "--strict" {
                strict = true;
            } else if arg == "--exports" {
                exports = true;
            } else if let Some(value) = arg.strip_prefix("--max-depth=") {
                max_depth = parse_max_depth(value)?;
            } else if arg.starts_with('-') {
                return Err(CliError::UnknownOption(arg.clone()));
            } else if path.is_none() {
                path = Some(arg.clone());
            }
        }

        Ok(RunOptions {
            path: path.ok_or(CliError::MissingPath)?,
            strict,
            max_depth,
            exports,
        })
    }
}

fn parse_max_depth(value: &str) -> Result<Option<usize>, CliError> {
    if value == "none" {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(Some(depth)),
        _ => Err(CliError::InvalidFlagValue {
            flag: "--max-depth",
            value: value.to_string(),
        }),
    }
}

/// Run a file. `console.log` output goes to stdout.
pub fn run_file(options: &RunOptions) -> Result<(), CliError> {
    let path = options.path.as_str();
    let text = read_file(path)?;
    let interner = StringInterner::new();
    let (output, text) = parse_source(path, text, &interner)?;

    let mut interpreter = InterpreterBuilder::new(&interner)
        .strict_assignment(options.strict)
        .max_call_depth(options.max_depth)
        .build();

    let result = if options.exports {
        interpreter.run_module(&output.program, None)
    } else {
        let scope = interpreter.global_scope();
        interpreter.eval_program(&output.program, &scope)
    };

    match result {
        Ok(value) => {
            debug!(path, "run finished");
            if options.exports {
                println!("{}", inspect(&value));
            }
            Ok(())
        }
        Err(error) => Err(CliError::Eval {
            path: path.to_string(),
            text,
            error,
        }),
    }
}
