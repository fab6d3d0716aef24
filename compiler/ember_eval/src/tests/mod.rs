//! Evaluator tests driven from source text.
//!
//! Programs are parsed with `ember_parse` and run against a fresh global
//! scope whose `console` writes into a buffer.

mod control_flow_tests;
mod function_tests;
mod idempotence_tests;
mod object_tests;

use ember_ir::StringInterner;

use crate::errors::{EvalError, EvalResult};
use crate::interpreter::InterpreterBuilder;
use crate::print_handler::buffer_handler;
use crate::value::Value;

/// Run `source` with a builder adjusted by `configure`; returns the result
/// and everything printed.
pub(crate) fn run_with(
    source: &str,
    configure: impl FnOnce(InterpreterBuilder<'_>) -> InterpreterBuilder<'_>,
) -> (EvalResult, String) {
    let interner = StringInterner::new();
    let parsed = ember_parse::parse(source, &interner);
    assert!(
        parsed.errors.is_empty(),
        "parse errors in {source:?}: {:?}",
        parsed.errors
    );
    let handler = buffer_handler();
    let mut interp =
        configure(InterpreterBuilder::new(&interner).print_handler(handler.clone())).build();
    let scope = interp.global_scope();
    let result = interp.eval_program(&parsed.program, &scope);
    (result, handler.get_output())
}

pub(crate) fn run(source: &str) -> EvalResult {
    run_with(source, |builder| builder).0
}

pub(crate) fn run_ok(source: &str) -> Value {
    match run(source) {
        Ok(value) => value,
        Err(err) => panic!("{source:?} raised {err}"),
    }
}

pub(crate) fn run_err(source: &str) -> EvalError {
    match run(source) {
        Ok(value) => panic!("{source:?} completed with {value:?}, expected an error"),
        Err(err) => err,
    }
}

pub(crate) fn run_output(source: &str) -> String {
    match run_with(source, |builder| builder) {
        (Ok(_), output) => output,
        (Err(err), _) => panic!("{source:?} raised {err}"),
    }
}
