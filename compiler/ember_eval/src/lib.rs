//! Ember Eval - tree-walking evaluator for Ember scripts.
//!
//! Ember scripts are a small dynamically typed language with C-style
//! syntax: `var`/`let`/`const`, closures, objects and arrays, labeled loops,
//! `switch`, and `try`/`catch`/`finally`.
//!
//! # Architecture
//!
//! - `Scope` / `LocalScope`: lexical scope chain with `var` hoisting to the
//!   nearest function scope
//! - `ControlAction`: how a statement completes (normal, break, continue,
//!   return)
//! - `evaluate_binary` / `evaluate_unary`: operator semantics on values
//! - `Interpreter`: walks the syntax tree produced by `ember_parse`
//! - `run_module`: runs a program with `module` / `exports` bindings
//!
//! # Entry points
//!
//! `evaluate` runs a program with default settings. Use
//! `InterpreterBuilder` for strict assignment, a custom call depth limit, or
//! captured console output.

mod diagnostics;
pub mod environment;
pub mod errors;
pub mod exec;
pub mod interpreter;
pub mod module;
mod operators;
mod print_handler;
mod stack;
mod unary_operators;
pub mod value;

#[cfg(test)]
mod tests;

use ember_ir::{Program, StringInterner};

pub use diagnostics::{CallFrame, CallStack, DEFAULT_MAX_CALL_DEPTH};
pub use environment::{
    AssignError, DeclKind, DeclareError, LocalScope, Scope, ScopeKind, WeakScope,
};
pub use errors::{
    // Fatal
    invalid_statement_form, redeclaration, stack_overflow, unsupported_syntax,
    // Catchable
    const_reassignment, invalid_in_operand, invalid_instanceof_operand, not_callable,
    nullish_property, unresolved_reference, user_thrown,
    // Types
    BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
    PropertyAccess,
};
pub use exec::control::{ControlAction, LabelSet, LoopAction};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use module::run_module;
pub use operators::{compare, evaluate_binary};
pub use print_handler::{
    buffer_handler, console_object, install_console, silent_handler, stdout_handler,
    BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{FunctionKind, FunctionValue, Heap, HeapContents, NativeFn, ObjectMap, Value};

/// Evaluate `program` in `scope` with a default `Interpreter` and return the
/// value of its last statement.
///
/// `scope` is used as given: call `Interpreter::global_scope` (or
/// `install_console`) first if the script should see `console`.
pub fn evaluate(program: &Program, scope: &LocalScope<Scope>, interner: &StringInterner) -> EvalResult {
    Interpreter::new(interner).eval_program(program, scope)
}
