//! Tree-walking interpreter.
//!
//! # Architecture
//!
//! - `stmt`: statement execution, producing a `ControlAction`
//! - `expr`: expression evaluation, producing a `Value`
//! - `reference`: assignment targets and property access
//! - `function_call`: closure creation and invocation
//! - `hoist`: `var` and function declaration hoisting
//! - `cycles`: reclaiming scopes kept alive only by their own closures
//!
//! The interpreter holds the arena of the code it is currently running.
//! Calling a closure swaps in the closure's own arena for the duration of
//! the call, so functions created by one program stay callable from
//! another.

mod builder;
mod cycles;
mod expr;
mod function_call;
mod hoist;
mod reference;
mod stmt;


pub use builder::InterpreterBuilder;

use cycles::CaptureRegistry;

use ember_ir::{Name, Program, SharedArena, StringInterner};
use tracing::debug;

use crate::diagnostics::CallStack;
use crate::environment::{LocalScope, Scope};
use crate::errors::{EvalError, EvalResult};
use crate::exec::control::ControlAction;
use crate::print_handler::{install_console, SharedPrintHandler};
use crate::value::Value;

/// Result of executing a statement.
pub type ExecResult = Result<ControlAction, EvalError>;

/// Tree-walking interpreter.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    /// Arena of the code currently executing.
    arena: SharedArena,
    call_stack: CallStack,
    /// Raise `UnresolvedReference` for assignments to undeclared names
    /// instead of creating an implicit global.
    strict_assignment: bool,
    print_handler: SharedPrintHandler,
    /// Scopes captured by closures, checked for unreachable cycles.
    captures: CaptureRegistry,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with default configuration.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn strict_assignment(&self) -> bool {
        self.strict_assignment
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// A fresh root scope holding the host globals (`console`).
    pub fn global_scope(&self) -> LocalScope<Scope> {
        let scope = Scope::new_root();
        install_console(&scope, self.print_handler.clone());
        scope
    }

    /// Run a program in `scope` and return the value of its last statement.
    ///
    /// A `return` escaping to the top level ends the program with its
    /// value; a stray `break`/`continue` ends it with `undefined`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_program(&mut self, program: &Program, scope: &LocalScope<Scope>) -> EvalResult {
        let previous = std::mem::replace(&mut self.arena, program.arena.clone());
        let result = self
            .hoist_declarations(&program.body, scope)
            .and_then(|()| self.eval_statement_list(&program.body, scope));
        self.arena = previous;
        if self.call_stack.is_empty() {
            self.collect_cycles();
        }

        match result {
            Ok(action) => {
                debug!(statements = program.body.len(), "program completed");
                Ok(action.into_value())
            }
            Err(err) => {
                debug!(code = err.code(), error = %err, "program raised");
                Err(err)
            }
        }
    }

    /// Call a function value from the host.
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        self.call_value(callee, args, None)
    }

    #[inline]
    fn name_str(&self, name: Name) -> &'a str {
        self.interner.lookup(name)
    }
}
