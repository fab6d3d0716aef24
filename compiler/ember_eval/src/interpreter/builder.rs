//! `InterpreterBuilder` for configured `Interpreter` instances.

use ember_ir::{SharedArena, StringInterner};

use super::{CaptureRegistry, Interpreter};
use crate::diagnostics::{CallStack, DEFAULT_MAX_CALL_DEPTH};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for `Interpreter`.
///
/// Defaults: implicit globals on assignment to undeclared names, a call
/// depth limit of `DEFAULT_MAX_CALL_DEPTH`, output to stdout.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    strict_assignment: bool,
    max_call_depth: Option<usize>,
    print_handler: Option<SharedPrintHandler>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder {
            interner,
            strict_assignment: false,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            print_handler: None,
        }
    }

    /// Raise `UnresolvedReference` when assigning to a name no scope
    /// declares, instead of creating a binding in the root scope.
    #[must_use]
    pub fn strict_assignment(mut self, strict: bool) -> Self {
        self.strict_assignment = strict;
        self
    }

    /// Limit on nested script calls; `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Where `console.log` output goes in scopes built by
    /// `Interpreter::global_scope`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: self.interner,
            arena: SharedArena::default(),
            call_stack: CallStack::new(self.max_call_depth),
            strict_assignment: self.strict_assignment,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            captures: CaptureRegistry::default(),
        }
    }
}
