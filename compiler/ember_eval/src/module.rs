//! Module adapter.
//!
//! A module runs in its own function scope holding `module` (an object
//! with an `exports` property) and `exports` (the same initial exports
//! object). Whatever `module.exports` holds when the program finishes is
//! the module's result.

use ember_ir::{Name, Program, StringInterner};
use tracing::debug;

use crate::environment::{DeclKind, LocalScope, Scope, ScopeKind};
use crate::errors::{redeclaration, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{ObjectMap, Value};

/// Run `program` as a module with a default interpreter.
///
/// `parent` supplies outer bindings; without one the module sees a fresh
/// global scope.
pub fn run_module(
    program: &Program,
    interner: &StringInterner,
    parent: Option<&LocalScope<Scope>>,
) -> EvalResult {
    Interpreter::new(interner).run_module(program, parent)
}

impl Interpreter<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_module(
        &mut self,
        program: &Program,
        parent: Option<&LocalScope<Scope>>,
    ) -> EvalResult {
        let parent = match parent {
            Some(parent) => parent.clone(),
            None => self.global_scope(),
        };
        let scope = Scope::child(&parent, ScopeKind::Function);

        let exports = Value::empty_object();
        let mut module = ObjectMap::default();
        module.insert("exports".to_string(), exports.clone());
        let module = Value::object(module);
        scope
            .declare(DeclKind::Var, Name::MODULE, module.clone())
            .map_err(|_| redeclaration("module"))?;
        scope
            .declare(DeclKind::Var, Name::EXPORTS, exports)
            .map_err(|_| redeclaration("exports"))?;

        let outcome = self.eval_program(program, &scope);
        // Exported closures may still hold the module scope.
        drop(scope);
        self.collect_cycles();
        outcome?;

        let Value::Object(module) = module else {
            return Ok(Value::Undefined);
        };
        let result = module
            .borrow()
            .get("exports")
            .cloned()
            .unwrap_or(Value::Undefined);
        debug!(exports = %crate::value::inspect(&result), "module finished");
        Ok(result)
    }
}
