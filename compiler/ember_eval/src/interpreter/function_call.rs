//! Closure creation and function invocation.

use std::rc::Rc;

use ember_ir::{ExprId, ExprKind, FunctionBody, FunctionId, MemberProperty, SharedArena, Span};
use tracing::trace;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::environment::{DeclKind, LocalScope, Scope, ScopeKind};
use crate::errors::{not_callable, redeclaration, EvalResult};
use crate::exec::control::ControlAction;
use crate::value::{FunctionKind, FunctionValue, Value};

impl Interpreter<'_> {
    /// Create a closure over `scope`. `name_hint` names anonymous
    /// functions after the binding or property they are assigned to.
    pub(super) fn make_function(
        &mut self,
        func: FunctionId,
        scope: &LocalScope<Scope>,
        name_hint: Option<&str>,
    ) -> Value {
        self.captures.register(scope);
        let def = self.arena.get_function(func);
        let name = def
            .name
            .map(|name| self.name_str(name))
            .or(name_hint)
            .unwrap_or("");
        Value::function(FunctionValue::user(
            name,
            def.params.len(),
            func,
            self.arena.clone(),
            scope.clone(),
        ))
    }

    /// `callee(args)`: evaluate the callee, then the arguments left to
    /// right, then check callability.
    pub(super) fn eval_call(
        &mut self,
        callee: ExprId,
        args: &[ExprId],
        span: Span,
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let function = self.eval_expr(callee, scope)?;
        let mut values = Vec::with_capacity(args.len());
        for &arg in args {
            values.push(self.eval_expr(arg, scope)?);
        }
        if !function.is_callable() {
            return Err(not_callable(self.callee_text(callee)));
        }
        self.call_value(&function, &values, Some(span))
    }

    pub(super) fn call_value(
        &mut self,
        callee: &Value,
        args: &[Value],
        call_span: Option<Span>,
    ) -> EvalResult {
        let Value::Function(func) = callee else {
            return Err(not_callable(callee.to_js_string().to_string()));
        };
        match func.kind() {
            FunctionKind::Native(native) => native(args),
            FunctionKind::User {
                def,
                arena,
                closure,
            } => {
                self.call_stack.push(CallFrame {
                    name: Rc::from(func.name()),
                    call_span,
                })?;
                trace!(name = func.name(), depth = self.call_stack.depth(), "call");

                let previous = std::mem::replace(&mut self.arena, arena.clone());
                let result = self
                    .run_function(*def, closure, args)
                    .map_err(|err| self.call_stack.attach_backtrace(err));
                self.arena = previous;
                self.call_stack.pop();
                self.collect_cycles_if_due();
                result
            }
        }
    }

    /// Bind parameters in a fresh function scope parented at the closure
    /// scope, then run the body.
    fn run_function(
        &mut self,
        func: FunctionId,
        closure: &LocalScope<Scope>,
        args: &[Value],
    ) -> EvalResult {
        let arena: SharedArena = self.arena.clone();
        let def = arena.get_function(func);
        let scope = Scope::child(closure, ScopeKind::Function);

        for (i, &param) in def.params.iter().enumerate() {
            let value = args.get(i).cloned().unwrap_or(Value::Undefined);
            scope
                .declare(DeclKind::Var, param, value)
                .map_err(|_| redeclaration(self.name_str(param)).with_span(def.span))?;
        }

        match &def.body {
            FunctionBody::Expr(expr) => self.eval_expr(*expr, &scope),
            FunctionBody::Block(body) => {
                self.hoist_declarations(body, &scope)?;
                match self.eval_statement_list(body, &scope)? {
                    ControlAction::Return(value) => Ok(value),
                    // Falling off the end of a body yields `undefined`,
                    // whatever the last statement evaluated to.
                    ControlAction::Normal(_) | ControlAction::Break(_) | ControlAction::Continue(_) => {
                        Ok(Value::Undefined)
                    }
                }
            }
        }
    }

    /// Source-like rendering of a callee for "is not a function" messages.
    fn callee_text(&self, callee: ExprId) -> String {
        match &self.arena.get_expr(callee).kind {
            ExprKind::Ident(name) => self.name_str(*name).to_string(),
            ExprKind::Member {
                object,
                property: MemberProperty::Named(name),
            } => format!("{}.{}", self.callee_text(*object), self.name_str(*name)),
            ExprKind::Member { object, .. } => format!("{}[...]", self.callee_text(*object)),
            ExprKind::Call { callee, .. } => format!("{}(...)", self.callee_text(*callee)),
            _ => "expression".to_string(),
        }
    }
}
