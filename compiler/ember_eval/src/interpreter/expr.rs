//! Expression evaluation.

use ember_ir::{ExprId, ExprKind, LogicalOp, Name, Property, PropertyKey, UnaryOp};

use super::reference::{delete_property, get_property};
use super::Interpreter;
use crate::environment::{LocalScope, Scope};
use crate::errors::{unresolved_reference, unsupported_syntax, EvalResult};
use crate::operators::evaluate_binary;
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;
use crate::value::{number_to_string, ObjectMap, Value};

impl Interpreter<'_> {
    /// Evaluate an expression. Errors without a span get this node's.
    pub(super) fn eval_expr(&mut self, id: ExprId, scope: &LocalScope<Scope>) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id, scope))
            .map_err(|err| err.with_span(self.arena.expr_span(id)))
    }

    /// Evaluate `id`, naming it `hint` if it is an anonymous function.
    pub(super) fn eval_named(
        &mut self,
        id: ExprId,
        scope: &LocalScope<Scope>,
        hint: Option<&str>,
    ) -> EvalResult {
        if let ExprKind::Function(func) = self.arena.get_expr(id).kind {
            return Ok(self.make_function(func, scope, hint));
        }
        self.eval_expr(id, scope)
    }

    fn eval_expr_inner(&mut self, id: ExprId, scope: &LocalScope<Scope>) -> EvalResult {
        let arena = self.arena.clone();
        let expr = arena.get_expr(id);
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::String(s) => Ok(Value::Str(s.clone())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Ident(name) => self.lookup(*name, scope),
            ExprKind::This | ExprKind::New { .. } => Err(unsupported_syntax(expr.kind.kind_name())),
            ExprKind::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for &element in elements {
                    items.push(self.eval_expr(element, scope)?);
                }
                Ok(Value::array(items))
            }
            ExprKind::Object(properties) => self.eval_object(properties, scope),
            ExprKind::Function(func) => Ok(self.make_function(*func, scope, None)),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, *operand, scope),
            ExprKind::Update { op, prefix, target } => {
                self.eval_update(*op, *prefix, *target, scope)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(*left, scope)?;
                let right = self.eval_expr(*right, scope)?;
                evaluate_binary(*op, &left, &right)
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.eval_expr(*left, scope)?;
                let short_circuit = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.eval_expr(*right, scope)
                }
            }
            ExprKind::Assign { op, target, value } => self.eval_assign(*op, *target, *value, scope),
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(*test, scope)?.is_truthy() {
                    self.eval_expr(*consequent, scope)
                } else {
                    self.eval_expr(*alternate, scope)
                }
            }
            ExprKind::Call { callee, args } => self.eval_call(*callee, args, expr.span, scope),
            ExprKind::Member { object, property } => {
                let base = self.eval_expr(*object, scope)?;
                let key = self.member_key(property, scope)?;
                get_property(&base, &key)
            }
            ExprKind::Sequence(exprs) => {
                let mut last = Value::Undefined;
                for &expr in exprs {
                    last = self.eval_expr(expr, scope)?;
                }
                Ok(last)
            }
        }
    }

    /// Read a variable. `undefined`, `NaN` and `Infinity` resolve to their
    /// values unless a scope shadows them.
    pub(super) fn lookup(&self, name: Name, scope: &LocalScope<Scope>) -> EvalResult {
        if let Some(value) = scope.get(name) {
            return Ok(value);
        }
        match name {
            Name::UNDEFINED => Ok(Value::Undefined),
            Name::NAN => Ok(Value::Number(f64::NAN)),
            Name::INFINITY => Ok(Value::Number(f64::INFINITY)),
            _ => Err(unresolved_reference(self.name_str(name))),
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: ExprId, scope: &LocalScope<Scope>) -> EvalResult {
        let arena = self.arena.clone();
        match (op, &arena.get_expr(operand).kind) {
            (UnaryOp::Typeof, ExprKind::Ident(name)) => {
                let value = self.lookup(*name, scope).unwrap_or(Value::Undefined);
                Ok(evaluate_unary(op, &value))
            }
            (UnaryOp::Delete, ExprKind::Member { object, property }) => {
                let base = self.eval_expr(*object, scope)?;
                let key = self.member_key(property, scope)?;
                Ok(Value::Bool(delete_property(&base, &key)?))
            }
            // Bindings are not deletable; the operand is not evaluated.
            (UnaryOp::Delete, ExprKind::Ident(_)) => Ok(Value::Bool(true)),
            _ => {
                let value = self.eval_expr(operand, scope)?;
                Ok(evaluate_unary(op, &value))
            }
        }
    }

    fn eval_object(&mut self, properties: &[Property], scope: &LocalScope<Scope>) -> EvalResult {
        let mut map = ObjectMap::with_capacity(properties.len());
        for property in properties {
            let key = match &property.key {
                PropertyKey::Named(name) => self.name_str(*name).to_string(),
                PropertyKey::String(s) => s.to_string(),
                PropertyKey::Number(n) => number_to_string(*n),
                PropertyKey::Computed(expr) => self.eval_expr(*expr, scope)?.to_js_string().to_string(),
            };
            let value = self.eval_named(property.value, scope, Some(key.as_str()))?;
            map.insert(key, value);
        }
        Ok(Value::object(map))
    }
}
