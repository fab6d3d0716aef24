//! Assignment targets and property access.
//!
//! `a = v`, `o.k += v` and `x++` all go through a `Reference`: the target is
//! resolved once (object, then key), optionally read, then written.

use std::rc::Rc;

use ember_ir::{AssignOp, ExprId, ExprKind, MemberProperty, Name, UpdateOp};

use super::Interpreter;
use crate::environment::{AssignError, LocalScope, Scope};
use crate::errors::{
    const_reassignment, invalid_statement_form, nullish_property, redeclaration,
    unresolved_reference, EvalError, EvalResult, PropertyAccess,
};
use crate::operators::evaluate_binary;
use crate::value::{array_index, Value};

/// Largest number of slots a single index or `length` write may add to an
/// array. Larger writes are ignored.
const MAX_ARRAY_GROWTH: usize = 1 << 24;

/// A resolved assignment target.
#[derive(Clone, Debug)]
pub(super) enum Reference {
    Binding(Name),
    Property { base: Value, key: Rc<str> },
}

impl Interpreter<'_> {
    pub(super) fn resolve_reference(
        &mut self,
        target: ExprId,
        scope: &LocalScope<Scope>,
    ) -> Result<Reference, EvalError> {
        let arena = self.arena.clone();
        match &arena.get_expr(target).kind {
            ExprKind::Ident(name) => Ok(Reference::Binding(*name)),
            ExprKind::Member { object, property } => {
                let base = self.eval_expr(*object, scope)?;
                let key = self.member_key(property, scope)?;
                Ok(Reference::Property { base, key })
            }
            _ => Err(invalid_statement_form("Invalid left-hand side in assignment")),
        }
    }

    pub(super) fn get_reference(
        &mut self,
        reference: &Reference,
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        match reference {
            Reference::Binding(name) => self.lookup(*name, scope),
            Reference::Property { base, key } => get_property(base, key),
        }
    }

    pub(super) fn put_reference(
        &mut self,
        reference: &Reference,
        value: Value,
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        match reference {
            Reference::Binding(name) => self.assign_binding(*name, value, scope),
            Reference::Property { base, key } => set_property(base, key, value),
        }
    }

    /// Write to an existing binding, or create an implicit global when no
    /// scope declares `name` and strict assignment is off.
    fn assign_binding(
        &self,
        name: Name,
        value: Value,
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        match scope.set(name, value.clone()) {
            Ok(()) => Ok(()),
            Err(AssignError::Const) => Err(const_reassignment(self.name_str(name))),
            Err(AssignError::Undefined) if self.strict_assignment => {
                Err(unresolved_reference(self.name_str(name)))
            }
            Err(AssignError::Undefined) => scope
                .define_implicit(name, value)
                .map_err(|_| redeclaration(self.name_str(name))),
        }
    }

    /// Key of a member expression: the name itself, or the computed key
    /// converted to a string.
    pub(super) fn member_key(
        &mut self,
        property: &MemberProperty,
        scope: &LocalScope<Scope>,
    ) -> Result<Rc<str>, EvalError> {
        match property {
            MemberProperty::Named(name) => Ok(Rc::from(self.name_str(*name))),
            MemberProperty::Computed(expr) => Ok(self.eval_expr(*expr, scope)?.to_js_string()),
        }
    }

    pub(super) fn eval_assign(
        &mut self,
        op: AssignOp,
        target: ExprId,
        value: ExprId,
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let reference = self.resolve_reference(target, scope)?;
        let value = match op {
            AssignOp::Assign => {
                let hint = match &reference {
                    Reference::Binding(name) => Some(self.name_str(*name)),
                    Reference::Property { .. } => None,
                };
                self.eval_named(value, scope, hint)?
            }
            AssignOp::Compound(op) => {
                let old = self.get_reference(&reference, scope)?;
                let rhs = self.eval_expr(value, scope)?;
                evaluate_binary(op, &old, &rhs)?
            }
        };
        self.put_reference(&reference, value.clone(), scope)?;
        Ok(value)
    }

    /// `++x`, `x--`, ... Prefix forms yield the new value, postfix forms the
    /// old value after numeric conversion.
    pub(super) fn eval_update(
        &mut self,
        op: UpdateOp,
        prefix: bool,
        target: ExprId,
        scope: &LocalScope<Scope>,
    ) -> EvalResult {
        let reference = self.resolve_reference(target, scope)?;
        let old = self.get_reference(&reference, scope)?.to_number();
        let new = match op {
            UpdateOp::Increment => old + 1.0,
            UpdateOp::Decrement => old - 1.0,
        };
        self.put_reference(&reference, Value::Number(new), scope)?;
        Ok(Value::Number(if prefix { new } else { old }))
    }
}

/// Read `base[key]`.
///
/// Strings index by UTF-16 code unit. Half of a surrogate pair has no
/// `str` form, so reading one yields U+FFFD: `s[i]` of an astral
/// character does not round-trip.
pub(crate) fn get_property(base: &Value, key: &str) -> EvalResult {
    let value = match base {
        Value::Undefined | Value::Null => {
            return Err(nullish_property(base, key, PropertyAccess::Read));
        }
        Value::Object(map) => map.borrow().get(key).cloned().unwrap_or(Value::Undefined),
        Value::Array(items) => {
            let items = items.borrow();
            if key == "length" {
                length_value(items.len())
            } else {
                array_index(key)
                    .and_then(|index| items.get(index).cloned())
                    .unwrap_or(Value::Undefined)
            }
        }
        Value::Str(text) => {
            if key == "length" {
                length_value(text.encode_utf16().count())
            } else {
                array_index(key)
                    .and_then(|index| text.encode_utf16().nth(index))
                    .map_or(Value::Undefined, |unit| {
                        Value::from(String::from_utf16_lossy(&[unit]))
                    })
            }
        }
        Value::Function(func) => match key {
            "name" => Value::from(func.name()),
            "length" => length_value(func.arity()),
            _ => Value::Undefined,
        },
        Value::Bool(_) | Value::Number(_) => Value::Undefined,
    };
    Ok(value)
}

/// Write `base[key] = value`.
///
/// Arrays accept index writes (growing with `undefined`) and `length`
/// writes (truncating or growing); other keys on arrays and writes to
/// primitives are ignored.
pub(crate) fn set_property(base: &Value, key: &str, value: Value) -> Result<(), EvalError> {
    match base {
        Value::Undefined | Value::Null => {
            Err(nullish_property(base, key, PropertyAccess::Write))
        }
        Value::Object(map) => {
            map.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let mut items = items.borrow_mut();
            if key == "length" {
                if let Some(len) = valid_length(&value) {
                    if len <= items.len() + MAX_ARRAY_GROWTH {
                        items.resize(len, Value::Undefined);
                    }
                }
            } else if let Some(index) = array_index(key) {
                if index < items.len() {
                    items[index] = value;
                } else if index <= items.len() + MAX_ARRAY_GROWTH {
                    items.resize(index, Value::Undefined);
                    items.push(value);
                }
            }
            Ok(())
        }
        Value::Bool(_) | Value::Number(_) | Value::Str(_) | Value::Function(_) => Ok(()),
    }
}

/// `delete base[key]`. Array slots become `undefined`; the array keeps its
/// length.
pub(crate) fn delete_property(base: &Value, key: &str) -> Result<bool, EvalError> {
    match base {
        Value::Undefined | Value::Null => {
            Err(nullish_property(base, key, PropertyAccess::Write))
        }
        Value::Object(map) => {
            map.borrow_mut().shift_remove(key);
            Ok(true)
        }
        Value::Array(items) => {
            if let Some(index) = array_index(key) {
                if let Some(slot) = items.borrow_mut().get_mut(index) {
                    *slot = Value::Undefined;
                }
            }
            Ok(true)
        }
        Value::Bool(_) | Value::Number(_) | Value::Str(_) | Value::Function(_) => Ok(true),
    }
}

fn length_value(len: usize) -> Value {
    Value::Number(len as f64)
}

/// A number usable as an array length: a non-negative integer below 2^32.
fn valid_length(value: &Value) -> Option<usize> {
    let n = value.as_number()?;
    if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) {
        Some(n as usize)
    } else {
        None
    }
}
