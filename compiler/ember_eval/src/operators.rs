//! Binary operator semantics.
//!
//! Direct dispatch on `BinaryOp`. Operands arrive already evaluated (left
//! before right); conversions in this model have no side effects, so the
//! order in which `ToPrimitive` runs on them is unobservable.

use std::cmp::Ordering;

use ember_ir::BinaryOp;

use crate::errors::{invalid_in_operand, invalid_instanceof_operand, EvalResult};
use crate::value::{array_index, Value};

/// Evaluate a non-short-circuiting binary operator.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let value = match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        // IEEE remainder truncates toward zero: the sign follows the dividend.
        BinaryOp::Mod => Value::Number(left.to_number() % right.to_number()),

        BinaryOp::Eq => Value::Bool(left.loose_equals(right)),
        BinaryOp::NotEq => Value::Bool(!left.loose_equals(right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_equals(right)),

        // `a <= b` is `!(b < a)`, except that an undefined comparison
        // (`NaN` involved) is false either way.
        BinaryOp::Lt => Value::Bool(compare(left, right) == Some(Ordering::Less)),
        BinaryOp::Gt => Value::Bool(compare(left, right) == Some(Ordering::Greater)),
        BinaryOp::LtEq => Value::Bool(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::GtEq => Value::Bool(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        )),

        BinaryOp::BitAnd => int32(left.to_int32() & right.to_int32()),
        BinaryOp::BitOr => int32(left.to_int32() | right.to_int32()),
        BinaryOp::BitXor => int32(left.to_int32() ^ right.to_int32()),
        BinaryOp::Shl => int32(left.to_int32().wrapping_shl(shift_count(right))),
        BinaryOp::Shr => int32(left.to_int32().wrapping_shr(shift_count(right))),
        BinaryOp::UShr => Value::Number(f64::from(
            left.to_uint32().wrapping_shr(shift_count(right)),
        )),

        BinaryOp::In => Value::Bool(has_property(right, left)?),
        BinaryOp::Instanceof => {
            // No prototypes in this model: nothing is an instance of
            // anything, but the right side must still be callable.
            if !right.is_callable() {
                return Err(invalid_instanceof_operand());
            }
            Value::Bool(false)
        }
    };
    Ok(value)
}

/// `+`: string concatenation when either primitive operand is a string,
/// numeric addition otherwise.
fn add(left: &Value, right: &Value) -> Value {
    let left = left.to_primitive();
    let right = right.to_primitive();
    match (&left, &right) {
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            let mut text = left.to_js_string().to_string();
            text.push_str(&right.to_js_string());
            Value::string(text)
        }
        _ => Value::Number(left.to_number() + right.to_number()),
    }
}

/// Relational comparison: strings by UTF-16 code units when both
/// primitives are strings, numbers otherwise. `None` when either number is
/// `NaN`.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    let left = left.to_primitive();
    let right = right.to_primitive();
    if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
        return Some(a.encode_utf16().cmp(b.encode_utf16()));
    }
    left.to_number().partial_cmp(&right.to_number())
}

#[inline]
fn int32(n: i32) -> Value {
    Value::Number(f64::from(n))
}

#[inline]
fn shift_count(value: &Value) -> u32 {
    value.to_uint32() & 0x1f
}

/// `key in target`.
fn has_property(target: &Value, key: &Value) -> Result<bool, crate::errors::EvalError> {
    let key = key.to_js_string();
    match target {
        Value::Object(map) => Ok(map.borrow().contains_key(&*key)),
        Value::Array(items) => Ok(&*key == "length"
            || array_index(&key).is_some_and(|index| index < items.borrow().len())),
        Value::Function(_) => Ok(matches!(&*key, "name" | "length")),
        other => Err(invalid_in_operand(&key, other)),
    }
}
