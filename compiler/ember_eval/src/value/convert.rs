//! Type conversions: `ToPrimitive`, `ToNumber`, `ToString`, `ToInt32`,
//! and the two equality algorithms.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use super::{FunctionKind, Heap, Value};
use crate::stack::ensure_sufficient_stack;

const TWO_32: f64 = 4_294_967_296.0;
const TWO_31: f64 = 2_147_483_648.0;

impl Value {
    /// `ToPrimitive`. Objects have no `valueOf`/`toString` hooks in this
    /// model, so arrays join their elements, objects become
    /// `"[object Object]"` and functions render a short source stub.
    pub fn to_primitive(&self) -> Value {
        match self {
            Value::Object(_) | Value::Array(_) | Value::Function(_) => {
                Value::Str(self.to_js_string())
            }
            primitive => primitive.clone(),
        }
    }

    /// `ToNumber`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Str(s) => string_to_number(s),
            Value::Object(_) | Value::Array(_) | Value::Function(_) => {
                self.to_primitive().to_number()
            }
        }
    }

    /// `ToString`.
    pub fn to_js_string(&self) -> Rc<str> {
        let mut seen = FxHashSet::default();
        to_string_guarded(self, &mut seen)
    }

    #[inline]
    pub fn to_int32(&self) -> i32 {
        to_int32(self.to_number())
    }

    #[inline]
    pub fn to_uint32(&self) -> u32 {
        to_uint32(self.to_number())
    }

    /// `===`: no coercion, `NaN` unequal to itself, references by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `==`: `null == undefined`, booleans and strings compare as numbers
    /// against numbers, references compare against primitives through
    /// `ToPrimitive`.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => a.strict_equals(b),
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
                *n == string_to_number(s)
            }
            (Value::Bool(b), other) | (other, Value::Bool(b)) => {
                Value::Number(f64::from(u8::from(*b))).loose_equals(other)
            }
            (reference, primitive) | (primitive, reference)
                if reference.is_reference() && !primitive.is_reference() =>
            {
                reference.to_primitive().loose_equals(primitive)
            }
            _ => false,
        }
    }
}

/// `seen` holds the arrays currently being joined, so a cycle is cut at
/// its second visit. Nesting depth is limited only by memory.
fn to_string_guarded(value: &Value, seen: &mut FxHashSet<usize>) -> Rc<str> {
    match value {
        Value::Undefined => "undefined".into(),
        Value::Null => "null".into(),
        Value::Bool(b) => Rc::from(if *b { "true" } else { "false" }),
        Value::Number(n) => number_to_string(*n).into(),
        Value::Str(s) => Rc::clone(s),
        Value::Object(_) => "[object Object]".into(),
        Value::Array(items) => join_array(items, seen).into(),
        Value::Function(func) => {
            let body = match func.kind() {
                FunctionKind::Native(_) => "[native code]",
                FunctionKind::User { .. } => "...",
            };
            format!("function {}() {{ {body} }}", func.name()).into()
        }
    }
}

/// `Array.prototype.join(",")`; a cyclic reference contributes an empty
/// string.
fn join_array(items: &Heap<Vec<Value>>, seen: &mut FxHashSet<usize>) -> String {
    let addr = items.addr();
    if !seen.insert(addr) {
        return String::new();
    }
    let parts: Vec<Rc<str>> = items
        .borrow()
        .iter()
        .map(|item| {
            if item.is_nullish() {
                Rc::from("")
            } else {
                ensure_sufficient_stack(|| to_string_guarded(item, seen))
            }
        })
        .collect();
    seen.remove(&addr);
    parts.join(",")
}

/// `Number::toString(10)`: shortest round-trip digits, positional notation
/// for decimal exponents in `-7..21`, exponent notation otherwise.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return String::from(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let sci = format!("{:e}", n.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return format!("{n}");
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let point = exponent + 1;

    let body = if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let e = point - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{e_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{e_sign}{}", e.abs())
        }
    };
    format!("{sign}{body}")
}

/// `ToNumber` applied to a string.
pub fn string_to_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix)
                    .map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    let well_formed = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && text.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// `ToInt32` on an already-converted number.
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let m = n.trunc().rem_euclid(TWO_32);
    if m >= TWO_31 {
        (m - TWO_32) as i32
    } else {
        m as i32
    }
}

/// `ToUint32` on an already-converted number.
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(TWO_32) as u32
}

/// Canonical array index for a property key: `"0"`, `"17"`, but not
/// `"01"`, `"-1"` or `"1.5"`.
pub fn array_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    match bytes {
        [b'0'] => Some(0),
        [b'1'..=b'9', rest @ ..] if rest.iter().all(u8::is_ascii_digit) => {
            let index: u32 = key.parse().ok()?;
            (index < u32::MAX).then_some(index as usize)
        }
        _ => None,
    }
}
