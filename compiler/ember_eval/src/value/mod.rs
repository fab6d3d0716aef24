//! Runtime values.
//!
//! Primitives (`undefined`, `null`, booleans, numbers, strings) are
//! immutable and copied by value. Objects, arrays and functions are
//! reference values: every holder shares one allocation, mutation is
//! visible through all of them, and equality is identity.
//!
//! Conversions between kinds (`ToNumber`, `ToString`, `ToInt32`, loose
//! equality) live in `convert`; console-style formatting in `display`.

mod convert;
mod display;
mod function;
mod heap;

#[cfg(test)]
mod tests;

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

pub use convert::{array_index, number_to_string, string_to_number, to_int32, to_uint32};
pub use display::{format_log_line, inspect};
pub use function::{FunctionKind, FunctionValue, NativeFn};
pub use heap::{Heap, HeapContents};

/// Object contents: string keys in insertion order.
pub type ObjectMap = IndexMap<String, Value>;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Object(Heap<ObjectMap>),
    Array(Heap<Vec<Value>>),
    Function(Rc<FunctionValue>),
}

impl Value {
    #[inline]
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    #[inline]
    pub fn object(map: ObjectMap) -> Self {
        Value::Object(Heap::new(map))
    }

    #[inline]
    pub fn empty_object() -> Self {
        Value::object(ObjectMap::default())
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(Rc::new(func))
    }

    /// Truthiness as used by `if`, loops, `!`, `&&` and `||`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::Str(s) => !s.is_empty(),
            Value::Object(_) | Value::Array(_) | Value::Function(_) => true,
        }
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// `true` for objects, arrays and functions.
    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Value::Object(_) | Value::Array(_) | Value::Function(_)
        )
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Result of the `typeof` operator.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) | Value::Array(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
        }
    }

    /// Kind name used in diagnostics. Unlike `type_of`, distinguishes
    /// `null` and arrays.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Array(_) => "array",
            other => other.type_of(),
        }
    }

    /// `SameValueZero`: like `===`, except `NaN` equals itself.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }
}

/// Equality is `SameValueZero`, so test assertions on `NaN` results work.
/// Use `strict_equals` / `loose_equals` for the language operators.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value_zero(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self))
    }
}

/// `ToString`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
