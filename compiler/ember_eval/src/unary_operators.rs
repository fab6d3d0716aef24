//! Unary operator semantics.
//!
//! `typeof` on an unresolved identifier and `delete` on a member target
//! need the operand's syntax, so the interpreter handles those cases before
//! calling in here; this module only sees evaluated operands.

use ember_ir::UnaryOp;

use crate::value::{to_int32, Value};

/// Evaluate a unary operator on an already-evaluated operand.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Value {
    match op {
        UnaryOp::Neg => Value::Number(-operand.to_number()),
        UnaryOp::Plus => Value::Number(operand.to_number()),
        UnaryOp::Not => Value::Bool(!operand.is_truthy()),
        UnaryOp::BitNot => Value::Number(f64::from(!to_int32(operand.to_number()))),
        UnaryOp::Typeof => Value::from(operand.type_of()),
        UnaryOp::Void => Value::Undefined,
        // Deleting something that is not a property reference succeeds
        // without effect.
        UnaryOp::Delete => Value::Bool(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_and_plus_convert() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::from("3")), Value::Number(-3.0));
        assert_eq!(evaluate_unary(UnaryOp::Plus, &Value::Bool(true)), Value::Number(1.0));
        assert_eq!(evaluate_unary(UnaryOp::Plus, &Value::from("")), Value::Number(0.0));
        assert_eq!(
            evaluate_unary(UnaryOp::Plus, &Value::from(" 0x1F ")),
            Value::Number(31.0)
        );
        assert_eq!(
            evaluate_unary(UnaryOp::Plus, &Value::Undefined),
            Value::Number(f64::NAN)
        );
    }

    #[test]
    fn not_uses_truthiness() {
        for falsy in [
            Value::Undefined,
            Value::Null,
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(f64::NAN),
            Value::from(""),
        ] {
            assert_eq!(evaluate_unary(UnaryOp::Not, &falsy), Value::Bool(true));
        }
        assert_eq!(evaluate_unary(UnaryOp::Not, &Value::from("0")), Value::Bool(false));
        assert_eq!(
            evaluate_unary(UnaryOp::Not, &Value::array(Vec::new())),
            Value::Bool(false)
        );
    }

    #[test]
    fn bit_not() {
        assert_eq!(evaluate_unary(UnaryOp::BitNot, &Value::Number(5.0)), Value::Number(-6.0));
        assert_eq!(evaluate_unary(UnaryOp::BitNot, &Value::Number(-1.0)), Value::Number(0.0));
        assert_eq!(
            evaluate_unary(UnaryOp::BitNot, &Value::Undefined),
            Value::Number(-1.0)
        );
    }

    #[test]
    fn typeof_names() {
        let cases = [
            (Value::Undefined, "undefined"),
            (Value::Null, "object"),
            (Value::Bool(true), "boolean"),
            (Value::Number(1.0), "number"),
            (Value::from("s"), "string"),
            (Value::empty_object(), "object"),
            (Value::array(Vec::new()), "object"),
        ];
        for (value, expected) in cases {
            assert_eq!(evaluate_unary(UnaryOp::Typeof, &value), Value::from(expected));
        }
    }

    #[test]
    fn void_discards() {
        assert_eq!(evaluate_unary(UnaryOp::Void, &Value::Number(1.0)), Value::Undefined);
    }
}
