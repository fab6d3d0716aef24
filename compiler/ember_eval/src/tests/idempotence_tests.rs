//! Property tests: pure programs give the same answer every time, and
//! arithmetic agrees with IEEE-754.

use proptest::prelude::*;

use super::run_ok;
use crate::value::Value;

const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "<", "<=", "==", "===", "!=", "&", "|", "^", "<<", ">>", ">>>",
];

proptest! {
    #[test]
    fn pure_expressions_are_idempotent(
        a in -1000i32..1000,
        b in -1000i32..1000,
        op in prop::sample::select(OPERATORS),
    ) {
        let source = format!("var a = {a}; var b = {b}; a {op} b;");
        let first = run_ok(&source);
        let second = run_ok(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn closures_over_equal_bindings_agree(
        start in -50i32..50,
        steps in 0usize..20,
    ) {
        let source = format!(
            "function make(n) {{ return function () {{ n = n * 2 + 1; return n; }}; }}
             var f = make({start}); var r;
             for (var i = 0; i < {steps}; i++) {{ r = f(); }}
             r"
        );
        prop_assert_eq!(run_ok(&source), run_ok(&source));
    }

    #[test]
    fn arithmetic_matches_ieee(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
        let source = format!("var a = {a}; var b = {b}; [a + b, a - b, a * b, a / b, a % b]");
        let Value::Array(items) = run_ok(&source) else {
            return Err(TestCaseError::fail("expected an array"));
        };
        let expected = [a + b, a - b, a * b, a / b, a % b];
        let items = items.borrow();
        for (got, want) in items.iter().zip(expected) {
            prop_assert_eq!(got, &Value::Number(want));
        }
    }
}
