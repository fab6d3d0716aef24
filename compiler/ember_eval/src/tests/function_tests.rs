//! Closures, calls, parameters, and hoisting.

use pretty_assertions::assert_eq;

use super::{run_err, run_ok, run_with};
use crate::errors::EvalErrorKind;
use crate::value::Value;

#[test]
fn closure_counter_counts_up() {
    let source = "
        function makeCounter() {
            var n = 0;
            return function () { n += 1; return n; };
        }
        var c = makeCounter();
        var a = c(); var b = c(); var d = c();
        a * 100 + b * 10 + d
    ";
    assert_eq!(run_ok(source), Value::Number(123.0));
}

#[test]
fn counters_do_not_share_state() {
    let source = "
        function makeCounter() {
            var n = 0;
            return () => ++n;
        }
        var c1 = makeCounter(), c2 = makeCounter();
        c1(); c1();
        c1() * 10 + c2()
    ";
    assert_eq!(run_ok(source), Value::Number(31.0));
}

#[test]
fn try_catch_return_in_function() {
    let source = "function f() { try { throw 1 } catch (e) { return e + 1 } } f()";
    assert_eq!(run_ok(source), Value::Number(2.0));
}

#[test]
fn function_without_return_yields_undefined() {
    assert_eq!(run_ok("function f() { 1 + 1; } f()"), Value::Undefined);
    assert_eq!(run_ok("function g() { return; } g()"), Value::Undefined);
    assert_eq!(run_ok("function h() { while (true) break; } h()"), Value::Undefined);
}

#[test]
fn arrow_expression_body_is_returned() {
    assert_eq!(run_ok("(x => x * 2)(4)"), Value::Number(8.0));
    assert_eq!(run_ok("((a, b) => { a + b; })(1, 2)"), Value::Undefined);
}

#[test]
fn missing_arguments_are_undefined_and_extras_ignored() {
    assert_eq!(
        run_ok("function f(a, b) { return typeof b; } f(1)"),
        Value::from("undefined")
    );
    assert_eq!(run_ok("function f(a) { return a; } f(1, 2, 3)"), Value::Number(1.0));
}

#[test]
fn recursion() {
    let source = "function fact(n) { return n <= 1 ? 1 : n * fact(n - 1); } fact(10)";
    assert_eq!(run_ok(source), Value::Number(3_628_800.0));
}

#[test]
fn function_declarations_are_hoisted() {
    let source = "var r = f(); function f() { return 'hoisted'; } r";
    assert_eq!(run_ok(source), Value::from("hoisted"));
}

#[test]
fn var_declarations_are_hoisted_as_undefined() {
    assert_eq!(
        run_ok("var before = typeof v; var v = 1; before"),
        Value::from("undefined")
    );
    assert_eq!(run_ok("var seen = v2; var v2 = 5; seen"), Value::Undefined);
    assert_eq!(
        run_ok("function f() { if (true) { var inner = 1; } return inner; } f()"),
        Value::Number(1.0)
    );
}

#[test]
fn hoisted_var_shadows_outer_binding_from_function_start() {
    let source = "
        var x = 'outer';
        function f() { var first = x; var x = 'inner'; return first; }
        f()
    ";
    assert_eq!(run_ok(source), Value::Undefined);
}

#[test]
fn var_redeclaring_a_parameter_keeps_its_value() {
    assert_eq!(run_ok("function f(a) { var a; return a; } f(7)"), Value::Number(7.0));
    assert_eq!(run_ok("function f(a) { var a = 2; return a; } f(7)"), Value::Number(2.0));
}

#[test]
fn block_function_declarations_stay_in_the_block() {
    let source = "
        var before = typeof inner;
        { function inner() { return 1; } }
        before + typeof inner
    ";
    assert_eq!(run_ok(source), Value::from("undefinedundefined"));
}

#[test]
fn anonymous_functions_take_the_binding_name() {
    assert_eq!(
        run_ok("var add = function (a, b) { return a + b; }; add.name + add.length"),
        Value::from("add2")
    );
    assert_eq!(run_ok("var o = { m: () => 1 }; o.m.name"), Value::from("m"));
    assert_eq!(run_ok("var f; f = x => x; f.name"), Value::from("f"));
    assert_eq!(
        run_ok("var g = function named() {}; g.name"),
        Value::from("named")
    );
}

#[test]
fn closures_see_later_writes() {
    assert_eq!(
        run_ok("var x = 1; function get() { return x; } x = 2; get()"),
        Value::Number(2.0)
    );
}

#[test]
fn inner_functions_can_recurse_through_their_binding() {
    let source = "
        function outer() {
            function fib(n) { return n < 2 ? n : fib(n - 1) + fib(n - 2); }
            return fib(15);
        }
        outer()
    ";
    assert_eq!(run_ok(source), Value::Number(610.0));
}

#[test]
fn recursion_limit_is_fatal() {
    let source = "
        function r() { return r(); }
        try { r(); } catch (e) { 'caught' }
    ";
    let (result, _) = run_with(source, |builder| builder.max_call_depth(Some(50)));
    let Err(err) = result else {
        panic!("runaway recursion completed");
    };
    assert!(matches!(err.kind, EvalErrorKind::StackOverflow { limit: 50 }));
    assert!(!err.is_catchable());
}

#[test]
fn calling_a_non_function() {
    let err = run_err("var o = {}; o.foo()");
    assert!(matches!(err.kind, EvalErrorKind::NotCallable { ref callee } if callee == "o.foo"));
    assert_eq!(err.to_string(), "TypeError: o.foo is not a function");

    let err = run_err("var n = 1; n()");
    assert_eq!(err.to_string(), "TypeError: n is not a function");
}

#[test]
fn arguments_are_evaluated_before_the_callability_check() {
    let source = "
        var log = '';
        var nf = 1;
        try { nf((log += 'a'), (log += 'b')); } catch (e) { log += '!'; }
        log
    ";
    assert_eq!(run_ok(source), Value::from("ab!"));
}

#[test]
fn live_closures_survive_scope_collection() {
    let source = "
        function counter() { var n = 0; return function () { n += 1; return n; }; }
        var c = counter();
        function noise() { function inner() {} return inner; }
        for (var i = 0; i < 3000; i++) { noise(); }
        c();
        c()
    ";
    assert_eq!(run_ok(source), Value::Number(2.0));
}

#[test]
fn running_calls_keep_their_scopes_during_collection() {
    let source = "
        function outer() {
            var keep = { v: 1 };
            function read() { return keep.v; }
            for (var i = 0; i < 3000; i++) {
                (function () { function g() {} return g; })();
            }
            return read() + keep.v;
        }
        outer()
    ";
    assert_eq!(run_ok(source), Value::Number(2.0));
}

#[test]
fn function_declaration_as_if_branch_binds_when_taken() {
    assert_eq!(
        run_ok("if (true) function f() { return 1; } f()"),
        Value::Number(1.0)
    );
    assert_eq!(
        run_ok("if (false) x(); else function k() { return 3; } k()"),
        Value::Number(3.0)
    );
    // The name is hoisted as a `var` whether or not the branch runs.
    assert_eq!(
        run_ok("var before = typeof g; if (false) function g() {} before + ' ' + g"),
        Value::from("undefined undefined")
    );
    assert_eq!(
        run_ok("function outer() { { if (1) function inner() { return 4; } } return inner(); } outer()"),
        Value::Number(4.0)
    );
}

#[test]
fn labeled_function_declarations_are_hoisted() {
    assert_eq!(
        run_ok("var r = h(); l: function h() { return 2; } r"),
        Value::Number(2.0)
    );
    assert_eq!(
        run_ok("function f() { a: b: function g() { return 5; } return g(); } f()"),
        Value::Number(5.0)
    );
}
