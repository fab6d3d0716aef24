//! Object and array literals, property access, and console output.

use pretty_assertions::assert_eq;

use super::{run_err, run_ok, run_output};
use crate::errors::EvalErrorKind;
use crate::value::{inspect, Value};

#[test]
fn object_literal_keys() {
    let source = "
        var o = { a: 1, 'b c': 2, 3: 'x', ['d' + 1]: 4 };
        o['b c'] + o[3] + o.d1
    ";
    assert_eq!(run_ok(source), Value::from("2x4"));
    assert_eq!(
        inspect(&run_ok("({ z: 1, a: 2, 1.5: 3 })")),
        "{ z: 1, a: 2, '1.5': 3 }"
    );
}

#[test]
fn literals_evaluate_left_to_right() {
    let source = "
        var log = '';
        function t(v) { log += v; return v; }
        var arr = [t('a'), t('b')];
        var obj = { x: t('c'), y: t('d') };
        log
    ";
    assert_eq!(run_ok(source), Value::from("abcd"));
}

#[test]
fn array_index_writes_grow_the_array() {
    assert_eq!(
        run_ok("var a = [1, 2]; a[4] = 5; a.length + ':' + a"),
        Value::from("5:1,2,,,5")
    );
    assert_eq!(run_ok("var a = [1, 2, 3]; a.length = 1; a + ''"), Value::from("1"));
    assert_eq!(run_ok("var a = []; a['2'] = 'x'; a.length"), Value::Number(3.0));
}

#[test]
fn out_of_range_reads_are_undefined() {
    assert_eq!(run_ok("[1][5]"), Value::Undefined);
    assert_eq!(run_ok("({}).missing"), Value::Undefined);
    assert_eq!(run_ok("(5).x"), Value::Undefined);
}

#[test]
fn string_and_function_properties() {
    assert_eq!(run_ok("'hey'[1] + 'hey'.length"), Value::from("e3"));
    assert_eq!(
        run_ok("function f(a, b, c) {} f.name + f.length"),
        Value::from("f3")
    );
    assert_eq!(run_ok("var s = 'abc'; s[0] = 'z'; s"), Value::from("abc"));
}

#[test]
fn delete_removes_properties() {
    assert_eq!(
        run_ok("var o = { a: 1, b: 2 }; delete o.a; ('a' in o) + ',' + o.b"),
        Value::from("false,2")
    );
    assert_eq!(
        run_ok("var a = [1, 2]; delete a[0]; a.length + ':' + a[0]"),
        Value::from("2:undefined")
    );
    assert_eq!(run_ok("var x = 1; delete x"), Value::Bool(true));
}

#[test]
fn objects_are_shared_by_reference() {
    assert_eq!(run_ok("var a = {}; var b = a; b.x = 1; a.x"), Value::Number(1.0));
    assert_eq!(run_ok("[] === []"), Value::Bool(false));
    assert_eq!(
        run_ok("function push(arr, v) { arr[arr.length] = v; } var l = []; push(l, 1); push(l, 2); l + ''"),
        Value::from("1,2")
    );
}

#[test]
fn property_access_on_nullish_base() {
    let err = run_err("var u; u.x");
    assert!(matches!(
        err.kind,
        EvalErrorKind::NullishProperty { base: "undefined", .. }
    ));
    let err = run_err("null['k'] = 1");
    assert_eq!(
        err.to_string(),
        "TypeError: Cannot set properties of null (setting 'k')"
    );
}

#[test]
fn methods_in_object_literals() {
    let source = "
        var counter = {
            n: 0,
            inc(by) { counter.n += by; return counter.n; },
        };
        counter.inc(2);
        counter.inc(3)
    ";
    assert_eq!(run_ok(source), Value::Number(5.0));
}

#[test]
fn console_log_prints_formatted_lines() {
    let output = run_output("console.log('hi', 1, [1, 2], { a: 'b' }); console.log();");
    assert_eq!(output, "hi 1 [ 1, 2 ] { a: 'b' }\n\n");

    let output = run_output(
        "function named() {} console.log(named, () => 1, null, undefined, -0, [[[[1]]]]);",
    );
    assert_eq!(
        output,
        "[Function: named] [Function (anonymous)] null undefined -0 [ [ [ [Array] ] ] ]\n"
    );
}

#[test]
fn console_can_be_shadowed() {
    let output = run_output("var console = { log: function () {} }; console.log('hidden');");
    assert_eq!(output, "");
}

#[test]
fn deeply_nested_arrays_convert_to_strings() {
    let source = "
        var a = [];
        for (var i = 0; i < 100000; i++) { a = [a]; }
        var o = {};
        o[a] = 1;
        '' + a + (a == '') + (a < 1) + o['']
    ";
    assert_eq!(run_ok(source), Value::from("truetrue1"));
}

#[test]
fn releasing_a_long_linked_list() {
    let source = "
        var l = null;
        for (var i = 0; i < 200000; i++) { l = { next: l }; }
        l = null;
        1
    ";
    assert_eq!(run_ok(source), Value::Number(1.0));
}
