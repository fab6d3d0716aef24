//! Loops, labels, `switch`, and how control signals travel.

use pretty_assertions::assert_eq;

use super::run_ok;
use crate::value::Value;

#[test]
fn continue_in_for_skips_rest_of_body() {
    let source = "
        var count = 0;
        for (var i = 0; i < 5; i++) {
            if (i === 2) continue;
            count++;
        }
        count * 10 + i
    ";
    // Four counted executions, loop variable 5 on exit.
    assert_eq!(run_ok(source), Value::Number(45.0));
}

#[test]
fn labeled_break_leaves_both_loops() {
    let source = "
        var log = 0;
        outer: for (var i = 0; i < 3; i++) {
            for (var j = 0; j < 3; j++) {
                if (j === 1) break outer;
                log++;
            }
        }
        log * 100 + i * 10 + j
    ";
    assert_eq!(run_ok(source), Value::Number(101.0));
}

#[test]
fn labeled_continue_resumes_outer_loop() {
    let source = "
        var hits = 0;
        outer: for (var i = 0; i < 3; i++) {
            for (var j = 0; j < 3; j++) {
                if (j === 1) continue outer;
                hits++;
            }
        }
        hits * 10 + i
    ";
    assert_eq!(run_ok(source), Value::Number(33.0));
}

#[test]
fn stacked_labels_all_name_the_loop() {
    let source = "
        var n = 0;
        a: b: while (true) {
            n++;
            if (n < 3) continue a;
            break b;
        }
        n
    ";
    assert_eq!(run_ok(source), Value::Number(3.0));
}

#[test]
fn labeled_block_break() {
    let source = "
        var x = 1;
        block: {
            x = 2;
            break block;
            x = 3;
        }
        x
    ";
    assert_eq!(run_ok(source), Value::Number(2.0));
}

#[test]
fn while_and_do_while() {
    assert_eq!(run_ok("var n = 0; do { n++; } while (n < 0); n"), Value::Number(1.0));
    let source = "
        var s = 0, k = 0;
        while (k < 4) {
            k++;
            if (k % 2) continue;
            s += k;
        }
        s
    ";
    assert_eq!(run_ok(source), Value::Number(6.0));
    assert_eq!(run_ok("var n = 0; while (n++ < 3); n"), Value::Number(4.0));
}

#[test]
fn for_without_clauses_needs_break() {
    let source = "var i = 0; for (;;) { if (++i === 5) break; } i";
    assert_eq!(run_ok(source), Value::Number(5.0));
}

#[test]
fn switch_falls_through_until_break() {
    let source = "
        function f(x) {
            var out = '';
            switch (x) {
                case 1: out += 'a';
                case 2: out += 'b'; break;
                case 3: out += 'c';
            }
            return out;
        }
        f(1) + '|' + f(2) + '|' + f(3) + '|' + f(4)
    ";
    assert_eq!(run_ok(source), Value::from("ab|b|c|"));
}

#[test]
fn switch_default_written_first() {
    let source = "
        function g(x) {
            var out = '';
            switch (x) {
                default: out += 'd';
                case 1: out += '1'; break;
                case 2: out += '2';
            }
            return out;
        }
        g(1) + '|' + g(2) + '|' + g(9)
    ";
    assert_eq!(run_ok(source), Value::from("1|2|d1"));
}

#[test]
fn switch_matches_strictly() {
    let source = "
        var r = 'none';
        switch ('1') {
            case 1: r = 'number'; break;
            default: r = 'other';
        }
        r
    ";
    assert_eq!(run_ok(source), Value::from("other"));
}

#[test]
fn switch_evaluates_discriminant_once_and_tests_lazily() {
    let source = "
        var calls = 0, tested = '';
        function d() { calls++; return 2; }
        function c(v) { tested += v; return v; }
        switch (d()) {
            case c(1):
            case c(2):
            case c(3):
        }
        calls + tested
    ";
    assert_eq!(run_ok(source), Value::from("112"));
}

#[test]
fn continue_inside_switch_targets_the_loop() {
    let source = "
        var seen = '';
        for (var i = 0; i < 3; i++) {
            switch (i) {
                case 1: continue;
                default: seen += i;
            }
            seen += ';';
        }
        seen
    ";
    assert_eq!(run_ok(source), Value::from("0;2;"));
}

#[test]
fn for_let_bindings_are_shared_across_iterations() {
    let source = "
        var fns = [];
        for (let i = 0; i < 3; i++) {
            fns[i] = function () { return i; };
        }
        fns[0]() + fns[1]() + fns[2]()
    ";
    assert_eq!(run_ok(source), Value::Number(9.0));
}

#[test]
fn body_let_is_fresh_each_iteration() {
    let source = "
        var fns = [];
        for (var i = 0; i < 3; i++) {
            let j = i;
            fns[i] = function () { return j; };
        }
        fns[0]() * 100 + fns[1]() * 10 + fns[2]()
    ";
    assert_eq!(run_ok(source), Value::Number(12.0));
}

#[test]
fn stray_break_ends_program_with_undefined() {
    assert_eq!(run_ok("var a = 1; break; a = 2;"), Value::Undefined);
}

#[test]
fn top_level_return_yields_its_value() {
    assert_eq!(run_ok("1; return 7; 8;"), Value::Number(7.0));
}

#[test]
fn program_value_is_last_statement() {
    assert_eq!(run_ok("1; 2; 'three'"), Value::from("three"));
    assert_eq!(run_ok("1; var x = 2;"), Value::Undefined);
    assert_eq!(run_ok(""), Value::Undefined);
    assert_eq!(run_ok("if (false) 1;"), Value::Undefined);
}
