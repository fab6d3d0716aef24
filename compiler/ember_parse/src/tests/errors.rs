use ember_ir::StringInterner;
use ember_lexer::LexErrorKind;
use pretty_assertions::assert_eq;

use crate::{parse, ParseErrorKind};

fn error_kinds(source: &str) -> Vec<ParseErrorKind> {
    let interner = StringInterner::new();
    parse(source, &interner)
        .errors
        .into_iter()
        .map(|err| err.kind)
        .collect()
}

#[test]
fn invalid_assignment_target() {
    assert_eq!(
        error_kinds("1 = 2;"),
        vec![ParseErrorKind::InvalidAssignmentTarget]
    );
    assert_eq!(
        error_kinds("f()++;"),
        vec![ParseErrorKind::InvalidAssignmentTarget]
    );
}

#[test]
fn missing_semicolon_on_same_line() {
    assert_eq!(
        error_kinds("a b"),
        vec![ParseErrorKind::UnexpectedToken {
            expected: "';'",
            found: "identifier",
        }]
    );
}

#[test]
fn newline_after_throw() {
    assert_eq!(
        error_kinds("throw\n1"),
        vec![ParseErrorKind::NewlineAfterThrow]
    );
}

#[test]
fn try_needs_catch_or_finally() {
    assert_eq!(
        error_kinds("try { a }"),
        vec![ParseErrorKind::MissingCatchOrFinally]
    );
}

#[test]
fn duplicate_default() {
    assert_eq!(
        error_kinds("switch (x) { default: a; default: b }"),
        vec![ParseErrorKind::DuplicateDefault]
    );
}

#[test]
fn const_without_initializer() {
    assert_eq!(
        error_kinds("const a;"),
        vec![ParseErrorKind::MissingConstInitializer]
    );
}

#[test]
fn lexer_errors_are_reported_once() {
    assert_eq!(
        error_kinds("let a = #;"),
        vec![ParseErrorKind::Lex(LexErrorKind::UnexpectedCharacter('#'))]
    );
}

#[test]
fn recovery_continues_with_next_statement() {
    let interner = StringInterner::new();
    let output = parse("let = 1;\nlet ok = 2;\n", &interner);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.program.body.len(), 1);
}

#[test]
fn errors_inside_blocks_do_not_swallow_the_closing_brace() {
    let interner = StringInterner::new();
    let output = parse("function f() { a b }\nlet x = 1;", &interner);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.program.body.len(), 2);
}

#[test]
fn deep_nesting_does_not_overflow() {
    let interner = StringInterner::new();
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let output = parse(&source, &interner);
    assert!(output.errors.is_empty());
}
