use ember_ir::{ForInit, StmtKind, StringInterner, VarKind};
use pretty_assertions::assert_eq;

use super::{parse_ok, render_stmt, stmt};

#[test]
fn variable_declarations() {
    let interner = StringInterner::new();
    let program = parse_ok("var a = 1, b; let c; const d = 2;", &interner);
    assert_eq!(program.body.len(), 3);

    let StmtKind::VarDecl { kind, declarators } = &stmt(&program, 0).kind else {
        panic!("expected var");
    };
    assert_eq!(*kind, VarKind::Var);
    assert_eq!(declarators.len(), 2);
    assert!(declarators[0].init.is_some());
    assert!(declarators[1].init.is_none());

    assert!(matches!(
        stmt(&program, 2).kind,
        StmtKind::VarDecl {
            kind: VarKind::Const,
            ..
        }
    ));
}

#[test]
fn semicolons_are_inserted_at_line_breaks() {
    let interner = StringInterner::new();
    let program = parse_ok("let a = 1\nlet b = 2\na = b\n", &interner);
    assert_eq!(program.body.len(), 3);
}

#[test]
fn return_argument_stops_at_line_break() {
    let interner = StringInterner::new();
    let program = parse_ok("function f() {\n  return\n  1\n}", &interner);
    let StmtKind::FunctionDecl(id) = stmt(&program, 0).kind else {
        panic!("expected function declaration");
    };
    let ember_ir::FunctionBody::Block(body) = &program.arena.get_function(id).body else {
        panic!("expected block body");
    };
    assert_eq!(body.len(), 2);
    assert_eq!(
        program.arena.get_stmt(body[0]).kind,
        StmtKind::Return(None)
    );
}

#[test]
fn postfix_update_does_not_cross_line_break() {
    let interner = StringInterner::new();
    let program = parse_ok("a\n++b", &interner);
    assert_eq!(program.body.len(), 2);
    assert_eq!(render_stmt(&program, 1, &interner), "(++b)");
}

#[test]
fn if_else_chain() {
    let interner = StringInterner::new();
    let program = parse_ok("if (a) b; else if (c) d; else e;", &interner);
    let StmtKind::If { alternate, .. } = stmt(&program, 0).kind else {
        panic!("expected if");
    };
    let nested = program.arena.get_stmt(alternate.unwrap_or_else(|| panic!("missing else")));
    assert!(matches!(
        nested.kind,
        StmtKind::If {
            alternate: Some(_),
            ..
        }
    ));
}

#[test]
fn loops() {
    let interner = StringInterner::new();
    let program = parse_ok(
        "while (i < 3) i++; do { i-- } while (i > 0) for (;;) break;",
        &interner,
    );
    assert!(matches!(stmt(&program, 0).kind, StmtKind::While { .. }));
    assert!(matches!(stmt(&program, 1).kind, StmtKind::DoWhile { .. }));
    assert!(matches!(
        stmt(&program, 2).kind,
        StmtKind::For {
            init: None,
            test: None,
            update: None,
            ..
        }
    ));
}

#[test]
fn for_with_declaration_head() {
    let interner = StringInterner::new();
    let program = parse_ok("for (let i = 0; i < 5; i++) {}", &interner);
    let StmtKind::For { init, test, update, .. } = &stmt(&program, 0).kind else {
        panic!("expected for");
    };
    assert!(matches!(init, Some(ForInit::Decl(_))));
    assert!(test.is_some());
    assert!(update.is_some());
}

#[test]
fn for_in_and_for_of_heads() {
    let interner = StringInterner::new();
    let program = parse_ok("for (var k in o) {} for (x of xs) {}", &interner);
    assert!(matches!(
        stmt(&program, 0).kind,
        StmtKind::ForIn {
            left: ForInit::Decl(_),
            ..
        }
    ));
    assert!(matches!(
        stmt(&program, 1).kind,
        StmtKind::ForOf {
            left: ForInit::Expr(_),
            ..
        }
    ));
}

#[test]
fn in_inside_for_head_parentheses_is_binary() {
    let interner = StringInterner::new();
    let program = parse_ok("for (var x = ('a' in o); x; ) {}", &interner);
    assert!(matches!(stmt(&program, 0).kind, StmtKind::For { .. }));
}

#[test]
fn labels_break_and_continue() {
    let interner = StringInterner::new();
    let program = parse_ok(
        "outer: for (;;) { inner: while (1) { continue outer; break inner; break } }",
        &interner,
    );
    let StmtKind::Labeled { label, body } = stmt(&program, 0).kind else {
        panic!("expected labeled statement");
    };
    assert_eq!(label, interner.intern("outer"));
    assert!(matches!(
        program.arena.get_stmt(body).kind,
        StmtKind::For { .. }
    ));
}

#[test]
fn break_label_requires_same_line() {
    let interner = StringInterner::new();
    let program = parse_ok("while (1) { break\nfoo }", &interner);
    let StmtKind::While { body, .. } = stmt(&program, 0).kind else {
        panic!("expected while");
    };
    let StmtKind::Block(items) = &program.arena.get_stmt(body).kind else {
        panic!("expected block");
    };
    assert_eq!(program.arena.get_stmt(items[0]).kind, StmtKind::Break(None));
    assert_eq!(items.len(), 2);
}

#[test]
fn switch_cases() {
    let interner = StringInterner::new();
    let program = parse_ok(
        "switch (x) { default: a; case 1: case 2: b; break; case 3: { c } }",
        &interner,
    );
    let StmtKind::Switch { cases, .. } = &stmt(&program, 0).kind else {
        panic!("expected switch");
    };
    assert_eq!(cases.len(), 4);
    assert!(cases[0].test.is_none());
    assert!(cases[1].body.is_empty());
    assert_eq!(cases[2].body.len(), 2);
    assert_eq!(cases[3].body.len(), 1);
}

#[test]
fn try_forms() {
    let interner = StringInterner::new();
    let program = parse_ok(
        "try { a } catch (e) { b } try { a } finally { c } try { a } catch { b } finally { c }",
        &interner,
    );
    let StmtKind::Try { handler, finalizer, .. } = &stmt(&program, 0).kind else {
        panic!("expected try");
    };
    assert_eq!(
        handler.as_ref().and_then(|h| h.param),
        Some(interner.intern("e"))
    );
    assert!(finalizer.is_none());

    let StmtKind::Try { handler, finalizer, .. } = &stmt(&program, 1).kind else {
        panic!("expected try");
    };
    assert!(handler.is_none());
    assert!(finalizer.is_some());

    let StmtKind::Try { handler, .. } = &stmt(&program, 2).kind else {
        panic!("expected try");
    };
    assert!(handler.as_ref().is_some_and(|h| h.param.is_none()));
}

#[test]
fn empty_and_debugger_statements_parse() {
    let interner = StringInterner::new();
    let program = parse_ok(";\ndebugger;\nif (a) ;", &interner);
    assert_eq!(stmt(&program, 0).kind, StmtKind::Empty);
    assert_eq!(stmt(&program, 1).kind, StmtKind::Debugger);
}

#[test]
fn function_declaration_params() {
    let interner = StringInterner::new();
    let program = parse_ok("function add(a, b) { return a + b }", &interner);
    let StmtKind::FunctionDecl(id) = stmt(&program, 0).kind else {
        panic!("expected function declaration");
    };
    let function = program.arena.get_function(id);
    assert_eq!(function.name, Some(interner.intern("add")));
    assert_eq!(
        function.params,
        vec![interner.intern("a"), interner.intern("b")]
    );
}
