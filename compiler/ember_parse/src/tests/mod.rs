//! Parser tests.
//!
//! - `expressions`: precedence, associativity, literals, arrows
//! - `statements`: declarations, control flow, semicolon insertion
//! - `errors`: diagnostics and recovery

mod errors;
mod statements;

use ember_ir::{Expr, ExprKind, Program, Stmt, StmtKind, StringInterner};

use crate::parse;

/// Parse `source`, asserting it is error-free.
pub(super) fn parse_ok(source: &str, interner: &StringInterner) -> Program {
    let output = parse(source, interner);
    assert!(
        output.errors.is_empty(),
        "unexpected errors for {source:?}: {:?}",
        output.errors
    );
    output.program
}

pub(super) fn stmt(program: &Program, index: usize) -> &Stmt {
    program.arena.get_stmt(program.body[index])
}

/// Expression of the `index`-th top-level expression statement.
pub(super) fn expr_stmt(program: &Program, index: usize) -> &Expr {
    match stmt(program, index).kind {
        StmtKind::Expr(id) => program.arena.get_expr(id),
        ref other => panic!("expected expression statement, got {other:?}"),
    }
}

/// Fully parenthesised rendering of an expression, for shape assertions.
pub(super) fn render(program: &Program, expr: &Expr, interner: &StringInterner) -> String {
    let arena = &program.arena;
    let sub = |id| render(program, arena.get_expr(id), interner);
    match &expr.kind {
        ExprKind::Number(n) => format!("{n}"),
        ExprKind::String(s) => format!("{s:?}"),
        ExprKind::Bool(b) => format!("{b}"),
        ExprKind::Null => "null".to_string(),
        ExprKind::Ident(name) => interner.lookup(*name).to_string(),
        ExprKind::This => "this".to_string(),
        ExprKind::Array(items) => {
            let items: Vec<String> = items.iter().map(|id| sub(*id)).collect();
            format!("[{}]", items.join(", "))
        }
        ExprKind::Object(props) => format!("{{{} props}}", props.len()),
        ExprKind::Function(id) => {
            let function = arena.get_function(*id);
            if function.is_arrow {
                format!("(arrow/{})", function.params.len())
            } else {
                format!("(function/{})", function.params.len())
            }
        }
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), sub(*operand)),
        ExprKind::Update { op, prefix, target } => {
            if *prefix {
                format!("({}{})", op.as_symbol(), sub(*target))
            } else {
                format!("({}{})", sub(*target), op.as_symbol())
            }
        }
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", sub(*left), op.as_symbol(), sub(*right))
        }
        ExprKind::Logical { op, left, right } => {
            format!("({} {} {})", sub(*left), op.as_symbol(), sub(*right))
        }
        ExprKind::Assign { op, target, value } => {
            format!("({} {} {})", sub(*target), op.as_symbol(), sub(*value))
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => format!("({} ? {} : {})", sub(*test), sub(*consequent), sub(*alternate)),
        ExprKind::Call { callee, args } => {
            let args: Vec<String> = args.iter().map(|id| sub(*id)).collect();
            format!("{}({})", sub(*callee), args.join(", "))
        }
        ExprKind::New { callee, args } => {
            let args: Vec<String> = args.iter().map(|id| sub(*id)).collect();
            format!("new {}({})", sub(*callee), args.join(", "))
        }
        ExprKind::Member { object, property } => match property {
            ember_ir::MemberProperty::Named(name) => {
                format!("{}.{}", sub(*object), interner.lookup(*name))
            }
            ember_ir::MemberProperty::Computed(key) => format!("{}[{}]", sub(*object), sub(*key)),
        },
        ExprKind::Sequence(items) => {
            let items: Vec<String> = items.iter().map(|id| sub(*id)).collect();
            format!("({})", items.join(", "))
        }
    }
}

/// Render the `index`-th top-level expression statement.
pub(super) fn render_stmt(program: &Program, index: usize, interner: &StringInterner) -> String {
    render(program, expr_stmt(program, index), interner)
}
