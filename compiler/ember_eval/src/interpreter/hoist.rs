//! Declaration hoisting.
//!
//! On entry to a program or function body every `var` name declared
//! anywhere in it (outside nested functions) is bound to `undefined` in the
//! function scope, and function declarations are bound before the first
//! statement runs. Blocks and switch bodies hoist their own function
//! declarations into the block scope.
//!
//! A declaration behind labels (`l: function f() {}`) counts as written
//! directly in the list. One written as the whole branch of an `if` gets a
//! hoisted `var` and is bound when the branch runs.

use ember_ir::{ExprArena, ForInit, FunctionId, Name, StmtId, StmtKind, VarKind};

use super::Interpreter;
use crate::environment::{DeclKind, LocalScope, Scope, ScopeKind};
use crate::errors::{redeclaration, EvalError};
use crate::value::Value;

impl Interpreter<'_> {
    /// Hoist `var` names and function declarations of a program or
    /// function body.
    pub(super) fn hoist_declarations(
        &mut self,
        body: &[StmtId],
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        let mut names = Vec::new();
        collect_var_names(&self.arena, body, &mut names);

        let target = scope.function_scope();
        for (name, stmt) in names {
            if target.has_own(name) {
                continue;
            }
            target
                .declare(DeclKind::Var, name, Value::Undefined)
                .map_err(|_| redeclaration(self.name_str(name)).with_span(self.arena.stmt_span(stmt)))?;
        }
        self.hoist_functions(body, scope)
    }

    /// Bind the function declarations appearing directly in `stmts`.
    ///
    /// In a function scope they are `var`-like; in a block they stay local
    /// to the block.
    pub(super) fn hoist_functions(
        &mut self,
        stmts: &[StmtId],
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        let kind = match scope.borrow().kind() {
            ScopeKind::Function => DeclKind::Var,
            ScopeKind::Block => DeclKind::Let,
        };
        for &id in stmts {
            if let Some(func) = declared_function(&self.arena, id) {
                self.bind_function(func, id, kind, scope)?;
            }
        }
        Ok(())
    }

    /// Create the closure for a function declaration and bind its name.
    pub(super) fn bind_function(
        &mut self,
        func: FunctionId,
        stmt: StmtId,
        kind: DeclKind,
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        let Some(name) = self.arena.get_function(func).name else {
            return Ok(());
        };
        let closure = self.make_function(func, scope, None);
        scope
            .declare(kind, name, closure)
            .map_err(|_| redeclaration(self.name_str(name)).with_span(self.arena.stmt_span(stmt)))
    }
}

/// The function a statement declares, looking through any labels in front
/// of it.
pub(super) fn declared_function(arena: &ExprArena, mut id: StmtId) -> Option<FunctionId> {
    loop {
        match &arena.get_stmt(id).kind {
            StmtKind::FunctionDecl(func) => return Some(*func),
            StmtKind::Labeled { body, .. } => id = *body,
            _ => return None,
        }
    }
}

/// `var` declarators reachable from `stmts` without entering a nested
/// function, with the statement declaring each.
fn collect_var_names(arena: &ExprArena, stmts: &[StmtId], out: &mut Vec<(Name, StmtId)>) {
    for &id in stmts {
        collect_in_stmt(arena, id, out);
    }
}

fn collect_in_stmt(arena: &ExprArena, id: StmtId, out: &mut Vec<(Name, StmtId)>) {
    match &arena.get_stmt(id).kind {
        StmtKind::VarDecl {
            kind: VarKind::Var,
            declarators,
        } => out.extend(declarators.iter().map(|d| (d.name, id))),
        StmtKind::If {
            consequent,
            alternate,
            ..
        } => {
            for &branch in std::iter::once(consequent).chain(alternate) {
                if let Some(func) = declared_function(arena, branch) {
                    out.extend(arena.get_function(func).name.map(|name| (name, branch)));
                }
                collect_in_stmt(arena, branch, out);
            }
        }
        StmtKind::Block(body) => collect_var_names(arena, body, out),
        StmtKind::While { body, .. }
        | StmtKind::DoWhile { body, .. }
        | StmtKind::Labeled { body, .. } => collect_in_stmt(arena, *body, out),
        StmtKind::For { init, body, .. } => {
            if let Some(ForInit::Decl(decl)) = init {
                collect_in_stmt(arena, *decl, out);
            }
            collect_in_stmt(arena, *body, out);
        }
        StmtKind::ForIn { left, body, .. } | StmtKind::ForOf { left, body, .. } => {
            if let ForInit::Decl(decl) = left {
                collect_in_stmt(arena, *decl, out);
            }
            collect_in_stmt(arena, *body, out);
        }
        StmtKind::Switch { cases, .. } => {
            for case in cases {
                collect_var_names(arena, &case.body, out);
            }
        }
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            collect_var_names(arena, block, out);
            if let Some(handler) = handler {
                collect_var_names(arena, &handler.body, out);
            }
            if let Some(finalizer) = finalizer {
                collect_var_names(arena, finalizer, out);
            }
        }
        StmtKind::VarDecl { .. }
        | StmtKind::Expr(_)
        | StmtKind::FunctionDecl(_)
        | StmtKind::Return(_)
        | StmtKind::Break(_)
        | StmtKind::Continue(_)
        | StmtKind::Throw(_)
        | StmtKind::Empty
        | StmtKind::Debugger => {}
    }
}
