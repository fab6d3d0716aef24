//! Statement execution.
//!
//! Every statement produces a `ControlAction`. Loops and labeled
//! statements receive the labels attached to them so that `break label` /
//! `continue label` can be matched against the right construct.

use ember_ir::{CatchClause, Declarator, ExprId, ForInit, StmtId, StmtKind, SwitchCase, VarKind};
use tracing::trace;

use super::hoist::declared_function;
use super::{ExecResult, Interpreter};
use crate::environment::{DeclKind, LocalScope, Scope, ScopeKind};
use crate::errors::{
    invalid_statement_form, redeclaration, unsupported_syntax, user_thrown, EvalError,
};
use crate::exec::control::{
    absorb_labeled_break, to_loop_action, ControlAction, LabelSet, LoopAction,
};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

impl Interpreter<'_> {
    /// Execute one statement.
    pub(super) fn eval_stmt(&mut self, id: StmtId, scope: &LocalScope<Scope>) -> ExecResult {
        self.eval_labeled_stmt(id, scope, &LabelSet::new())
    }

    /// Execute one statement carrying the labels written in front of it.
    fn eval_labeled_stmt(
        &mut self,
        id: StmtId,
        scope: &LocalScope<Scope>,
        labels: &LabelSet,
    ) -> ExecResult {
        ensure_sufficient_stack(|| self.exec(id, scope, labels))
            .map_err(|err| err.with_span(self.arena.stmt_span(id)))
    }

    /// Run a statement list in `scope`: the first non-normal action stops
    /// the list; otherwise the list yields its last statement's value.
    pub(super) fn eval_statement_list(
        &mut self,
        stmts: &[StmtId],
        scope: &LocalScope<Scope>,
    ) -> ExecResult {
        let arena = self.arena.clone();
        let mut last = Value::Undefined;
        for &id in stmts {
            if matches!(arena.get_stmt(id).kind, StmtKind::Empty) {
                return Err(
                    invalid_statement_form("Unexpected token ';'").with_span(arena.stmt_span(id))
                );
            }
            match self.eval_stmt(id, scope)? {
                ControlAction::Normal(value) => last = value,
                abrupt => return Ok(abrupt),
            }
        }
        Ok(ControlAction::Normal(last))
    }

    fn exec(&mut self, id: StmtId, scope: &LocalScope<Scope>, labels: &LabelSet) -> ExecResult {
        let arena = self.arena.clone();
        let stmt = arena.get_stmt(id);
        match &stmt.kind {
            StmtKind::Expr(expr) => Ok(ControlAction::Normal(self.eval_expr(*expr, scope)?)),
            StmtKind::VarDecl { kind, declarators } => {
                self.exec_var_decl(*kind, declarators, scope)
            }
            // Bound when the enclosing list was entered, or by
            // `exec_branch`.
            StmtKind::FunctionDecl(_) => Ok(ControlAction::normal()),
            StmtKind::Return(argument) => {
                let value = match argument {
                    Some(expr) => self.eval_expr(*expr, scope)?,
                    None => Value::Undefined,
                };
                Ok(ControlAction::Return(value))
            }
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(*test, scope)?.is_truthy() {
                    self.exec_branch(*consequent, scope)
                } else if let Some(alternate) = alternate {
                    self.exec_branch(*alternate, scope)
                } else {
                    Ok(ControlAction::normal())
                }
            }
            StmtKind::Block(body) => self.exec_block(body, scope),
            StmtKind::While { test, body } => self.exec_while(*test, *body, scope, labels),
            StmtKind::DoWhile { body, test } => self.exec_do_while(*body, *test, scope, labels),
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => self.exec_for(init.as_ref(), *test, *update, *body, scope, labels),
            StmtKind::ForIn { .. } | StmtKind::ForOf { .. } => {
                Err(unsupported_syntax(stmt.kind.kind_name()))
            }
            StmtKind::Break(label) => Ok(ControlAction::Break(*label)),
            StmtKind::Continue(label) => Ok(ControlAction::Continue(*label)),
            StmtKind::Labeled { label, body } => {
                let mut inner = labels.clone();
                inner.push(*label);
                let action = self.eval_labeled_stmt(*body, scope, &inner)?;
                Ok(absorb_labeled_break(action, *label))
            }
            StmtKind::Switch {
                discriminant,
                cases,
            } => self.exec_switch(*discriminant, cases, scope),
            StmtKind::Throw(argument) => Err(user_thrown(self.eval_expr(*argument, scope)?)),
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => self.exec_try(block, handler.as_ref(), finalizer.as_deref(), scope),
            // Only reachable as the body of `if`, a loop, or a label.
            StmtKind::Empty => Ok(ControlAction::normal()),
            StmtKind::Debugger => Err(invalid_statement_form("Unexpected token 'debugger'")),
        }
    }

    fn exec_var_decl(
        &mut self,
        kind: VarKind,
        declarators: &[Declarator],
        scope: &LocalScope<Scope>,
    ) -> ExecResult {
        let decl_kind = match kind {
            VarKind::Var => DeclKind::Var,
            VarKind::Let => DeclKind::Let,
            VarKind::Const => DeclKind::Const,
        };
        for declarator in declarators {
            let name = self.name_str(declarator.name);
            let value = match declarator.init {
                Some(init) => self.eval_named(init, scope, Some(name))?,
                // `var x;` keeps whatever hoisting or an earlier write left.
                None if kind == VarKind::Var && scope.function_scope().has_own(declarator.name) => {
                    continue;
                }
                None => Value::Undefined,
            };
            scope
                .declare(decl_kind, declarator.name, value)
                .map_err(|_| redeclaration(name).with_span(declarator.span))?;
        }
        Ok(ControlAction::normal())
    }

    /// Run one branch of an `if`. A function declaration standing alone as
    /// the branch binds its name in the function scope once taken.
    fn exec_branch(&mut self, id: StmtId, scope: &LocalScope<Scope>) -> ExecResult {
        match declared_function(&self.arena, id) {
            Some(func) => {
                self.bind_function(func, id, DeclKind::Var, scope)?;
                Ok(ControlAction::normal())
            }
            None => self.eval_stmt(id, scope),
        }
    }

    /// Run `stmts` in a fresh block scope.
    pub(super) fn exec_block(&mut self, stmts: &[StmtId], scope: &LocalScope<Scope>) -> ExecResult {
        let block = Scope::child(scope, ScopeKind::Block);
        self.hoist_functions(stmts, &block)?;
        self.eval_statement_list(stmts, &block)
    }

    /// One loop iteration: the body runs in its own scope nested in the
    /// loop scope.
    fn exec_iteration(&mut self, body: StmtId, loop_scope: &LocalScope<Scope>) -> ExecResult {
        let iteration = Scope::child(loop_scope, ScopeKind::Block);
        self.eval_stmt(body, &iteration)
    }

    fn exec_while(
        &mut self,
        test: ExprId,
        body: StmtId,
        scope: &LocalScope<Scope>,
        labels: &LabelSet,
    ) -> ExecResult {
        let loop_scope = Scope::child(scope, ScopeKind::Block);
        while self.eval_expr(test, &loop_scope)?.is_truthy() {
            match to_loop_action(self.exec_iteration(body, &loop_scope)?, labels) {
                LoopAction::Next => {}
                LoopAction::Exit => break,
                LoopAction::Propagate(action) => return Ok(action),
            }
        }
        Ok(ControlAction::normal())
    }

    fn exec_do_while(
        &mut self,
        body: StmtId,
        test: ExprId,
        scope: &LocalScope<Scope>,
        labels: &LabelSet,
    ) -> ExecResult {
        let loop_scope = Scope::child(scope, ScopeKind::Block);
        loop {
            match to_loop_action(self.exec_iteration(body, &loop_scope)?, labels) {
                LoopAction::Next => {}
                LoopAction::Exit => break,
                LoopAction::Propagate(action) => return Ok(action),
            }
            if !self.eval_expr(test, &loop_scope)?.is_truthy() {
                break;
            }
        }
        Ok(ControlAction::normal())
    }

    /// `for (init; test; update) body`. Bindings made by `init` live in the
    /// loop scope and are shared by every iteration.
    fn exec_for(
        &mut self,
        init: Option<&ForInit>,
        test: Option<ExprId>,
        update: Option<ExprId>,
        body: StmtId,
        scope: &LocalScope<Scope>,
        labels: &LabelSet,
    ) -> ExecResult {
        let loop_scope = Scope::child(scope, ScopeKind::Block);
        match init {
            Some(ForInit::Decl(decl)) => {
                self.eval_stmt(*decl, &loop_scope)?;
            }
            Some(ForInit::Expr(expr)) => {
                self.eval_expr(*expr, &loop_scope)?;
            }
            None => {}
        }
        loop {
            if let Some(test) = test {
                if !self.eval_expr(test, &loop_scope)?.is_truthy() {
                    break;
                }
            }
            match to_loop_action(self.exec_iteration(body, &loop_scope)?, labels) {
                LoopAction::Next => {}
                LoopAction::Exit => break,
                LoopAction::Propagate(action) => {
                    trace!(?action, "leaving for loop");
                    return Ok(action);
                }
            }
            if let Some(update) = update {
                self.eval_expr(update, &loop_scope)?;
            }
        }
        Ok(ControlAction::normal())
    }

    /// Strict-equality dispatch with fallthrough. Without a matching case
    /// execution starts at `default`, wherever it is written.
    fn exec_switch(
        &mut self,
        discriminant: ExprId,
        cases: &[SwitchCase],
        scope: &LocalScope<Scope>,
    ) -> ExecResult {
        let value = self.eval_expr(discriminant, scope)?;
        let switch_scope = Scope::child(scope, ScopeKind::Block);
        for case in cases {
            self.hoist_functions(&case.body, &switch_scope)?;
        }

        let mut start = None;
        for (index, case) in cases.iter().enumerate() {
            let Some(test) = case.test else {
                continue;
            };
            if self.eval_expr(test, &switch_scope)?.strict_equals(&value) {
                start = Some(index);
                break;
            }
        }
        let Some(start) = start.or_else(|| cases.iter().position(|case| case.test.is_none()))
        else {
            return Ok(ControlAction::normal());
        };

        for case in &cases[start..] {
            match self.eval_statement_list(&case.body, &switch_scope)? {
                ControlAction::Normal(_) => {}
                ControlAction::Break(None) => break,
                abrupt => return Ok(abrupt),
            }
        }
        Ok(ControlAction::normal())
    }

    fn exec_try(
        &mut self,
        block: &[StmtId],
        handler: Option<&CatchClause>,
        finalizer: Option<&[StmtId]>,
        scope: &LocalScope<Scope>,
    ) -> ExecResult {
        let outcome = match (self.exec_block(block, scope), handler) {
            (Err(err), Some(handler)) if err.is_catchable() => {
                self.exec_catch(handler, &err, scope)
            }
            (outcome, _) => outcome,
        };

        let Some(finalizer) = finalizer else {
            return outcome;
        };
        if matches!(&outcome, Err(err) if !err.is_catchable()) {
            return outcome;
        }
        match self.exec_block(finalizer, scope)? {
            ControlAction::Normal(_) => outcome,
            abrupt => {
                trace!(?abrupt, "finally overrides completion");
                Ok(abrupt)
            }
        }
    }

    fn exec_catch(
        &mut self,
        handler: &CatchClause,
        err: &EvalError,
        scope: &LocalScope<Scope>,
    ) -> ExecResult {
        trace!(code = err.code(), "caught");
        let catch_scope = Scope::child(scope, ScopeKind::Block);
        if let Some(param) = handler.param {
            catch_scope
                .declare(DeclKind::Let, param, err.to_thrown_value())
                .map_err(|_| redeclaration(self.name_str(param)).with_span(handler.span))?;
        }
        self.exec_block(&handler.body, &catch_scope)
    }
}
