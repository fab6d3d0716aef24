//! Flat storage for syntax-tree nodes.

use std::ops::Deref;
use std::rc::Rc;

use crate::ast::{Expr, ExprId, FunctionDef, FunctionId, Stmt, StmtId};
use crate::Span;

/// Owns every node of one parsed program.
///
/// Ids handed out by an arena are only meaningful for that arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    functions: Vec<FunctionDef>,
}

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    pub fn alloc_function(&mut self, function: FunctionDef) -> FunctionId {
        let id = FunctionId::new(next_index(self.functions.len()));
        self.functions.push(function);
        id
    }

    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn get_function(&self, id: FunctionId) -> &FunctionDef {
        &self.functions[id.index()]
    }

    #[inline]
    pub fn expr_span(&self, id: ExprId) -> Span {
        self.get_expr(id).span
    }

    #[inline]
    pub fn stmt_span(&self, id: StmtId) -> Span {
        self.get_stmt(id).span
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

/// Shared, immutable handle to an arena.
///
/// Function values keep their defining arena alive through this handle so
/// closures stay callable after the program that created them finished.
#[derive(Clone, Debug, Default)]
pub struct SharedArena(Rc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Rc::new(arena))
    }

    /// Whether two handles refer to the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &ExprArena {
        &self.0
    }
}

/// A parsed program: top-level statements plus the arena that owns them.
#[derive(Clone, Debug)]
pub struct Program {
    pub body: Vec<StmtId>,
    pub arena: SharedArena,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, StmtKind};

    #[test]
    fn ids_are_sequential_per_kind() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr {
            kind: ExprKind::Null,
            span: Span::new(0, 4),
        });
        let b = arena.alloc_expr(Expr {
            kind: ExprKind::Bool(true),
            span: Span::new(5, 9),
        });
        let s = arena.alloc_stmt(Stmt {
            kind: StmtKind::Expr(b),
            span: Span::new(5, 10),
        });
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(s.index(), 0);
        assert_eq!(arena.get_expr(b).kind, ExprKind::Bool(true));
        assert_eq!(arena.stmt_span(s), Span::new(5, 10));
    }

    #[test]
    fn shared_arena_identity() {
        let shared = SharedArena::new(ExprArena::new());
        let clone = shared.clone();
        let other = SharedArena::new(ExprArena::new());
        assert!(shared.ptr_eq(&clone));
        assert!(!shared.ptr_eq(&other));
    }
}
