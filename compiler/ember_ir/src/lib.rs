//! Ember IR - syntax tree and shared front-end types.
//!
//! This crate contains the data structures exchanged between the lexer,
//! parser and evaluator:
//! - `Span` for byte-offset source locations
//! - `Name` and `StringInterner` for interned identifiers
//! - `Token` / `TokenList` for lexer output
//! - The syntax tree (`Expr`, `Stmt`, `FunctionDef`) stored in an `ExprArena`
//!
//! # Design
//!
//! - **Intern identifiers**: names compare as `u32`.
//! - **Flatten the tree**: children are ids into the arena, not boxes.
//! - **Closed node kinds**: `ExprKind` and `StmtKind` are exhaustive enums.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use arena::{ExprArena, Program, SharedArena};
pub use ast::{
    AssignOp, BinaryOp, CatchClause, Declarator, Expr, ExprId, ExprKind, ForInit, FunctionBody,
    FunctionDef, FunctionId, LogicalOp, MemberProperty, Property, PropertyKey, Stmt, StmtId,
    StmtKind, SwitchCase, UnaryOp, UpdateOp, VarKind,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
