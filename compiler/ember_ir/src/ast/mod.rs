//! Syntax tree.
//!
//! Nodes are stored flat in an [`ExprArena`](crate::ExprArena) and refer to
//! their children through `ExprId` / `StmtId` / `FunctionId` indices. The
//! node-kind enums are closed: adding a kind is a compile error in every
//! exhaustive match over it, including the evaluator's dispatch.

mod operators;

use std::rc::Rc;

use crate::{Name, Span};

pub use operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp, VarKind};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Index of an expression in its arena.
    ExprId
);
define_id!(
    /// Index of a statement in its arena.
    StmtId
);
define_id!(
    /// Index of a function literal in its arena.
    FunctionId
);

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Number(f64),
    String(Rc<str>),
    Bool(bool),
    Null,
    Ident(Name),
    This,
    Array(Vec<ExprId>),
    Object(Vec<Property>),
    /// Function expression or arrow function.
    Function(FunctionId),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        target: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    Conditional {
        test: ExprId,
        consequent: ExprId,
        alternate: ExprId,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    New {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Member {
        object: ExprId,
        property: MemberProperty,
    },
    Sequence(Vec<ExprId>),
}

impl ExprKind {
    /// Node-kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExprKind::Number(_) | ExprKind::String(_) | ExprKind::Bool(_) | ExprKind::Null => {
                "Literal"
            }
            ExprKind::Ident(_) => "Identifier",
            ExprKind::This => "ThisExpression",
            ExprKind::Array(_) => "ArrayExpression",
            ExprKind::Object(_) => "ObjectExpression",
            ExprKind::Function(_) => "FunctionExpression",
            ExprKind::Unary { .. } => "UnaryExpression",
            ExprKind::Update { .. } => "UpdateExpression",
            ExprKind::Binary { .. } => "BinaryExpression",
            ExprKind::Logical { .. } => "LogicalExpression",
            ExprKind::Assign { .. } => "AssignmentExpression",
            ExprKind::Conditional { .. } => "ConditionalExpression",
            ExprKind::Call { .. } => "CallExpression",
            ExprKind::New { .. } => "NewExpression",
            ExprKind::Member { .. } => "MemberExpression",
            ExprKind::Sequence(_) => "SequenceExpression",
        }
    }
}

/// Property selector of a member expression.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberProperty {
    /// `object.name`
    Named(Name),
    /// `object[expr]`
    Computed(ExprId),
}

/// One `key: value` entry of an object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: ExprId,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKey {
    Named(Name),
    String(Rc<str>),
    Number(f64),
    Computed(ExprId),
}

/// A function literal: declaration, expression, or arrow.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: FunctionBody,
    pub is_arrow: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionBody {
    Block(Vec<StmtId>),
    /// Concise arrow body: `x => x + 1`.
    Expr(ExprId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(ExprId),
    VarDecl {
        kind: VarKind,
        declarators: Vec<Declarator>,
    },
    FunctionDecl(FunctionId),
    Return(Option<ExprId>),
    If {
        test: ExprId,
        consequent: StmtId,
        alternate: Option<StmtId>,
    },
    Block(Vec<StmtId>),
    While {
        test: ExprId,
        body: StmtId,
    },
    DoWhile {
        body: StmtId,
        test: ExprId,
    },
    For {
        init: Option<ForInit>,
        test: Option<ExprId>,
        update: Option<ExprId>,
        body: StmtId,
    },
    ForIn {
        left: ForInit,
        right: ExprId,
        body: StmtId,
    },
    ForOf {
        left: ForInit,
        right: ExprId,
        body: StmtId,
    },
    Break(Option<Name>),
    Continue(Option<Name>),
    Labeled {
        label: Name,
        body: StmtId,
    },
    Switch {
        discriminant: ExprId,
        cases: Vec<SwitchCase>,
    },
    Throw(ExprId),
    Try {
        block: Vec<StmtId>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<StmtId>>,
    },
    Empty,
    Debugger,
}

impl StmtKind {
    /// Node-kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StmtKind::Expr(_) => "ExpressionStatement",
            StmtKind::VarDecl { .. } => "VariableDeclaration",
            StmtKind::FunctionDecl(_) => "FunctionDeclaration",
            StmtKind::Return(_) => "ReturnStatement",
            StmtKind::If { .. } => "IfStatement",
            StmtKind::Block(_) => "BlockStatement",
            StmtKind::While { .. } => "WhileStatement",
            StmtKind::DoWhile { .. } => "DoWhileStatement",
            StmtKind::For { .. } => "ForStatement",
            StmtKind::ForIn { .. } => "ForInStatement",
            StmtKind::ForOf { .. } => "ForOfStatement",
            StmtKind::Break(_) => "BreakStatement",
            StmtKind::Continue(_) => "ContinueStatement",
            StmtKind::Labeled { .. } => "LabeledStatement",
            StmtKind::Switch { .. } => "SwitchStatement",
            StmtKind::Throw(_) => "ThrowStatement",
            StmtKind::Try { .. } => "TryStatement",
            StmtKind::Empty => "EmptyStatement",
            StmtKind::Debugger => "DebuggerStatement",
        }
    }

    /// Whether this statement is an iteration statement that can absorb
    /// `continue`.
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            StmtKind::While { .. }
                | StmtKind::DoWhile { .. }
                | StmtKind::For { .. }
                | StmtKind::ForIn { .. }
                | StmtKind::ForOf { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
    pub name: Name,
    pub init: Option<ExprId>,
    pub span: Span,
}

/// Initialiser clause of a `for` head.
#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    /// A `var`/`let`/`const` statement.
    Decl(StmtId),
    Expr(ExprId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    /// `None` for the `default` clause.
    pub test: Option<ExprId>,
    pub body: Vec<StmtId>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub param: Option<Name>,
    pub body: Vec<StmtId>,
    pub span: Span,
}
