//! Callable values: user closures and native host functions.

use std::fmt;
use std::rc::Rc;

use ember_ir::{FunctionId, SharedArena};

use super::Value;
use crate::environment::{LocalScope, Scope};
use crate::errors::EvalResult;

/// Signature of a host function callable from script code.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// What a function value runs when called.
pub enum FunctionKind {
    /// A function or arrow defined in script code.
    ///
    /// `closure` is the scope the function was created in; every call
    /// parents its fresh function scope there, so captured bindings stay
    /// alive for as long as the function does.
    User {
        def: FunctionId,
        arena: SharedArena,
        closure: LocalScope<Scope>,
    },
    /// A host function.
    Native(Rc<NativeFn>),
}

/// A callable value.
pub struct FunctionValue {
    name: Rc<str>,
    arity: usize,
    kind: FunctionKind,
}

impl FunctionValue {
    pub fn user(
        name: impl Into<Rc<str>>,
        arity: usize,
        def: FunctionId,
        arena: SharedArena,
        closure: LocalScope<Scope>,
    ) -> Self {
        FunctionValue {
            name: name.into(),
            arity,
            kind: FunctionKind::User {
                def,
                arena,
                closure,
            },
        }
    }

    pub fn native(
        name: impl Into<Rc<str>>,
        arity: usize,
        func: impl Fn(&[Value]) -> EvalResult + 'static,
    ) -> Self {
        FunctionValue {
            name: name.into(),
            arity,
            kind: FunctionKind::Native(Rc::new(func)),
        }
    }

    /// Function name; empty for anonymous functions and arrows.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared parameters (`fn.length`).
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, FunctionKind::Native(_))
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("native", &self.is_native())
            .finish_non_exhaustive()
    }
}
