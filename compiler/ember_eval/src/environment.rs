//! Lexical scopes for variable binding.
//!
//! A scope chain is a linked list of `Scope`s, innermost first. Parent
//! links are shared `LocalScope` handles used only for lookup and for
//! finding the scope a declaration belongs to; nothing is ever propagated
//! upward by mutation. A closure keeps its defining scope alive by holding
//! a handle to it.
//!
//! A closure stored in the scope it captures forms a reference cycle; the
//! interpreter registers captured scopes and empties the unreachable ones
//! (see `interpreter::cycles`).

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use ember_ir::Name;

use crate::value::Value;

/// How a binding was declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    /// `let`: reassignable, block-scoped.
    Let,
    /// `var`, function declarations and parameters: reassignable,
    /// function-scoped.
    Var,
    /// `const`: not reassignable.
    Const,
}

impl DeclKind {
    #[inline]
    pub fn is_reassignable(self) -> bool {
        !matches!(self, DeclKind::Const)
    }
}

/// Whether a scope is a function boundary or a nested block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// Function bodies and the program's root scope. `var` declarations
    /// land in the nearest one.
    Function,
    /// Blocks, loops, loop iterations, switch bodies, catch and finally
    /// clauses.
    Block,
}

/// Error returned by `set` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The owning binding is `const`.
    Const,
    /// No scope in the chain binds the name.
    Undefined,
}

/// Error returned by `declare` when the target scope already binds the
/// name and the redeclaration is not a `var` over a `var`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclareError {
    Redeclared { existing: DeclKind },
}

/// Single-threaded shared handle to a scope.
///
/// Every scope allocation goes through `LocalScope::new`, which keeps the
/// `Rc<RefCell<_>>` an implementation detail of this module.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// `true` when both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &LocalScope<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A handle that does not keep the scope alive.
    #[inline]
    pub fn downgrade(&self) -> WeakScope<T> {
        WeakScope(Rc::downgrade(&self.0))
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Number of strong handles to this scope.
    #[inline]
    pub(crate) fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

/// Non-owning handle to a scope.
pub struct WeakScope<T>(Weak<RefCell<T>>);

impl<T> WeakScope<T> {
    /// The scope, if anything still holds it.
    #[inline]
    pub fn upgrade(&self) -> Option<LocalScope<T>> {
        self.0.upgrade().map(LocalScope)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    #[inline]
    pub(crate) fn points_to(&self, scope: &LocalScope<T>) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&scope.0))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// A single scope: its own bindings plus an optional parent.
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
    kind: ScopeKind,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    kind: DeclKind,
}

impl Scope {
    /// A parentless function-boundary scope: the root of a chain.
    pub fn new_root() -> LocalScope<Scope> {
        LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
            kind: ScopeKind::Function,
        })
    }

    /// A fresh scope nested in `parent`.
    pub fn child(parent: &LocalScope<Scope>, kind: ScopeKind) -> LocalScope<Scope> {
        LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent.clone()),
            kind,
        })
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    #[inline]
    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Whether this scope itself (not a parent) binds `name`.
    #[inline]
    pub fn has_own(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Declaration kind of an own binding.
    pub fn own_kind(&self, name: Name) -> Option<DeclKind> {
        self.bindings.get(&name).map(|binding| binding.kind)
    }

    /// Number of own bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Values of the own bindings, in no particular order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &Value> {
        self.bindings.values().map(|binding| &binding.value)
    }

    fn insert(&mut self, kind: DeclKind, name: Name, value: Value) -> Result<(), DeclareError> {
        match self.bindings.get_mut(&name) {
            Some(existing) if existing.kind == DeclKind::Var && kind == DeclKind::Var => {
                existing.value = value;
                Ok(())
            }
            Some(existing) => Err(DeclareError::Redeclared {
                existing: existing.kind,
            }),
            None => {
                self.bindings.insert(name, Binding { value, kind });
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parents are summarized; a closure stored in a parent would
        // otherwise print the whole chain again.
        f.debug_struct("Scope")
            .field("kind", &self.kind)
            .field("bindings", &self.bindings.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl fmt::Debug for LocalScope<Scope> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&*self.borrow()).finish()
    }
}

impl LocalScope<Scope> {
    /// Look `name` up through the chain.
    pub fn get(&self, name: Name) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.borrow();
                if let Some(binding) = scope.bindings.get(&name) {
                    return Some(binding.value.clone());
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }

    /// Overwrite the binding for `name` in the scope that owns it.
    pub fn set(&self, name: Name, value: Value) -> Result<(), AssignError> {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut scope = current.borrow_mut();
                if let Some(binding) = scope.bindings.get_mut(&name) {
                    if !binding.kind.is_reassignable() {
                        return Err(AssignError::Const);
                    }
                    binding.value = value;
                    return Ok(());
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => return Err(AssignError::Undefined),
            }
        }
    }

    /// Create a binding. `Let` and `Const` attach to this scope, `Var`
    /// to the nearest function-boundary scope.
    pub fn declare(&self, kind: DeclKind, name: Name, value: Value) -> Result<(), DeclareError> {
        let target = if kind == DeclKind::Var {
            self.function_scope()
        } else {
            self.clone()
        };
        let result = target.borrow_mut().insert(kind, name, value);
        result
    }

    /// Create a `Var` binding in the root scope, as an assignment to an
    /// undeclared name does.
    pub fn define_implicit(&self, name: Name, value: Value) -> Result<(), DeclareError> {
        let root = self.root();
        let result = root.borrow_mut().insert(DeclKind::Var, name, value);
        result
    }

    /// Nearest enclosing `Function` scope, or the root.
    pub fn function_scope(&self) -> LocalScope<Scope> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.borrow();
                if scope.kind == ScopeKind::Function {
                    None
                } else {
                    scope.parent.clone()
                }
            };
            match parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Outermost scope of the chain.
    pub fn root(&self) -> LocalScope<Scope> {
        let mut current = self.clone();
        loop {
            let parent = current.borrow().parent.clone();
            match parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Whether this scope itself binds `name`.
    pub fn has_own(&self, name: Name) -> bool {
        self.borrow().has_own(name)
    }

    /// Drop every own binding. Values are released after the scope's
    /// borrow ends, so their teardown may touch this scope again.
    pub fn clear_bindings(&self) {
        let bindings = std::mem::take(&mut self.borrow_mut().bindings);
        drop(bindings);
    }

    /// Number of scopes from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.borrow().parent.clone();
        while let Some(scope) = current {
            depth += 1;
            current = scope.borrow().parent.clone();
        }
        depth
    }
}
