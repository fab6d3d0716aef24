//! Reclaiming closure cycles.
//!
//! A closure holds the scope it was created in, and that scope (or a parent
//! inside the same call) usually binds the closure. Reference counting alone
//! never frees such a pair, so every scope a closure captures is registered
//! here and periodically checked.
//!
//! Detection is trial deletion over the graph reachable from the registered
//! scopes: count the references each node receives from inside the graph.
//! A node with more handles than that is held from outside (the host, a
//! Rust local of a running call, a native function) and is a root. Nodes
//! the roots cannot reach are garbage; their scopes lose their bindings and
//! their objects and arrays lose their contents, which breaks every cycle
//! through them.
//!
//! Collection runs when a program finishes, when the interpreter is
//! dropped, and after a call once enough scopes have been registered.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::Interpreter;
use crate::environment::{LocalScope, Scope, WeakScope};
use crate::value::{FunctionKind, FunctionValue, Heap, ObjectMap, Value};

/// Registrations tolerated before a call exit triggers a collection.
const MIN_THRESHOLD: usize = 1024;

/// Scopes captured by closures, held weakly.
pub(super) struct CaptureRegistry {
    scopes: Vec<WeakScope<Scope>>,
    threshold: usize,
}

impl Default for CaptureRegistry {
    fn default() -> Self {
        CaptureRegistry {
            scopes: Vec::new(),
            threshold: MIN_THRESHOLD,
        }
    }
}

impl CaptureRegistry {
    pub(super) fn register(&mut self, scope: &LocalScope<Scope>) {
        // Closures created in a row (object literals, hoisting) usually
        // share their scope.
        if self.scopes.last().is_some_and(|last| last.points_to(scope)) {
            return;
        }
        self.scopes.push(scope.downgrade());
    }

    pub(super) fn is_due(&self) -> bool {
        self.scopes.len() >= self.threshold
    }

    pub(super) fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Empty every registered scope, and everything only it reaches, that
    /// nothing outside the graph holds. Returns the number of scopes
    /// released.
    pub(super) fn collect(&mut self) -> usize {
        let mut graph = Graph::default();
        for weak in self.scopes.drain(..) {
            if let Some(scope) = weak.upgrade() {
                graph.insert_registered(scope);
            }
        }
        graph.explore();
        let scanned = graph.entries.len();
        let released = graph.release_unreachable();
        let survivors = graph.into_survivors();

        self.scopes = survivors;
        self.scopes.retain(WeakScope::is_live);
        self.threshold = MIN_THRESHOLD.max(self.scopes.len() * 2);
        debug!(
            scanned,
            released,
            registered = self.scopes.len(),
            "collected closure scopes"
        );
        released
    }
}

impl Interpreter<'_> {
    /// Run a collection if any closure has been created since the last one.
    pub(crate) fn collect_cycles(&mut self) {
        if !self.captures.is_empty() {
            self.captures.collect();
        }
    }

    /// Run a collection once enough scopes have been registered.
    pub(super) fn collect_cycles_if_due(&mut self) {
        if self.captures.is_due() {
            self.captures.collect();
        }
    }
}

impl Drop for Interpreter<'_> {
    fn drop(&mut self) {
        self.collect_cycles();
    }
}

/// A reference-counted allocation that can take part in a cycle.
enum Node {
    Scope(LocalScope<Scope>),
    Object(Heap<ObjectMap>),
    Array(Heap<Vec<Value>>),
    Function(Rc<FunctionValue>),
}

impl Node {
    fn from_value(value: &Value) -> Option<Node> {
        match value {
            Value::Object(map) => Some(Node::Object(map.clone())),
            Value::Array(items) => Some(Node::Array(items.clone())),
            Value::Function(func) => Some(Node::Function(Rc::clone(func))),
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Str(_) => None,
        }
    }

    fn addr(&self) -> usize {
        match self {
            Node::Scope(scope) => scope.addr(),
            Node::Object(map) => map.addr(),
            Node::Array(items) => items.addr(),
            Node::Function(func) => Rc::as_ptr(func).cast::<()>() as usize,
        }
    }

    fn handle_count(&self) -> usize {
        match self {
            Node::Scope(scope) => scope.handle_count(),
            Node::Object(map) => map.handle_count(),
            Node::Array(items) => items.handle_count(),
            Node::Function(func) => Rc::strong_count(func),
        }
    }

    /// Outgoing references, or `None` when the node is mutably borrowed
    /// and cannot be inspected.
    fn edges(&self) -> Option<Vec<Node>> {
        let mut out = Vec::new();
        match self {
            Node::Scope(scope) => {
                let scope = scope.try_borrow().ok()?;
                out.extend(scope.parent().cloned().map(Node::Scope));
                out.extend(scope.values().filter_map(Node::from_value));
            }
            Node::Object(map) => {
                out.extend(map.try_borrow()?.values().filter_map(Node::from_value));
            }
            Node::Array(items) => {
                out.extend(items.try_borrow()?.iter().filter_map(Node::from_value));
            }
            Node::Function(func) => {
                if let FunctionKind::User { closure, .. } = func.kind() {
                    out.push(Node::Scope(closure.clone()));
                }
            }
        }
        Some(out)
    }

    fn release(&self) {
        match self {
            Node::Scope(scope) => scope.clear_bindings(),
            Node::Object(map) => map.clear(),
            Node::Array(items) => items.clear(),
            // A function holds nothing but its closure scope, which is a
            // node of its own.
            Node::Function(_) => {}
        }
    }
}

struct Entry {
    node: Node,
    /// References coming from other entries.
    internal: usize,
    /// Addresses of the entries this one references.
    edges: Vec<usize>,
    /// The node could not be inspected; it is kept and treated as a root.
    opaque: bool,
    marked: bool,
}

#[derive(Default)]
struct Graph {
    /// One handle per node, keyed by address. The graph's own handle is
    /// discounted when looking for roots.
    entries: FxHashMap<usize, Entry>,
    /// Registered scopes, by address.
    registered: Vec<usize>,
    pending: Vec<usize>,
}

impl Graph {
    fn insert_registered(&mut self, scope: LocalScope<Scope>) {
        if !self.entries.contains_key(&scope.addr()) {
            let addr = self.add(Node::Scope(scope));
            self.registered.push(addr);
        }
    }

    /// Add `node` unless it is already present; returns its address.
    fn add(&mut self, node: Node) -> usize {
        let addr = node.addr();
        self.entries.entry(addr).or_insert_with(|| {
            self.pending.push(addr);
            Entry {
                node,
                internal: 0,
                edges: Vec::new(),
                opaque: false,
                marked: false,
            }
        });
        addr
    }

    /// Visit everything reachable from the inserted nodes, counting the
    /// references between them.
    fn explore(&mut self) {
        while let Some(addr) = self.pending.pop() {
            let Some(entry) = self.entries.get(&addr) else {
                continue;
            };
            let Some(children) = entry.node.edges() else {
                if let Some(entry) = self.entries.get_mut(&addr) {
                    entry.opaque = true;
                }
                continue;
            };
            let mut edges = Vec::with_capacity(children.len());
            for child in children {
                let child = self.add(child);
                if let Some(target) = self.entries.get_mut(&child) {
                    target.internal += 1;
                }
                edges.push(child);
            }
            if let Some(entry) = self.entries.get_mut(&addr) {
                entry.edges = edges;
            }
        }
    }

    /// Mark from the roots, then release every unmarked node.
    fn release_unreachable(&mut self) -> usize {
        let mut work: Vec<usize> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.opaque || entry.node.handle_count() - 1 > entry.internal)
            .map(|(&addr, _)| addr)
            .collect();
        while let Some(addr) = work.pop() {
            let Some(entry) = self.entries.get_mut(&addr) else {
                continue;
            };
            if entry.marked {
                continue;
            }
            entry.marked = true;
            work.extend(entry.edges.iter().copied());
        }

        let mut released = 0;
        for entry in self.entries.values() {
            if entry.marked {
                continue;
            }
            if matches!(entry.node, Node::Scope(_)) {
                released += 1;
            }
            entry.node.release();
        }
        released
    }

    /// Weak handles to the registered scopes that stay reachable. The
    /// graph's strong handles are dropped here, freeing the released nodes.
    fn into_survivors(self) -> Vec<WeakScope<Scope>> {
        let Graph {
            mut entries,
            registered,
            ..
        } = self;
        let survivors = registered
            .iter()
            .filter_map(|addr| match entries.get(addr) {
                Some(Entry {
                    node: Node::Scope(scope),
                    marked: true,
                    ..
                }) => Some(scope.downgrade()),
                _ => None,
            })
            .collect();
        entries.clear();
        survivors
    }
}
