//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured error category; `EvalError` adds the
//! source span of the node that raised it and, when the error escaped
//! through function calls, a backtrace. Factory functions at the bottom of
//! this module are the only way the interpreter builds errors.
//!
//! Two classes of error exist. Runtime errors of the evaluated language
//! (`ReferenceError`, `TypeError`) and thrown values are *catchable*: a
//! `try`/`catch` in the program sees them as ordinary values. Syntax-class
//! errors and resource exhaustion are *fatal*: they skip every handler and
//! abort the evaluation.

use std::fmt;

use ember_ir::Span;

use crate::value::{inspect, ObjectMap, Value};

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Error class as seen by the evaluated program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    SyntaxError,
    ReferenceError,
    TypeError,
    RangeError,
    /// A value raised by `throw`.
    Thrown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::SyntaxError => "SyntaxError",
            ErrorCategory::ReferenceError => "ReferenceError",
            ErrorCategory::TypeError => "TypeError",
            ErrorCategory::RangeError => "RangeError",
            ErrorCategory::Thrown => "Error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a failed property access on `null`/`undefined`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyAccess {
    Read,
    Write,
}

impl PropertyAccess {
    fn verb(self) -> &'static str {
        match self {
            PropertyAccess::Read => "read",
            PropertyAccess::Write => "set",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            PropertyAccess::Read => "reading",
            PropertyAccess::Write => "setting",
        }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum EvalErrorKind {
    // Fatal
    #[error("unsupported syntax: {kind}")]
    UnsupportedSyntax { kind: &'static str },
    #[error("{message}")]
    InvalidStatementForm { message: String },
    #[error("Identifier '{name}' has already been declared")]
    Redeclaration { name: String },
    #[error("Maximum call stack size exceeded (depth limit {limit})")]
    StackOverflow { limit: usize },

    // Catchable
    #[error("Assignment to constant variable '{name}'")]
    ConstReassignment { name: String },
    #[error("{name} is not defined")]
    UnresolvedReference { name: String },
    #[error("{callee} is not a function")]
    NotCallable { callee: String },
    #[error(
        "Cannot {} properties of {base} ({} '{property}')",
        .access.verb(),
        .access.gerund()
    )]
    NullishProperty {
        base: &'static str,
        property: String,
        access: PropertyAccess,
    },
    #[error("Cannot use 'in' operator to search for '{key}' in {target}")]
    InvalidInOperand { key: String, target: String },
    #[error("Right-hand side of 'instanceof' is not callable")]
    InvalidInstanceofOperand,
    #[error("Uncaught {}", describe_thrown(.value))]
    UserThrown { value: Value },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvalErrorKind::UnsupportedSyntax { .. }
            | EvalErrorKind::InvalidStatementForm { .. }
            | EvalErrorKind::Redeclaration { .. } => ErrorCategory::SyntaxError,
            EvalErrorKind::StackOverflow { .. } => ErrorCategory::RangeError,
            EvalErrorKind::UnresolvedReference { .. } => ErrorCategory::ReferenceError,
            EvalErrorKind::ConstReassignment { .. }
            | EvalErrorKind::NotCallable { .. }
            | EvalErrorKind::NullishProperty { .. }
            | EvalErrorKind::InvalidInOperand { .. }
            | EvalErrorKind::InvalidInstanceofOperand => ErrorCategory::TypeError,
            EvalErrorKind::UserThrown { .. } => ErrorCategory::Thrown,
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            EvalErrorKind::UnsupportedSyntax { .. } => "E6001",
            EvalErrorKind::InvalidStatementForm { .. } => "E6002",
            EvalErrorKind::Redeclaration { .. } => "E6003",
            EvalErrorKind::StackOverflow { .. } => "E6004",
            EvalErrorKind::ConstReassignment { .. } => "E6010",
            EvalErrorKind::UnresolvedReference { .. } => "E6011",
            EvalErrorKind::NotCallable { .. } => "E6012",
            EvalErrorKind::NullishProperty { .. } => "E6013",
            EvalErrorKind::InvalidInOperand { .. } => "E6014",
            EvalErrorKind::InvalidInstanceofOperand => "E6015",
            EvalErrorKind::UserThrown { .. } => "E6020",
        }
    }

    /// Whether a `try`/`catch` in the evaluated program may handle it.
    pub fn is_catchable(&self) -> bool {
        !matches!(
            self,
            EvalErrorKind::UnsupportedSyntax { .. }
                | EvalErrorKind::InvalidStatementForm { .. }
                | EvalErrorKind::Redeclaration { .. }
                | EvalErrorKind::StackOverflow { .. }
        )
    }
}

/// One frame of a captured backtrace, innermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Call site.
    pub span: Option<Span>,
}

/// Snapshot of the script call stack at the point an error escaped a call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        EvalBacktrace { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            let name = if frame.name.is_empty() {
                "<anonymous>"
            } else {
                &frame.name
            };
            match frame.span {
                Some(span) => writeln!(f, "  {i}: {name} at {}..{}", span.start, span.end)?,
                None => writeln!(f, "  {i}: {name}")?,
            }
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost node that raised or propagated the error.
    pub span: Option<Span>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a span unless a more precise one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[inline]
    pub fn is_catchable(&self) -> bool {
        self.kind.is_catchable()
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    #[inline]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// The value a `catch` clause binds: the payload of a `throw`, or an
    /// error object `{ name, message }` for errors raised by the evaluator.
    pub fn to_thrown_value(&self) -> Value {
        if let EvalErrorKind::UserThrown { value } = &self.kind {
            return value.clone();
        }
        let mut map = ObjectMap::default();
        map.insert("name".to_string(), Value::from(self.category().as_str()));
        map.insert("message".to_string(), Value::from(self.kind.to_string()));
        Value::object(map)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.category() {
            ErrorCategory::Thrown => write!(f, "{}", self.kind),
            category => write!(f, "{category}: {}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Uncaught-error text for a thrown value. Error-shaped objects render as
/// `name: message`.
fn describe_thrown(value: &Value) -> String {
    match value {
        Value::Str(s) => s.to_string(),
        Value::Object(map) => {
            let map = map.borrow();
            match (map.get("name"), map.get("message")) {
                (Some(name), Some(message)) => format!("{name}: {message}"),
                (None, Some(message)) => format!("Error: {message}"),
                _ => inspect(value),
            }
        }
        other => inspect(other),
    }
}

// Factories

pub fn unsupported_syntax(kind: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::UnsupportedSyntax { kind })
}

pub fn invalid_statement_form(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidStatementForm {
        message: message.into(),
    })
}

pub fn redeclaration(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::Redeclaration {
        name: name.to_string(),
    })
}

pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::new(EvalErrorKind::StackOverflow { limit })
}

pub fn const_reassignment(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::ConstReassignment {
        name: name.to_string(),
    })
}

pub fn unresolved_reference(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnresolvedReference {
        name: name.to_string(),
    })
}

pub fn not_callable(callee: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable {
        callee: callee.into(),
    })
}

pub fn nullish_property(base: &Value, property: &str, access: PropertyAccess) -> EvalError {
    EvalError::new(EvalErrorKind::NullishProperty {
        base: base.type_name(),
        property: property.to_string(),
        access,
    })
}

pub fn invalid_in_operand(key: &str, target: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidInOperand {
        key: key.to_string(),
        target: target.to_js_string().to_string(),
    })
}

pub fn invalid_instanceof_operand() -> EvalError {
    EvalError::new(EvalErrorKind::InvalidInstanceofOperand)
}

pub fn user_thrown(value: Value) -> EvalError {
    EvalError::new(EvalErrorKind::UserThrown { value })
}
