//! Output sink for `console.log`.
//!
//! Scripts print through a host-provided `console` object; where the lines
//! go is decided by the embedder:
//! - `Stdout`: the CLI
//! - `Buffer`: tests and embedders that inspect the output
//! - `Silent`: discard

use std::sync::Arc;

use ember_ir::Name;
use parking_lot::Mutex;

use crate::environment::{DeclKind, LocalScope, Scope};
use crate::value::{format_log_line, FunctionValue, ObjectMap, Value};

/// Captured output lines, newline-terminated.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, line: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(line);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print handler, dispatched by enum.
pub enum PrintHandlerImpl {
    Stdout,
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(h) => h.println(line),
            Self::Silent => {}
        }
    }

    /// Everything printed so far; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler. Cloned into every `console.log` closure.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

/// Build a `console` object whose `log` writes to `handler`.
pub fn console_object(handler: SharedPrintHandler) -> Value {
    let log = FunctionValue::native("log", 0, move |args| {
        handler.println(&format_log_line(args));
        Ok(Value::Undefined)
    });
    let mut console = ObjectMap::default();
    console.insert("log".to_string(), Value::function(log));
    Value::object(console)
}

/// Bind `console` in `scope` unless something already shadows it there.
pub fn install_console(scope: &LocalScope<Scope>, handler: SharedPrintHandler) {
    if scope.has_own(Name::CONSOLE) {
        return;
    }
    // The check above rules out a redeclaration.
    let _ = scope.declare(DeclKind::Var, Name::CONSOLE, console_object(handler));
}
