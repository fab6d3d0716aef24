//! Call tracking for the evaluator.
//!
//! `CallStack` records one `CallFrame` per active script call. It bounds
//! recursion (`push` fails with `StackOverflow` past the configured depth)
//! and snapshots the active frames into an `EvalBacktrace` when an error
//! escapes a call.

use std::rc::Rc;

use ember_ir::Span;

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};

/// Default limit on nested script calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// A single active call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Function name; empty for anonymous functions.
    pub name: Rc<str>,
    /// Where the call was made (not where the function was defined).
    pub call_span: Option<Span>,
}

/// Live call stack of the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` of `None` disables the limit; the native stack is still
    /// guarded by `stacker`.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. On overflow the frame is not pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot the active frames, most recent first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame.name.to_string(),
                span: frame.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one (captured
    /// deeper in the stack, so more complete).
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new(Some(DEFAULT_MAX_CALL_DEPTH))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::{unresolved_reference, EvalErrorKind};

    fn frame(name: &str, at: u32) -> CallFrame {
        CallFrame {
            name: Rc::from(name),
            call_span: Some(Span::new(at, at + 1)),
        }
    }

    #[test]
    fn push_pop_tracks_depth() {
        let mut stack = CallStack::new(None);
        stack.push(frame("a", 0)).unwrap();
        stack.push(frame("b", 5)).unwrap();
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_past_limit_overflows() {
        let mut stack = CallStack::new(Some(2));
        stack.push(frame("a", 0)).unwrap();
        stack.push(frame("a", 1)).unwrap();
        let err = stack.push(frame("a", 2)).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::StackOverflow { limit: 2 }));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn capture_is_most_recent_first() {
        let mut stack = CallStack::default();
        stack.push(frame("outer", 0)).unwrap();
        stack.push(frame("inner", 9)).unwrap();
        let trace = stack.capture();
        let names: Vec<&str> = trace.frames().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["inner", "outer"]);
    }

    #[test]
    fn attach_backtrace_keeps_existing() {
        let mut stack = CallStack::default();
        stack.push(frame("f", 0)).unwrap();
        let err = stack.attach_backtrace(unresolved_reference("x"));
        assert_eq!(err.backtrace.as_ref().map(EvalBacktrace::frames).map(<[_]>::len), Some(1));

        stack.push(frame("g", 3)).unwrap();
        let err = stack.attach_backtrace(err);
        assert_eq!(err.backtrace.unwrap().frames().len(), 1);
    }

    #[test]
    fn empty_stack_attaches_nothing() {
        let stack = CallStack::default();
        assert!(stack.attach_backtrace(unresolved_reference("x")).backtrace.is_none());
    }
}
