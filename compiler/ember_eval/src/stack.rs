//! Native stack guard for the recursive evaluator.
//!
//! Script recursion is bounded by the call-depth limit in `CallStack`; this
//! guard covers the host side, where a deeply nested expression or a long
//! chain of nested blocks recurses through `eval_expr`/`eval_stmt`.

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Keep at least this much stack free before recursing (128KB).
    const RED_ZONE: usize = 128 * 1024;
    /// Size of each freshly allocated segment (2MB).
    const GROW_BY: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
