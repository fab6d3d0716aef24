//! Byte-offset source spans.
//!
//! Spans are only used for diagnostics; the evaluator never inspects them
//! beyond attaching them to errors.

use std::fmt;

/// Half-open byte range `start..end` into the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Placeholder for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Build a span from a lexer range, clamping offsets past `u32::MAX`.
    ///
    /// Sources that large are rejected before lexing, so clamping only
    /// matters for diagnostics on pathological input.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let merged = Span::new(10, 20).merge(Span::new(15, 30));
        assert_eq!(merged, Span::new(10, 30));
    }

    #[test]
    fn merge_disjoint_spans() {
        let merged = Span::new(20, 30).merge(Span::new(0, 5));
        assert_eq!(merged, Span::new(0, 30));
    }

    #[test]
    fn point_is_empty() {
        let p = Span::point(7);
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn from_range_clamps_huge_offsets() {
        let big = u32::MAX as usize + 10;
        let span = Span::from_range(3..big);
        assert_eq!(span.start, 3);
        assert_eq!(span.end, u32::MAX);
    }

    #[test]
    fn display_is_range_syntax() {
        assert_eq!(Span::new(4, 9).to_string(), "4..9");
    }
}
