//! Source location tracking (byte offsets).

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into a source buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Span {
        debug_assert!(start <= end, "span start must not exceed end");
        Span { start, end }
    }

    /// An empty span at a single byte offset.
    pub fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this span (boundaries included).
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the given byte offset falls within this span.
    pub fn contains_offset(&self, offset: u32) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Whether this span ends strictly before the given offset.
    pub fn ends_before(&self, offset: u32) -> bool {
        self.end < offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_includes_boundaries() {
        let outer = Span::new(4, 10);
        assert!(outer.contains(Span::new(4, 10)));
        assert!(outer.contains(Span::new(5, 9)));
        assert!(outer.contains(Span::new(4, 4)));
        assert!(!outer.contains(Span::new(3, 5)));
        assert!(!outer.contains(Span::new(9, 11)));
    }

    #[test]
    fn ends_before_is_strict() {
        let span = Span::new(0, 5);
        assert!(span.ends_before(6));
        assert!(!span.ends_before(5));
        assert!(!span.ends_before(4));
    }
}
