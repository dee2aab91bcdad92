//! Source location tracking: byte-range `Span`s over a single source buffer.
//!
//! Arcana compiles one file per invocation , so unlike a
//! multi-file compiler's `Span` this one carries no `FileId` — only the
//! byte range and, for diagnostics, the precomputed line/column.

/// A byte range in the source buffer, with 1-based line/column for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
    };

    #[inline]
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// A zero-width span at a single offset, used for EOF and synthetic nodes.
    #[inline]
    pub fn point(offset: usize, line: u32, column: u32) -> Self {
        Self::new(offset, offset, line, column)
    }

    /// Merge two spans into the range that covers both.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
        }
    }
}

/// Computes 1-based line/column for a byte offset, scanning the source once
/// per call. Arcana programs are small enough that a line-start cache is
/// unneeded overhead; the lexer calls this only when emitting a token.
pub fn line_col(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_tracks_newlines() {
        let src = "ab\ncd\nef";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 3), (2, 1));
        assert_eq!(line_col(src, 7), (3, 2));
    }

    #[test]
    fn span_to_covers_both() {
        let a = Span::new(0, 3, 1, 1);
        let b = Span::new(5, 8, 1, 6);
        let merged = a.to(b);
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 8);
    }
}
