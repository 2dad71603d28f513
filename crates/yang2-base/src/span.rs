//! Source location tracking for error reporting.
//!
//! A [`Span`] covers a contiguous region of source text, recording both byte
//! offsets (for slicing) and 1-based line/column positions (for the
//! "syntax error at line L column C" diagnostics both lexical readers must
//! produce).

/// A single point in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset from the start of the source buffer.
    pub offset: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, counted in Unicode scalar values.
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }

    /// The position at the very start of a buffer.
    pub fn start() -> Self {
        Self { offset: 0, line: 1, column: 1 }
    }
}

/// A byte-offset range in source text, with line/column endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width span at a single position, useful for EOF diagnostics.
    pub fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Creates a span covering from the start of `self` to the end of `other`.
    pub fn merge(self, other: Span) -> Span {
        let start = if self.start.offset <= other.start.offset { self.start } else { other.start };
        let end = if self.end.offset >= other.end.offset { self.end } else { other.end };
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset >= self.end.offset
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.start.line, self.start.column)
    }
}

/// Tracks line/column while scanning a byte buffer left to right.
///
/// Both lexical readers (compact and XML) use this to turn a byte offset
/// into a [`Position`] incrementally, rather than rescanning from the start
/// of the buffer on every token.
#[derive(Debug, Clone)]
pub struct LineTracker {
    line: u32,
    column: u32,
}

impl LineTracker {
    pub fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Returns the current position for the given byte offset, then advances
    /// past `ch`.
    pub fn advance(&mut self, offset: usize, ch: char) -> Position {
        let pos = Position::new(offset, self.line, self.column);
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        pos
    }

    pub fn position(&self, offset: usize) -> Position {
        Position::new(offset, self.line, self.column)
    }
}

impl Default for LineTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_start_is_one_one() {
        let p = Position::start();
        assert_eq!(p.line, 1);
        assert_eq!(p.column, 1);
    }

    #[test]
    fn span_merge_combines_ranges() {
        let a = Span::new(Position::new(0, 1, 1), Position::new(5, 1, 6));
        let b = Span::new(Position::new(3, 1, 4), Position::new(10, 1, 11));
        let merged = a.merge(b);
        assert_eq!(merged.start.offset, 0);
        assert_eq!(merged.end.offset, 10);
    }

    #[test]
    fn span_len_and_is_empty() {
        let s = Span::new(Position::new(0, 1, 1), Position::new(4, 1, 5));
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        let empty = Span::point(Position::start());
        assert!(empty.is_empty());
    }

    #[test]
    fn line_tracker_counts_newlines() {
        let mut tracker = LineTracker::new();
        let mut last = Position::start();
        for (i, ch) in "ab\ncd".chars().enumerate() {
            last = tracker.advance(i, ch);
        }
        assert_eq!(last.line, 2);
        assert_eq!(last.column, 2);
    }

    #[test]
    fn span_display_reports_line_and_column() {
        let s = Span::new(Position::new(0, 3, 7), Position::new(1, 3, 8));
        assert_eq!(format!("{}", s), "line 3 column 7");
    }
}
