//! Source position tracking
//!
//! Line and column are 1-based, counted in Unicode code points. Positions
//! are carried on tokens and statements; the export-rewrite pass derives
//! collision-free temporary names from them.

/// A position in module source text.
///
/// Ordering is textual: by line, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SourcePosition {
    /// Line number, 1-based.
    pub line: usize,
    /// Column number, 1-based, in code points.
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of the first character of a file.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Advance past one character.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

/// A half-open region of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    /// Zero-width span at `pos`.
    pub fn at(pos: SourcePosition) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn range(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_one_based() {
        let pos = SourcePosition::start();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_advance_within_line() {
        let mut pos = SourcePosition::start();
        pos.advance('a');
        pos.advance('b');
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 3);
    }

    #[test]
    fn test_advance_over_newline() {
        let mut pos = SourcePosition::start();
        pos.advance('a');
        pos.advance('\n');
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_advance_counts_code_points() {
        let mut pos = SourcePosition::start();
        pos.advance('中');
        assert_eq!(pos.column, 2);
    }
}
