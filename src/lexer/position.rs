use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// A cursor into the fed character stream. `column` resets to `0` at every
/// `'\n'` and advances by one for every other character; `line` starts at
/// `1` and advances by one at every `'\n'`.
pub struct LexerPosition {
    pub column: usize,
    pub line: usize,
}

impl LexerPosition {
    pub fn new() -> Self {
        LexerPosition { column: 0, line: 1 }
    }

    pub(crate) fn advance_column(&mut self, n: usize) {
        self.column += n;
    }

    pub(crate) fn advance_line(&mut self, n: usize) {
        self.column = 0;
        self.line += n;
    }
}

impl Display for LexerPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
