//! Character cursor over in-memory source text.

/// Position-tracking cursor over source characters.
///
/// Lines and columns are 1-based. A newline advances the line counter and
/// resets the column; every other character advances the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    offset: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    /// Creates a cursor at the start of the source.
    pub(crate) fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current line number.
    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number.
    pub(crate) fn column(&self) -> u32 {
        self.column
    }

    /// Returns the character at the cursor position.
    pub(crate) fn peek_char(&self, input: &str) -> Option<char> {
        input[self.offset..].chars().next()
    }

    /// Returns the character one past the cursor position.
    pub(crate) fn peek_next_char(&self, input: &str) -> Option<char> {
        let mut chars = input[self.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Consumes and returns the character at the cursor position.
    pub(crate) fn advance_char(&mut self, input: &str) -> Option<char> {
        let ch = self.peek_char(input)?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Resets the cursor to the start of the source.
    pub(crate) fn rewind(&mut self) {
        *self = Self::new();
    }
}
