//! Line index and offset → position conversion.
//!
//! Every diagnostic, whatever rule produced it, is addressed through this module so that regex
//! byte offsets and Tree-sitter `(row, byte column)` points land in the same coordinate system.
//!
//! Only `\n` separates lines. A `\r` from CRLF input is an ordinary character at the end of its
//! line.

use ropey::Rope;

/// A 1-based `(line, column)` source position. Columns count `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl Position {
    /// Line 1, column 1.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Create a position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Rope-backed line index over an immutable source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count (an empty text, or a text ending in `\n`, has a trailing empty line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Zero-based `(line, char-in-line)` for a character offset.
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        (line_idx, char_offset - line_start_char)
    }

    /// Character offset of a byte offset. A byte inside a multi-byte char maps to that char.
    pub fn byte_offset_to_char_offset(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset.min(self.rope.len_bytes()))
    }

    /// 1-based position of a byte offset (as reported by `regex` matches).
    pub fn position_at_byte(&self, byte_offset: usize) -> Position {
        let char_offset = self.byte_offset_to_char_offset(byte_offset);
        let (line, column) = self.char_offset_to_position(char_offset);
        Position::new(line + 1, column + 1)
    }

    /// 1-based position of a zero-based `(row, byte column)` point (as reported by Tree-sitter).
    pub fn position_at_point(&self, row: usize, byte_column: usize) -> Position {
        if row >= self.rope.len_lines() {
            return self.end_position();
        }

        let line_start = self.rope.line_to_byte(row);
        let slice = self.rope.line(row);
        let mut line_bytes = slice.len_bytes();
        if line_bytes > 0 && slice.byte(line_bytes - 1) == b'\n' {
            line_bytes -= 1;
        }
        self.position_at_byte(line_start + byte_column.min(line_bytes))
    }

    /// Length of a zero-based line in chars, excluding its `\n`.
    pub fn line_char_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }

        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Clamp a 1-based `(line, column)` so it addresses a real location: `line <= line_count()`
    /// and `column <= line length + 1`.
    pub fn clamp(&self, line: usize, column: usize) -> Position {
        let line = line.clamp(1, self.line_count().max(1));
        let max_column = self.line_char_len(line - 1) + 1;
        Position::new(line, column.clamp(1, max_column))
    }

    /// Position just past the last character.
    pub fn end_position(&self) -> Position {
        let (line, column) = self.char_offset_to_position(self.rope.len_chars());
        Position::new(line + 1, column + 1)
    }
}
