//! Position-tracking view over a control-file buffer.
//!
//! The cursor presents the text as a sequence of *line contents*: line terminators
//! are never returned as characters. Stepping off the end of a line lands on the
//! first character of the next line and raises the [`Cursor::line_break`] flag, so
//! scanners can tell that a token was split across lines.

use std::sync::Arc;

use crate::ast::Position;
use crate::diagnostics::CompileError;

pub struct Cursor<'a> {
    source: &'a str,
    file: Arc<str>,
    /// Byte offset of the current character.
    offset: usize,
    line: u32,
    column: u32,
    line_break: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(file: impl Into<Arc<str>>, source: &'a str) -> Self {
        let mut cursor = Self {
            source,
            file: file.into(),
            offset: 0,
            line: 1,
            column: 1,
            line_break: false,
        };
        cursor.skip_line_ends();
        cursor.line_break = false;
        cursor
    }

    /// The character under the cursor, or [`ErrorKind::Eot`](crate::diagnostics::ErrorKind::Eot)
    /// at end of text.
    pub fn current(&self) -> Result<char, CompileError> {
        self.peek().ok_or_else(|| CompileError::eot(self.position()))
    }

    /// The character under the cursor, if any.
    pub fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Consume one character. At end of text this is a no-op.
    pub fn advance_char(&mut self) {
        self.line_break = false;
        if let Some(c) = self.peek() {
            self.offset += c.len_utf8();
            self.column += 1;
        }
        self.skip_line_ends();
    }

    /// Skip the rest of the current line.
    pub fn advance_line(&mut self) {
        self.line_break = false;
        let rest = &self.source[self.offset..];
        let len = rest.find('\n').unwrap_or(rest.len());
        self.column += rest[..len].chars().count() as u32;
        self.offset += len;
        self.skip_line_ends();
    }

    fn skip_line_ends(&mut self) {
        while self.peek() == Some('\n') {
            self.offset += 1;
            self.line += 1;
            self.column = 1;
            self.line_break = true;
        }
    }

    /// Whether the most recent advance crossed at least one line end.
    pub fn line_break(&self) -> bool {
        self.line_break
    }

    pub fn clear_line_break(&mut self) {
        self.line_break = false;
    }

    pub fn position(&self) -> Position {
        Position {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.column,
        }
    }

    pub fn file(&self) -> &Arc<str> {
        &self.file
    }
}
