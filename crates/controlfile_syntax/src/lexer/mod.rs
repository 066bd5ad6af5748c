//! Lexer primitives for control files.
//!
//! Control files are scanned on demand: the parser calls the primitive it expects
//! next, directly on the [`Cursor`]. There is no token stream.
//!
//! ## Module Structure
//!
//! - `strings` - quoted string literals
//! - `numbers` - integer and floating-point literals
//! - `lists` - bracketed lists of strings, integers or floats
//!
//! ## Notes
//! - Whitespace is space, tab and carriage return; line ends are consumed by the
//!   cursor itself. `#` starts a comment running to the end of the line.
//! - Primitives fail at the first violation and never resynchronize.

mod lists;
mod numbers;
mod strings;

use controlfile_core::{Value, ValueKind};

use crate::cursor::Cursor;
use crate::diagnostics::CompileError;

impl<'a> Cursor<'a> {
    /// Skip whitespace and comments. Never fails.
    pub fn eat_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\r' | '\t' => self.advance_char(),
                '#' => self.advance_line(),
                _ => break,
            }
        }
    }

    /// Read a maximal run of ASCII alphanumerics and underscores.
    ///
    /// A line end terminates the name. The result may be empty.
    pub fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.advance_char();
            if self.line_break() {
                break;
            }
        }
        name
    }

    /// Consume `expected`, or fail naming what was found instead.
    pub fn assertain_character(&mut self, expected: char) -> Result<(), CompileError> {
        let found = self.current()?;
        if found != expected {
            return Err(CompileError::unexpected_char(
                format!("Expected '{expected}', but got '{found}'."),
                self.position(),
            ));
        }
        self.advance_char();
        Ok(())
    }

    /// Parse a literal of the given kind with the matching primitive.
    pub fn parse_value(&mut self, kind: ValueKind) -> Result<Value, CompileError> {
        Ok(match kind {
            ValueKind::String => Value::String(self.parse_string()?),
            ValueKind::Integer => Value::Integer(self.parse_integer()?),
            ValueKind::Float => Value::Float(self.parse_numeric()?),
            ValueKind::StringList => Value::StringList(self.parse_string_vector()?),
            ValueKind::IntegerList => Value::IntegerList(self.parse_int_vector()?),
            ValueKind::FloatList => Value::FloatList(self.parse_num_vector()?),
        })
    }
}

/// Check if a character can be part of a method, variable or keyword name.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ============================================================================
// TESTS
// ============================================================================
