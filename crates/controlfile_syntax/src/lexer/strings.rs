//! Quoted string literals.
//!
//! Strings are copied verbatim between double quotes. There are no escapes; a
//! string must close on the line it opened on.

use crate::cursor::Cursor;
use crate::diagnostics::CompileError;

const LINE_BREAK_IN_STRING: &str = "Line break before end of String.";

impl<'a> Cursor<'a> {
    pub fn parse_string(&mut self) -> Result<String, CompileError> {
        let open = self.position();
        self.assertain_character('"')?;
        if self.line_break() {
            return Err(CompileError::illegal_linebreak(LINE_BREAK_IN_STRING, open.next_column()));
        }

        let mut value = String::new();
        loop {
            let c = self.current()?;
            if c == '"' {
                self.advance_char();
                return Ok(value);
            }
            value.push(c);
            let here = self.position();
            self.advance_char();
            if self.line_break() {
                return Err(CompileError::illegal_linebreak(LINE_BREAK_IN_STRING, here.next_column()));
            }
        }
    }
}
