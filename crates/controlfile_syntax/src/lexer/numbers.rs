//! Integer and floating-point literals.
//!
//! Both scanners accept an optional leading sign. A line end directly after the
//! sign (or after an exponent marker) is an error; a line end after at least one
//! digit simply ends the literal.

use crate::cursor::Cursor;
use crate::diagnostics::CompileError;

impl<'a> Cursor<'a> {
    /// Scan the text of an integer literal: `[+-]digit+`.
    pub fn read_integer(&mut self) -> Result<String, CompileError> {
        let mut text = String::new();
        self.read_sign(&mut text)?;

        let c = self.current()?;
        if !c.is_ascii_digit() {
            return Err(CompileError::unexpected_char(
                format!("Expected digit, but got '{c}'."),
                self.position(),
            ));
        }
        self.read_digits(&mut text);
        Ok(text)
    }

    /// Scan the text of a float literal: `[+-]digit*[.digit*][(e|E)integer]`
    /// with at least one digit before the exponent.
    pub fn read_numeric(&mut self) -> Result<String, CompileError> {
        let start = self.position();
        let mut text = String::new();
        self.read_sign(&mut text)?;

        let mut found_digit = self.read_digits(&mut text);
        if found_digit && self.line_break() {
            return Ok(text);
        }

        if self.peek() == Some('.') {
            text.push('.');
            let here = self.position();
            self.advance_char();
            if self.line_break() {
                if found_digit {
                    return Ok(text);
                }
                return Err(CompileError::illegal_linebreak(
                    "Line break after decimal point.",
                    here.next_column(),
                ));
            }
            if self.read_digits(&mut text) {
                found_digit = true;
                if self.line_break() {
                    return Ok(text);
                }
            }
        }

        if !found_digit {
            return Err(CompileError::parse_error("Numeric must contain at least one digit.", start));
        }

        if let Some(marker @ ('e' | 'E')) = self.peek() {
            text.push(marker);
            let here = self.position();
            self.advance_char();
            if self.line_break() {
                return Err(CompileError::illegal_linebreak("Line break after e/E.", here.next_column()));
            }
            text.push_str(&self.read_integer()?);
        }
        Ok(text)
    }

    pub fn parse_integer(&mut self) -> Result<i64, CompileError> {
        let start = self.position();
        let text = self.read_integer()?;
        text.parse::<i64>()
            .map_err(|_| CompileError::parse_error(format!("Integer {text} is out of range."), start))
    }

    pub fn parse_numeric(&mut self) -> Result<f64, CompileError> {
        let start = self.position();
        let text = self.read_numeric()?;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(CompileError::parse_error(
                format!("Numeric {text} is out of range."),
                start,
            )),
        }
    }

    fn read_sign(&mut self, text: &mut String) -> Result<(), CompileError> {
        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            let here = self.position();
            self.advance_char();
            if self.line_break() {
                return Err(CompileError::illegal_linebreak("Line break after sign.", here.next_column()));
            }
        }
        Ok(())
    }

    /// Append digits until a non-digit or a line end. Returns whether any were read.
    fn read_digits(&mut self, text: &mut String) -> bool {
        let mut any = false;
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            any = true;
            text.push(c);
            self.advance_char();
            if self.line_break() {
                break;
            }
        }
        any
    }
}
