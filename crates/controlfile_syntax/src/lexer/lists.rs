//! Bracketed lists: `[a, b, c]`.
//!
//! The empty list `[]` is legal. A trailing comma is not: the element scanner is
//! invoked on the closing bracket and fails there.

use crate::cursor::Cursor;
use crate::diagnostics::CompileError;

impl<'a> Cursor<'a> {
    pub fn parse_string_vector(&mut self) -> Result<Vec<String>, CompileError> {
        self.parse_list(|cursor| cursor.parse_string())
    }

    pub fn parse_int_vector(&mut self) -> Result<Vec<i64>, CompileError> {
        self.parse_list(|cursor| cursor.parse_integer())
    }

    pub fn parse_num_vector(&mut self) -> Result<Vec<f64>, CompileError> {
        self.parse_list(|cursor| cursor.parse_numeric())
    }

    fn parse_list<T>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Result<T, CompileError>,
    ) -> Result<Vec<T>, CompileError> {
        self.assertain_character('[')?;
        self.eat_whitespace();

        let mut items = Vec::new();
        while self.current()? != ']' {
            if !items.is_empty() {
                self.assertain_character(',')?;
                self.eat_whitespace();
            }
            items.push(element(self)?);
            self.eat_whitespace();
        }
        self.advance_char();
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::diagnostics::ErrorKind;

    #[test]
    fn empty_lists() {
        assert_eq!(Cursor::new("f", "[]").parse_int_vector().unwrap(), Vec::<i64>::new());
        assert_eq!(Cursor::new("f", "[ \t ]").parse_string_vector().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn elements_with_surrounding_whitespace_and_comments() {
        let text = "[ 1 ,2, # first two\n 3 ]";
        assert_eq!(Cursor::new("f", text).parse_int_vector().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn string_and_float_elements() {
        assert_eq!(
            Cursor::new("f", r#"["a", "b c"]"#).parse_string_vector().unwrap(),
            vec!["a".to_string(), "b c".to_string()]
        );
        assert_eq!(
            Cursor::new("f", "[1, -2.5, 3e2]").parse_num_vector().unwrap(),
            vec![1.0, -2.5, 300.0]
        );
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let err = Cursor::new("f", "[1,2,]").parse_int_vector().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedChar);
        assert_eq!(err.message, "Expected digit, but got ']'.");
    }

    #[test]
    fn missing_separator_is_rejected() {
        let err = Cursor::new("f", "[1 2]").parse_int_vector().unwrap_err();
        assert_eq!(err.message, "Expected ',', but got '2'.");
    }

    #[test]
    fn unterminated_list_is_eot() {
        let err = Cursor::new("f", "[1, 2").parse_int_vector().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Eot);
    }

    #[test]
    fn closing_bracket_is_consumed() {
        let mut cursor = Cursor::new("f", "[1]x");
        cursor.parse_int_vector().unwrap();
        assert_eq!(cursor.current().unwrap(), 'x');
    }
}
