//! Keyword bindings: `{ name = value ... }` and default fallback.

use controlfile_core::{KeywordDescriptor, MethodDescriptor, Value};

use super::Parser;
use super::statement::read_required_name;
use crate::ast::Position;
use crate::cursor::Cursor;
use crate::diagnostics::{CompileError, ErrorKind};

impl<'r> Parser<'r> {
    /// Bind keyword values for an ordinary method; the cursor sits just inside
    /// the opening brace when `braced`.
    ///
    /// The result holds one value per declared keyword, in declaration order.
    pub(super) fn parse_keywords(
        &self,
        cursor: &mut Cursor<'_>,
        descriptor: &MethodDescriptor,
        braced: bool,
        position: &Position,
    ) -> Result<Vec<Value>, CompileError> {
        let mut values: Vec<Option<Value>> = vec![None; descriptor.keywords.len()];

        if braced {
            cursor.eat_whitespace();
            while cursor.current()? != '}' {
                let index = keyword_slot(cursor, descriptor, &values)?;
                values[index] = Some(cursor.parse_value(descriptor.keywords[index].kind)?);
                cursor.eat_whitespace();
                if cursor.peek() == Some(',') {
                    cursor.advance_char();
                    cursor.eat_whitespace();
                }
            }
        }

        descriptor
            .keywords
            .iter()
            .zip(values)
            .map(|(keyword, value)| match value {
                Some(value) => Ok(value),
                None => default_value(descriptor, keyword, position),
            })
            .collect()
    }
}

/// Identify which keyword the next binding sets, consuming `name =` unless the
/// single-keyword shorthand applies.
fn keyword_slot(
    cursor: &mut Cursor<'_>,
    descriptor: &MethodDescriptor,
    values: &[Option<Value>],
) -> Result<usize, CompileError> {
    let position = cursor.position();
    let shorthand = descriptor.keywords.len() == 1 && !cursor.current()?.is_ascii_alphabetic();

    let index = if shorthand {
        0
    } else {
        let name = read_required_name(cursor, "a keyword name")?;
        descriptor.keyword_index(&name).ok_or_else(|| {
            CompileError::new(
                ErrorKind::UnexpectedKeyword,
                format!("Method {} has no keyword {name}.", descriptor.name),
                position.clone(),
            )
        })?
    };

    if values[index].is_some() {
        return Err(CompileError::parse_error(
            format!("Keyword {} was already set.", descriptor.keywords[index].name),
            position,
        ));
    }

    if !shorthand {
        cursor.eat_whitespace();
        cursor.assertain_character('=')?;
        cursor.eat_whitespace();
    }
    Ok(index)
}

/// Parse the declared default of an omitted keyword.
fn default_value(
    descriptor: &MethodDescriptor,
    keyword: &KeywordDescriptor,
    position: &Position,
) -> Result<Value, CompileError> {
    let Some(literal) = &keyword.default else {
        return Err(CompileError::parse_error(
            format!("Required keyword {} of method {} was not set.", keyword.name, descriptor.name),
            position.clone(),
        ));
    };

    let mut cursor = Cursor::new(format!("<default of {}.{}>", descriptor.name, keyword.name), literal);
    let parsed = cursor.parse_value(keyword.kind).and_then(|value| {
        cursor.eat_whitespace();
        match cursor.peek() {
            None => Ok(value),
            Some(c) => Err(CompileError::unexpected_char(
                format!("Unexpected '{c}' after the value."),
                cursor.position(),
            )),
        }
    });

    parsed.map_err(|inner| {
        CompileError::parse_error(
            format!(
                "Default value {literal} of keyword {} of method {} is not a valid {}: {}",
                keyword.name, descriptor.name, keyword.kind, inner.message
            ),
            position.clone(),
        )
    })
}
