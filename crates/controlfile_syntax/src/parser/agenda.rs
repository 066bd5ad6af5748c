//! Statement sequences and include expansion.

use super::{Parsed, Parser, Terminator};
use crate::ast::{Agenda, Position};
use crate::cursor::Cursor;
use crate::diagnostics::{CompileError, ErrorKind};

impl<'r> Parser<'r> {
    /// Parse statements until `terminator`, splicing included files in place.
    pub(super) fn parse_agenda(
        &mut self,
        cursor: &mut Cursor<'_>,
        terminator: Terminator,
    ) -> Result<Agenda, CompileError> {
        let mut agenda = Agenda::new();
        loop {
            cursor.eat_whitespace();
            let done = match terminator {
                Terminator::Brace => cursor.current()? == '}',
                Terminator::EndOfText => cursor.is_at_end(),
            };
            if done {
                return Ok(agenda);
            }

            match self.parse_statement(cursor)? {
                Parsed::Statement(statement) => agenda.push(statement),
                Parsed::Include { path, position } => {
                    let included = self.parse_include(&path, &position)?;
                    agenda.statements.extend(included.statements);
                }
            }
        }
    }

    /// Resolve an include path and parse the file as a bare statement sequence.
    fn parse_include(&mut self, path: &str, position: &Position) -> Result<Agenda, CompileError> {
        let source = self
            .resolver
            .resolve(path)
            .map_err(|e| CompileError::new(ErrorKind::IncludeNotFound, e.to_string(), position.clone()))?;

        if self.include_stack.contains(&source.name) {
            let chain = self
                .include_stack
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(source.name.as_str()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(CompileError::new(
                ErrorKind::IncludeCycle,
                format!("File {} is included recursively ({chain}).", source.name),
                position.clone(),
            ));
        }

        self.enter(position)?;
        tracing::debug!(include = path, file = %source.name, "expanding include");
        self.include_stack.push(source.name.clone());

        let mut cursor = Cursor::new(source.name.as_str(), &source.text);
        let agenda = self.parse_agenda(&mut cursor, Terminator::EndOfText)?;

        self.include_stack.pop();
        self.leave();
        Ok(agenda)
    }
}
