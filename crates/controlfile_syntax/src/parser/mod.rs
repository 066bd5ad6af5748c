//! Recursive-descent parser for control files.
//!
//! Converts control-file text into a resolved [`Agenda`], looking up every method
//! and workspace variable in the registries it was given.
//!
//! ## Module Structure
//!
//! - `config` - [`ParserConfig`] and reserved names
//! - `statement` - one method call: name, variable list, generic resolution
//! - `keywords` - keyword bindings and default fallback
//! - `agenda` - statement sequences and include expansion
//!
//! ## Notes
//! - The first error aborts the parse; there is no recovery.
//! - Agenda bodies and includes recurse; depth is bounded by [`ParserConfig::max_depth`].

mod agenda;
mod config;
mod keywords;
mod statement;
#[cfg(test)]
mod tests;

pub use config::{DEFAULT_ENTRY_POINT, DEFAULT_MAX_DEPTH, INCLUDE_DIRECTIVE, ParserConfig};

use controlfile_core::{MethodRegistry, VariableRegistry};

use crate::ast::{Agenda, Position, Statement, StatementBody};
use crate::cursor::Cursor;
use crate::diagnostics::{CompileError, ErrorKind};
use crate::include::IncludeResolver;

/// Result of parsing one statement position.
#[derive(Debug)]
enum Parsed {
    Statement(Statement),
    /// An `INCLUDE "path"` directive, to be expanded by the enclosing agenda.
    Include { path: String, position: Position },
}

/// Where an agenda ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// A closing `}` (left unconsumed), for nested agenda bodies.
    Brace,
    /// End of text, for included files.
    EndOfText,
}

/// Parser state for one control-file parse.
///
/// Registries and the include resolver are borrowed read-only for the whole parse.
pub struct Parser<'r> {
    methods: &'r MethodRegistry,
    variables: &'r VariableRegistry,
    resolver: &'r dyn IncludeResolver,
    config: ParserConfig,
    depth: usize,
    include_stack: Vec<String>,
}

impl<'r> Parser<'r> {
    pub fn new(
        methods: &'r MethodRegistry,
        variables: &'r VariableRegistry,
        resolver: &'r dyn IncludeResolver,
        config: ParserConfig,
    ) -> Self {
        Self {
            methods,
            variables,
            resolver,
            config,
            depth: 0,
            include_stack: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a whole control file and return the agenda of its outermost statement.
    ///
    /// ## Errors
    /// Returns the first [`CompileError`] encountered. Besides syntax and lookup
    /// failures, the outermost statement must resolve to
    /// [`ParserConfig::entry_point`], must take an agenda body, and may only be
    /// followed by whitespace and comments.
    pub fn parse_main(&mut self, file: &str, source: &str) -> Result<Agenda, CompileError> {
        self.depth = 0;
        self.include_stack = vec![file.to_string()];

        let mut cursor = Cursor::new(file, source);
        cursor.eat_whitespace();

        let statement = match self.parse_statement(&mut cursor)? {
            Parsed::Statement(statement) => statement,
            Parsed::Include { position, .. } => {
                return Err(CompileError::new(
                    ErrorKind::WrongEntryPoint,
                    format!(
                        "The control file must start with {}, not with {INCLUDE_DIRECTIVE}.",
                        self.config.entry_point
                    ),
                    position,
                ));
            }
        };

        let name = &self.methods.get(statement.method).name;
        if *name != self.config.entry_point {
            return Err(CompileError::new(
                ErrorKind::WrongEntryPoint,
                format!("The outermost method must be {}, but it is {name}.", self.config.entry_point),
                statement.position,
            ));
        }

        // Running out of text right after the closing brace is the normal end.
        cursor.eat_whitespace();
        if let Some(c) = cursor.peek() {
            return Err(CompileError::unexpected_char(
                format!("Unexpected '{c}' after the end of {name}."),
                cursor.position(),
            ));
        }

        match statement.body {
            StatementBody::Agenda(agenda) => Ok(agenda),
            StatementBody::Keywords(_) => Err(CompileError::new(
                ErrorKind::WrongEntryPoint,
                format!("Entry point {name} must take an agenda body."),
                statement.position,
            )),
        }
    }

    /// Count one level of agenda nesting, failing past the configured bound.
    fn enter(&mut self, position: &Position) -> Result<(), CompileError> {
        if self.depth >= self.config.max_depth {
            return Err(CompileError::new(
                ErrorKind::NestingTooDeep,
                format!(
                    "Agenda bodies and includes are nested deeper than {} levels.",
                    self.config.max_depth
                ),
                position.clone(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Parse a control file against the given registries.
///
/// This is a shorthand for `Parser::new(..).parse_main(file, source)`.
#[tracing::instrument(skip_all, fields(file = file, source_len = source.len()))]
pub fn parse(
    file: &str,
    source: &str,
    methods: &MethodRegistry,
    variables: &VariableRegistry,
    resolver: &dyn IncludeResolver,
    config: ParserConfig,
) -> Result<Agenda, CompileError> {
    Parser::new(methods, variables, resolver, config).parse_main(file, source)
}
