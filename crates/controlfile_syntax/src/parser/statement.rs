//! One method call: `Name(out, .., in, ..) { body }`.
//!
//! Generic methods are resolved in two phases. The generic view yields a
//! descriptor with polymorphic slots; the group of the first bound variable then
//! selects the concrete specialization, and every variable (the first included)
//! is checked against that specialization's slots.

use controlfile_core::{FormalGroup, Group, MethodDescriptor, MethodId, Resolution, VarId};

use super::{INCLUDE_DIRECTIVE, Parsed, Parser, Terminator};
use crate::ast::{Agenda, Position, Statement, StatementBody};
use crate::cursor::Cursor;
use crate::diagnostics::{CompileError, ErrorKind};

struct BoundVariables {
    method: MethodId,
    outputs: Vec<VarId>,
    inputs: Vec<VarId>,
}

impl<'r> Parser<'r> {
    pub(super) fn parse_statement(&mut self, cursor: &mut Cursor<'_>) -> Result<Parsed, CompileError> {
        let position = cursor.position();
        let name = read_required_name(cursor, "a method name")?;

        if name == INCLUDE_DIRECTIVE {
            cursor.eat_whitespace();
            let path = cursor.parse_string()?;
            return Ok(Parsed::Include { path, position });
        }

        let base = self.methods.lookup_generic(&name).ok_or_else(|| {
            CompileError::new(ErrorKind::UnknownMethod, format!("Unknown method `{name}`."), position.clone())
        })?;
        cursor.eat_whitespace();

        let bound = self.parse_variables(cursor, base)?;
        let methods = self.methods;
        let descriptor = methods.get(bound.method);
        cursor.eat_whitespace();

        // Braces may only be left out when there is nothing required inside them.
        let braced = cursor.peek() == Some('{') || !descriptor.all_keywords_defaulted();
        if braced {
            cursor.assertain_character('{')?;
        }

        let body = if descriptor.agenda_bodied {
            let agenda = if braced {
                self.enter(&position)?;
                let agenda = self.parse_agenda(cursor, Terminator::Brace)?;
                self.leave();
                agenda
            } else {
                Agenda::new()
            };
            StatementBody::Agenda(agenda)
        } else {
            StatementBody::Keywords(self.parse_keywords(cursor, descriptor, braced, &position)?)
        };

        if braced {
            cursor.assertain_character('}')?;
        }

        tracing::trace!(method = %descriptor.name, line = position.line, "parsed statement");
        Ok(Parsed::Statement(Statement {
            method: bound.method,
            position,
            outputs: bound.outputs,
            inputs: bound.inputs,
            body,
        }))
    }

    /// Parse the `(out, .., in, ..)` list and resolve a generic method on the way.
    fn parse_variables(&self, cursor: &mut Cursor<'_>, base: MethodId) -> Result<BoundVariables, CompileError> {
        let methods = self.methods;
        let base_descriptor = methods.get(base);
        let slot_count = base_descriptor.slot_count();

        if slot_count == 0 {
            if cursor.peek() == Some('(') {
                cursor.advance_char();
                cursor.eat_whitespace();
                cursor.assertain_character(')')?;
            }
            return Ok(BoundVariables {
                method: base,
                outputs: Vec::new(),
                inputs: Vec::new(),
            });
        }

        cursor.assertain_character('(')?;
        cursor.eat_whitespace();

        let mut resolution = methods.resolution(base);
        let mut outputs = Vec::new();
        let mut inputs = Vec::new();

        for index in 0..slot_count {
            if index > 0 {
                cursor.assertain_character(',')?;
                cursor.eat_whitespace();
            }

            let position = cursor.position();
            let name = read_required_name(cursor, "a workspace variable name")?;
            let (var_id, variable) = self.variables.lookup(&name).ok_or_else(|| {
                CompileError::new(
                    ErrorKind::UnknownWsv,
                    format!("Unknown workspace variable `{name}`."),
                    position.clone(),
                )
            })?;

            let method = match resolution {
                Resolution::Concrete(method) => method,
                Resolution::Pending(generic) => {
                    let concrete = methods.resolve(generic, &variable.group).ok_or_else(|| {
                        CompileError::new(
                            ErrorKind::UnknownMethod,
                            format!(
                                "Method `{}` has no variant for group `{}`.",
                                base_descriptor.name, variable.group
                            ),
                            position.clone(),
                        )
                    })?;
                    tracing::debug!(
                        method = %base_descriptor.name,
                        group = %variable.group,
                        resolved = %methods.get(concrete).name,
                        "resolved generic method"
                    );
                    resolution = Resolution::Concrete(concrete);
                    concrete
                }
            };

            let descriptor = methods.get(method);
            check_group(descriptor, index, &name, &variable.group, &position)?;
            if index < descriptor.outputs.len() {
                outputs.push(var_id);
            } else {
                inputs.push(var_id);
            }
            cursor.eat_whitespace();
        }

        cursor.assertain_character(')')?;

        match resolution {
            Resolution::Concrete(method) => Ok(BoundVariables {
                method,
                outputs,
                inputs,
            }),
            Resolution::Pending(_) => Err(CompileError::new(
                ErrorKind::UnknownMethod,
                format!("Generic method `{}` could not be resolved.", base_descriptor.name),
                cursor.position(),
            )),
        }
    }
}

fn check_group(
    descriptor: &MethodDescriptor,
    index: usize,
    name: &str,
    actual: &Group,
    position: &Position,
) -> Result<(), CompileError> {
    match descriptor.slot(index) {
        Some(FormalGroup::Fixed(expected)) if expected != actual => Err(CompileError::new(
            ErrorKind::WrongWsvGroup,
            format!(
                "Workspace variable `{name}` has group {actual}, but method {} expects group {expected} here.",
                descriptor.name
            ),
            position.clone(),
        )),
        _ => Ok(()),
    }
}

/// Read a name that must not be empty; an empty read fails on the offending character.
pub(super) fn read_required_name(cursor: &mut Cursor<'_>, what: &str) -> Result<String, CompileError> {
    let name = cursor.read_name();
    if name.is_empty() {
        let found = cursor.current()?;
        return Err(CompileError::unexpected_char(
            format!("Expected {what}, but got '{found}'."),
            cursor.position(),
        ));
    }
    Ok(name)
}
