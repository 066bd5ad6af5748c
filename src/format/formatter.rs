//! Walks a parsed agenda and emits canonical control text.
//!
//! Specializations print under their generic base name; the parser picks the
//! same specialization again from the first variable's group. Every keyword is
//! written out, defaulted ones included.

use controlfile_core::{MethodRegistry, VarId, VariableRegistry};
use controlfile_syntax::ast::{Agenda, Statement, StatementBody};

use super::config::{FormatConfig, KeywordLayout};
use super::writer::FormatWriter;

/// Formatter that turns an agenda back into control-file source
pub struct Formatter<'r> {
    methods: &'r MethodRegistry,
    variables: &'r VariableRegistry,
    writer: FormatWriter,
}

impl<'r> Formatter<'r> {
    pub fn new(methods: &'r MethodRegistry, variables: &'r VariableRegistry, config: FormatConfig) -> Self {
        Self {
            methods,
            variables,
            writer: FormatWriter::new(config),
        }
    }

    /// Format `agenda` as the body of the outermost method `entry`.
    pub fn format(mut self, entry: &str, agenda: &Agenda) -> String {
        self.format_agenda_block(entry, agenda);
        self.writer.finish()
    }

    fn format_agenda_block(&mut self, head: &str, agenda: &Agenda) {
        if agenda.is_empty() {
            self.writer.writeln(&format!("{head} {{}}"));
            return;
        }
        self.writer.writeln(&format!("{head} {{"));
        self.writer.indent();
        for statement in agenda {
            self.format_statement(statement);
        }
        self.writer.dedent();
        self.writer.writeln("}");
    }

    fn format_statement(&mut self, statement: &Statement) {
        let head = self.head(statement);
        match &statement.body {
            StatementBody::Agenda(agenda) => self.format_agenda_block(&head, agenda),
            StatementBody::Keywords(values) if values.is_empty() => self.writer.writeln(&head),
            StatementBody::Keywords(values) => {
                let descriptor = self.methods.get(statement.method);
                let bindings: Vec<String> = descriptor
                    .keywords
                    .iter()
                    .zip(values)
                    .map(|(keyword, value)| format!("{} = {value}", keyword.name))
                    .collect();

                let inline = format!("{head} {{ {} }}", bindings.join(", "));
                let fits = !self.writer.would_exceed_line_length(inline.chars().count());
                let single_line = match self.writer.config().keyword_layout {
                    KeywordLayout::Inline => true,
                    KeywordLayout::Multiline => false,
                    KeywordLayout::Auto => fits,
                };

                if single_line {
                    self.writer.writeln(&inline);
                } else {
                    self.writer.writeln(&format!("{head} {{"));
                    self.writer.indent();
                    for binding in &bindings {
                        self.writer.writeln(binding);
                    }
                    self.writer.dedent();
                    self.writer.writeln("}");
                }
            }
        }
    }

    /// `Name(out, .., in, ..)`, or just `Name` for methods without slots.
    fn head(&self, statement: &Statement) -> String {
        let method = self.methods.base_of(statement.method).unwrap_or(statement.method);
        let name = &self.methods.get(method).name;
        if statement.outputs.is_empty() && statement.inputs.is_empty() {
            return name.clone();
        }
        let vars: Vec<&str> = statement
            .outputs
            .iter()
            .chain(&statement.inputs)
            .map(|&id| self.variable_name(id))
            .collect();
        format!("{name}({})", vars.join(", "))
    }

    fn variable_name(&self, id: VarId) -> &'r str {
        &self.variables.get(id).name
    }
}
