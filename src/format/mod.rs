//! Canonical control-text formatter
//!
//! Prints a parsed agenda back as control-file source:
//! - one statement per line, nested agendas indented
//! - `Name(a, b)` with `, ` between variables
//! - keyword blocks on one line when they fit, otherwise one binding per line
//! - includes already expanded, specializations under their generic name
//!
//! Formatting an agenda and parsing the output again yields an agenda that
//! binds like the original, as long as no string value holds a `"`.

mod config;
mod formatter;
mod writer;

pub use config::{FormatConfig, KeywordLayout};
pub use formatter::Formatter;

use controlfile_core::{MethodRegistry, VariableRegistry};
use controlfile_syntax::ast::Agenda;
use controlfile_syntax::diagnostics::CompileError;
use controlfile_syntax::include::IncludeResolver;
use controlfile_syntax::parser::{self, ParserConfig};

/// Format an agenda as the body of `entry` with default settings
pub fn format_agenda(agenda: &Agenda, entry: &str, methods: &MethodRegistry, variables: &VariableRegistry) -> String {
    Formatter::new(methods, variables, FormatConfig::default()).format(entry, agenda)
}

/// Parse control-file source and print it in canonical form
pub fn format_source(
    file: &str,
    source: &str,
    methods: &MethodRegistry,
    variables: &VariableRegistry,
    resolver: &dyn IncludeResolver,
    parser_config: ParserConfig,
    config: FormatConfig,
) -> Result<String, CompileError> {
    let entry = parser_config.entry_point.clone();
    let agenda = parser::parse(file, source, methods, variables, resolver, parser_config)?;
    Ok(Formatter::new(methods, variables, config).format(&entry, &agenda))
}
