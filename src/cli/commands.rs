//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//! The `*_output` variants return what the command would print, for tests.

use std::fs;
use std::path::Path;

use controlfile_syntax::ast::Agenda;
use controlfile_syntax::diagnostics::{CompileError, format_error};
use controlfile_syntax::include::FileSystemResolver;
use controlfile_syntax::parser;

use super::{CliError, CliResult, CompileArgs, ExitCode};
use crate::dump::agenda_to_json;
use crate::format::{FormatConfig, Formatter};
use crate::manifest::Registry;

/// Maximum source file size (16 MB)
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// A control file parsed against its registry.
pub struct Compiled {
    pub registry: Registry,
    pub agenda: Agenda,
    /// Text of the main file as read from disk
    pub source: String,
}

/// Read a source file with size validation.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (16 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

pub fn load_registry(path: &Path) -> CliResult<Registry> {
    Registry::load(path).map_err(|e| CliError::failure(format!("Error: {e}")))
}

/// Load the registry, read the control file and parse it.
#[tracing::instrument(skip_all, fields(file = %args.file.display()))]
pub fn compile(args: &CompileArgs) -> CliResult<Compiled> {
    let registry = load_registry(&args.registry)?;
    let source = read_source(&args.file)?;
    let file = args.file.display().to_string();
    let resolver = FileSystemResolver::new(args.search_dirs());

    let agenda = parser::parse(
        &file,
        &source,
        &registry.methods,
        &registry.variables,
        &resolver,
        args.parser_config(),
    )
    .map_err(|err| CliError::failure(render_compile_error(&err, &file, &source)))?;

    Ok(Compiled {
        registry,
        agenda,
        source,
    })
}

/// Render a diagnostic with the offending line, reading included files back from disk.
pub fn render_compile_error(err: &CompileError, main_file: &str, main_source: &str) -> String {
    let included = match &err.position {
        Some(position) if &*position.file != main_file => fs::read_to_string(&*position.file).ok(),
        _ => None,
    };
    let source = match &err.position {
        Some(position) if &*position.file == main_file => Some(main_source),
        _ => included.as_deref(),
    };
    format_error(err, source)
}

// ============================================================================
// check
// ============================================================================

pub fn check_output(args: &CompileArgs) -> CliResult<String> {
    let compiled = compile(args)?;
    let count = count_statements(&compiled.agenda);
    Ok(format!(
        "{}: ok ({} statement{})",
        args.file.display(),
        count,
        if count == 1 { "" } else { "s" }
    ))
}

pub fn check_file(args: &CompileArgs) -> CliResult<ExitCode> {
    println!("{}", check_output(args)?);
    Ok(ExitCode::SUCCESS)
}

/// Statements at every nesting level.
fn count_statements(agenda: &Agenda) -> usize {
    agenda
        .iter()
        .map(|statement| 1 + statement.agenda().map_or(0, count_statements))
        .sum()
}

// ============================================================================
// print
// ============================================================================

pub fn print_output(args: &CompileArgs, indent: usize) -> CliResult<(String, Compiled)> {
    let compiled = compile(args)?;
    let config = FormatConfig::new().with_indent_width(indent);
    let text = Formatter::new(&compiled.registry.methods, &compiled.registry.variables, config)
        .format(&args.entry, &compiled.agenda);
    Ok((text, compiled))
}

pub fn print_file(args: &CompileArgs, indent: usize, check: bool) -> CliResult<ExitCode> {
    let (text, compiled) = print_output(args, indent)?;
    if check {
        if text == compiled.source {
            return Ok(ExitCode::SUCCESS);
        }
        return Err(CliError::failure(format!(
            "{} is not in canonical form",
            args.file.display()
        )));
    }
    print!("{text}");
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// dump
// ============================================================================

pub fn dump_output(args: &CompileArgs, compact: bool) -> CliResult<String> {
    let compiled = compile(args)?;
    let json = agenda_to_json(&compiled.agenda, &compiled.registry.methods, &compiled.registry.variables);
    let text = if compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    };
    text.map_err(|e| CliError::failure(format!("Error serializing agenda: {e}")))
}

pub fn dump_file(args: &CompileArgs, compact: bool) -> CliResult<ExitCode> {
    println!("{}", dump_output(args, compact)?);
    Ok(ExitCode::SUCCESS)
}
