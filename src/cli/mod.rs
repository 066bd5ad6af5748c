//! CLI module for the control-file compiler
//!
//! ## Commands
//!
//! - `check <file>` - Parse a control file and report the statement count
//! - `print <file>` - Print the parsed agenda as canonical control text
//! - `dump <file>` - Print the parsed agenda as JSON
//!
//! Every command takes `--registry <JSON>` (the registry manifest to check against)
//! and `-I <DIR>` include search directories. Directories listed in
//! `CONTROLFILE_INCLUDE_PATH` are searched after the `-I` ones.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use controlfile_syntax::parser::{DEFAULT_ENTRY_POINT, DEFAULT_MAX_DEPTH, ParserConfig};

/// Environment variable holding extra include search directories.
pub const INCLUDE_PATH_ENV: &str = "CONTROLFILE_INCLUDE_PATH";

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Parse and check control files against a method/variable registry
#[derive(Parser, Debug)]
#[command(name = "ctlfile")]
#[command(version = VERSION)]
#[command(about = "Parse and check control files against a method/variable registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that parses a control file.
#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// Control file to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Registry manifest (JSON) listing groups, variables and methods
    #[arg(short = 'r', long, value_name = "JSON")]
    pub registry: PathBuf,

    /// Directory searched for INCLUDE files (repeatable, searched in order)
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Method the outermost statement must be
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ENTRY_POINT)]
    pub entry: String,

    /// Deepest allowed nesting of agenda bodies and includes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl CompileArgs {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_entry_point(self.entry.clone())
            .with_max_depth(self.max_depth)
    }

    /// `-I` directories followed by those from [`INCLUDE_PATH_ENV`].
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.include_dirs.clone();
        if let Some(extra) = env::var_os(INCLUDE_PATH_ENV) {
            dirs.extend(env::split_paths(&extra).filter(|p| !p.as_os_str().is_empty()));
        }
        dirs
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a control file and report how many statements it holds
    Check {
        #[command(flatten)]
        args: CompileArgs,
    },

    /// Print the parsed agenda as canonical control text
    Print {
        #[command(flatten)]
        args: CompileArgs,
        /// Spaces per nesting level
        #[arg(long, value_name = "N", default_value_t = 2)]
        indent: usize,
        /// Exit with status 1 if the file is not already in canonical form
        #[arg(long)]
        check: bool,
    },

    /// Print the parsed agenda as JSON
    Dump {
        #[command(flatten)]
        args: CompileArgs,
        /// Single-line output instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message.trim_end());
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check { args } => commands::check_file(&args),
        Command::Print { args, indent, check } => commands::print_file(&args, indent, check),
        Command::Dump { args, compact } => commands::dump_file(&args, compact),
    }
}

// ============================================================================
// Tests
// ============================================================================
