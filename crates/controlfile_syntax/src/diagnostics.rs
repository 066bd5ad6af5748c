//! Diagnostics and error reporting for control files.
//!
//! Every parse failure is fatal and becomes a single [`CompileError`]. The error
//! carries its [`ErrorKind`], a message, and the position it was raised at; the
//! top-level caller renders it with [`format_error`] or [`print_error`].

use std::fmt;

use thiserror::Error;

use crate::ast::Position;

/// Classification of a fatal parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required character was absent.
    UnexpectedChar,
    /// A line break where none is allowed.
    IllegalLinebreak,
    /// Malformed literal, duplicate keyword, or unset required keyword.
    ParseError,
    UnknownMethod,
    UnknownWsv,
    /// A bound variable's group differs from its slot's group.
    WrongWsvGroup,
    UnexpectedKeyword,
    /// End of text where a character was demanded.
    Eot,
    /// The outermost statement is not the configured entry point.
    WrongEntryPoint,
    IncludeNotFound,
    IncludeCycle,
    NestingTooDeep,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedChar => "Unexpected character",
            ErrorKind::IllegalLinebreak => "Illegal line break",
            ErrorKind::ParseError => "Parse error",
            ErrorKind::UnknownMethod => "Unknown method",
            ErrorKind::UnknownWsv => "Unknown workspace variable",
            ErrorKind::WrongWsvGroup => "Wrong workspace variable group",
            ErrorKind::UnexpectedKeyword => "Unknown keyword",
            ErrorKind::Eot => "Unexpected end of file",
            ErrorKind::WrongEntryPoint => "Wrong entry point",
            ErrorKind::IncludeNotFound => "Include file not found",
            ErrorKind::IncludeCycle => "Include cycle",
            ErrorKind::NestingTooDeep => "Nesting too deep",
        }
    }

    /// Stable diagnostic code, e.g. `controlfile::unknown_wsv`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedChar => "controlfile::unexpected_char",
            ErrorKind::IllegalLinebreak => "controlfile::illegal_linebreak",
            ErrorKind::ParseError => "controlfile::parse_error",
            ErrorKind::UnknownMethod => "controlfile::unknown_method",
            ErrorKind::UnknownWsv => "controlfile::unknown_wsv",
            ErrorKind::WrongWsvGroup => "controlfile::wrong_wsv_group",
            ErrorKind::UnexpectedKeyword => "controlfile::unexpected_keyword",
            ErrorKind::Eot => "controlfile::eot",
            ErrorKind::WrongEntryPoint => "controlfile::wrong_entry_point",
            ErrorKind::IncludeNotFound => "controlfile::include_not_found",
            ErrorKind::IncludeCycle => "controlfile::include_cycle",
            ErrorKind::NestingTooDeep => "controlfile::nesting_too_deep",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fatal control-file error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<Position>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position: Some(position),
        }
    }

    /// An error with no meaningful source location.
    pub fn unpositioned(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
        }
    }

    pub fn unexpected_char(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::UnexpectedChar, message, position)
    }

    pub fn illegal_linebreak(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::IllegalLinebreak, message, position)
    }

    pub fn parse_error(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::ParseError, message, position)
    }

    pub fn eot(position: Position) -> Self {
        Self::new(ErrorKind::Eot, "Unexpected end of text.", position)
    }
}

impl miette::Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.kind {
            ErrorKind::IllegalLinebreak => "strings and numbers must fit on one line",
            ErrorKind::WrongWsvGroup => "generic methods take the group of their first variable",
            ErrorKind::IncludeNotFound => "add the directory holding the file to the include search path",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

// ============================================================================
// Rendering
// ============================================================================

struct Palette {
    red: &'static str,
    cyan: &'static str,
    bold: &'static str,
    reset: &'static str,
}

const PLAIN: Palette = Palette {
    red: "",
    cyan: "",
    bold: "",
    reset: "",
};

const ANSI: Palette = Palette {
    red: "\x1b[31m",
    cyan: "\x1b[36m",
    bold: "\x1b[1m",
    reset: "\x1b[0m",
};

/// Render an error as a plain-text diagnostic block.
///
/// `source` is the text of the file named by the error's position; when given,
/// the offending line is quoted with a caret under the column.
pub fn format_error(error: &CompileError, source: Option<&str>) -> String {
    render(error, source, &PLAIN)
}

/// Print an error with source context to stderr, colored.
pub fn print_error(error: &CompileError, source: Option<&str>) {
    eprint!("{}", render(error, source, &ANSI));
}

fn render(error: &CompileError, source: Option<&str>, p: &Palette) -> String {
    let mut out = format!(
        "{bold}{red}{kind}{reset}{bold}: {message}{reset}\n",
        bold = p.bold,
        red = p.red,
        reset = p.reset,
        kind = error.kind,
        message = error.message,
    );

    let Some(position) = &error.position else {
        return out;
    };
    out.push_str(&format!("  {cyan}-->{reset} {position}\n", cyan = p.cyan, reset = p.reset));

    let line_text = source.and_then(|s| s.lines().nth(position.line.saturating_sub(1) as usize));
    if let Some(line_text) = line_text {
        let width = position.line.to_string().len();
        out.push_str(&format!("  {cyan}{:>width$} |{reset}\n", "", cyan = p.cyan, reset = p.reset));
        out.push_str(&format!(
            "  {cyan}{:>width$} |{reset} {line_text}\n",
            position.line,
            cyan = p.cyan,
            reset = p.reset
        ));
        out.push_str(&format!(
            "  {cyan}{:>width$} |{reset} {}{red}^{reset}\n",
            "",
            " ".repeat(position.column.saturating_sub(1) as usize),
            cyan = p.cyan,
            red = p.red,
            reset = p.reset
        ));
    }
    out
}
