//! Syntax frontend for control files: cursor, lexer primitives, parser, diagnostics.
//!
//! A control file is a single outermost statement (by default `Arts { ... }`) whose
//! agenda body lists method calls. Parsing resolves every method and workspace
//! variable against the registries from `controlfile_core` and produces an
//! [`ast::Agenda`] ready for execution.
//!
//! ## Notes
//! - Parsing stops at the first error; every failure is a [`diagnostics::CompileError`]
//!   carrying its kind and source position.
//! - Includes are expanded through an [`include::IncludeResolver`], so the parser
//!   never touches the file system on its own.
//!
//! ## Examples
//! ```rust
//! use controlfile_core::{MethodDescriptor, MethodRegistry, VariableRegistry};
//! use controlfile_syntax::include::InMemoryResolver;
//! use controlfile_syntax::parser::{Parser, ParserConfig};
//!
//! let mut methods = MethodRegistry::new();
//! methods.insert(MethodDescriptor::new("Arts").with_agenda_body()).unwrap();
//! let variables = VariableRegistry::new();
//! let resolver = InMemoryResolver::new();
//!
//! let mut parser = Parser::new(&methods, &variables, &resolver, ParserConfig::default());
//! let agenda = parser.parse_main("main.arts", "Arts {}\n").unwrap();
//! assert!(agenda.is_empty());
//! ```

pub mod ast;
pub mod cursor;
pub mod diagnostics;
pub mod include;
pub mod lexer;
pub mod parser;
