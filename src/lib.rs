#![forbid(unsafe_code)]
//! Control-file compiler
//!
//! Parses control files (method calls binding workspace variables, grouped into
//! agendas) against a registry of methods and variables. The parsing itself lives
//! in `controlfile_syntax`; this crate adds what a command-line front end needs:
//! registry manifests, a canonical formatter, a JSON agenda dump and the `ctlfile`
//! binary's command layer.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod dump;
pub mod format;
pub mod manifest;

pub use controlfile_syntax::{ast, diagnostics, include, parser};

pub use manifest::{Manifest, ManifestError, Registry};
