//! Parsed agenda structure.
//!
//! Statements refer to methods and variables by registry id; names are looked up
//! through the registries the agenda was parsed against.

use std::fmt;
use std::sync::Arc;

use controlfile_core::{MethodId, Value, VarId};

/// A location in a control file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The position one column to the right, on the same line.
    pub fn next_column(&self) -> Self {
        Self {
            file: Arc::clone(&self.file),
            line: self.line,
            column: self.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// What follows a statement's variable list.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementBody {
    /// One value per keyword of the resolved method, in declaration order.
    Keywords(Vec<Value>),
    /// Nested agenda of an agenda-bodied method.
    Agenda(Agenda),
}

/// One resolved method call.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The concrete (resolved) method.
    pub method: MethodId,
    /// Where the method name starts.
    pub position: Position,
    pub outputs: Vec<VarId>,
    pub inputs: Vec<VarId>,
    pub body: StatementBody,
}

impl Statement {
    /// Keyword values, empty for agenda-bodied methods.
    pub fn keyword_values(&self) -> &[Value] {
        match &self.body {
            StatementBody::Keywords(values) => values,
            StatementBody::Agenda(_) => &[],
        }
    }

    pub fn agenda(&self) -> Option<&Agenda> {
        match &self.body {
            StatementBody::Agenda(agenda) => Some(agenda),
            StatementBody::Keywords(_) => None,
        }
    }

    /// Structural equality that ignores source positions.
    pub fn binds_like(&self, other: &Statement) -> bool {
        self.method == other.method
            && self.outputs == other.outputs
            && self.inputs == other.inputs
            && match (&self.body, &other.body) {
                (StatementBody::Keywords(a), StatementBody::Keywords(b)) => a == b,
                (StatementBody::Agenda(a), StatementBody::Agenda(b)) => a.binds_like(b),
                _ => false,
            }
    }
}

/// An ordered list of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Agenda {
    pub statements: Vec<Statement>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Structural equality that ignores source positions.
    pub fn binds_like(&self, other: &Agenda) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.binds_like(b))
    }
}

impl<'a> IntoIterator for &'a Agenda {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
