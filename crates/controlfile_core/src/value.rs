//! Keyword value kinds and parsed keyword values.
//!
//! Every keyword of a method declares a [`ValueKind`]; the parser dispatches on it
//! to pick the lexer primitive, and stores the outcome as a [`Value`].
//!
//! ## Notes
//! - `Display` for [`Value`] writes the literal form accepted by the control-file
//!   lexer, so a value printed into a control file parses back to an equal value.
//!   Strings are written verbatim between double quotes: the syntax has no escapes,
//!   so strings holding `"` or a line break have no literal form.

use std::fmt;

/// The declared shape of a keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    StringList,
    IntegerList,
    FloatList,
}

impl ValueKind {
    pub const ALL: [ValueKind; 6] = [
        ValueKind::String,
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::StringList,
        ValueKind::IntegerList,
        ValueKind::FloatList,
    ];

    /// Canonical spelling, as used by registry manifests.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::String => "String",
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::StringList => "StringList",
            ValueKind::IntegerList => "IntegerList",
            ValueKind::FloatList => "FloatList",
        }
    }

    pub fn from_name(name: &str) -> Option<ValueKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn is_list(self) -> bool {
        matches!(self, ValueKind::StringList | ValueKind::IntegerList | ValueKind::FloatList)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed keyword value. Immutable once produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    StringList(Vec<String>),
    IntegerList(Vec<i64>),
    FloatList(Vec<f64>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::StringList(_) => ValueKind::StringList,
            Value::IntegerList(_) => ValueKind::IntegerList,
            Value::FloatList(_) => ValueKind::FloatList,
        }
    }
}

/// Write a float so that it always reads back as a float literal.
///
/// `{:?}` already yields the shortest round-tripping form and keeps a `.0` or an
/// exponent on integral values (`1.0`, `1e20`).
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    write!(f, "{value:?}")
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::StringList(items) => write_list(f, items, |f, s| write!(f, "\"{s}\"")),
            Value::IntegerList(items) => write_list(f, items, |f, i| write!(f, "{i}")),
            Value::FloatList(items) => write_list(f, items, |f, x| write_float(f, *x)),
        }
    }
}
