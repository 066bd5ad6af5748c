//! Variable groups.
//!
//! A group is the static category of a workspace variable (`Vector`, `Matrix`, ...).
//! Groups are compared by name and are cheap to clone, so descriptors and
//! resolution tables can hold them by value.

use std::fmt;
use std::sync::Arc;

/// The type tag of a workspace variable or formal slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Group(Arc<str>);

impl Group {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Group {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Group {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
