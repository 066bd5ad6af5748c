//! Parser configuration.

/// Reserved statement name that splices another file into the current agenda.
pub const INCLUDE_DIRECTIVE: &str = "INCLUDE";

/// Historical name of the outermost method of a control file.
pub const DEFAULT_ENTRY_POINT: &str = "Arts";

/// Default bound on nested agenda bodies plus include chains.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Method the outermost statement must resolve to.
    pub entry_point: String,
    /// Deepest allowed nesting of agenda bodies and includes.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
