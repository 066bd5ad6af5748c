//! Formatting configuration for canonical control text.

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per agenda nesting level
    pub indent_width: usize,
    /// Maximum line length for single-line keyword blocks
    pub line_length: usize,
    /// How keyword bindings are laid out
    pub keyword_layout: KeywordLayout,
}

/// Layout of a statement's keyword bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordLayout {
    /// One line when it fits within `line_length`, one binding per line otherwise
    Auto,
    /// Always `Name(..) { a = 1, b = 2 }`
    Inline,
    /// Always one binding per line
    Multiline,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            line_length: 100,
            keyword_layout: KeywordLayout::Auto,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_line_length(mut self, length: usize) -> Self {
        self.line_length = length;
        self
    }

    pub fn with_keyword_layout(mut self, layout: KeywordLayout) -> Self {
        self.keyword_layout = layout;
        self
    }
}
