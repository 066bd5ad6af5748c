//! Output writer with indentation tracking

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    output: String,
    indent_level: usize,
    config: FormatConfig,
    at_line_start: bool,
    /// Characters on the current line, indentation included
    current_line_length: usize,
}

impl FormatWriter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
            current_line_length: 0,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.current_line_length = width;
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
        self.current_line_length += s.chars().count();
    }

    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
        self.current_line_length = 0;
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Check if current line would exceed max length with additional text
    pub fn would_exceed_line_length(&self, additional: usize) -> bool {
        let current = if self.at_line_start {
            self.indent_level * self.config.indent_width
        } else {
            self.current_line_length
        };
        current + additional > self.config.line_length
    }
}
