//! Line accumulator used by renderers.

use serde_json::Value;

/// Collects snippet lines, each prefixed with `level` copies of the indent unit.
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent: String,
    lines: Vec<String>,
}

impl CodeBuilder {
    pub fn new(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.push_indented(0, line)
    }

    pub fn push_indented(&mut self, level: usize, line: impl AsRef<str>) -> &mut Self {
        self.lines
            .push(format!("{}{}", self.indent.repeat(level), line.as_ref()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

/// Double-quoted string literal with JSON escaping; valid in Java and JS.
pub fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
