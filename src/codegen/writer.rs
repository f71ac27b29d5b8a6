//! Line-oriented output buffer for generated JavaScript.
//!
//! Two spaces per level. The nesting level is tracked exactly, but the
//! whitespace written for it is clamped to `max_indent` levels.

pub const DEFAULT_MAX_INDENT: usize = 50;

pub struct CodeWriter {
    buf: String,
    depth: usize,
    max_indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::with_max_indent(DEFAULT_MAX_INDENT)
    }

    pub fn with_max_indent(max_indent: usize) -> Self {
        CodeWriter {
            buf: String::with_capacity(4096),
            depth: 0,
            max_indent,
        }
    }

    /// Write `text` on its own line at the current indentation.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth.min(self.max_indent) {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// `header {`, or a bare `{` when `header` is empty; then nest.
    pub fn open(&mut self, header: &str) {
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(&format!("{} {{", header));
        }
        self.depth += 1;
    }

    /// `} text {` at the enclosing level, staying nested
    /// (`} else {`, `} catch (error) {`).
    pub fn reopen(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("}} {} {{", text));
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
