use crate::num::number::write_number_into;
use crate::options::{SerializeOptions, Style};
use crate::text::string::escape_string_into;

pub(crate) struct Writer {
    buffer: String,
    options: SerializeOptions,
    indent_unit: String,
    indent_cache: Vec<String>,
}

impl Writer {
    pub fn new(options: SerializeOptions) -> Self {
        let indent_unit = " ".repeat(options.indent.get_spaces());
        Self {
            buffer: String::new(),
            options,
            indent_unit,
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn is_pretty(&self) -> bool {
        self.options.style == Style::Pretty
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn write_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    /// Line break in pretty mode, nothing in compact mode.
    pub fn write_newline(&mut self) {
        if self.is_pretty() {
            self.buffer.push('\n');
        }
    }

    pub fn write_indent(&mut self, depth: usize) {
        if depth == 0 || !self.is_pretty() || self.indent_unit.is_empty() {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer.push_str(&self.indent_cache[depth]);
    }

    pub fn write_colon(&mut self) {
        self.buffer
            .push_str(if self.is_pretty() { " : " } else { ":" });
    }

    pub fn write_quoted_string(&mut self, s: &str) {
        self.buffer.push('"');
        escape_string_into(&mut self.buffer, s, self.options.ascii_only);
        self.buffer.push('"');
    }

    pub fn write_number(&mut self, n: f64) {
        write_number_into(
            &mut self.buffer,
            n,
            self.options.number_format,
            self.options.non_finite,
        );
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => {
                    let mut s = String::with_capacity(prev.len() + self.indent_unit.len());
                    s.push_str(prev);
                    s.push_str(&self.indent_unit);
                    s
                }
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}
