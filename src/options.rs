use crate::constants::{DEFAULT_INDENT, MAX_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }

    pub fn get_spaces(&self) -> usize {
        match self {
            Indent::Spaces(count) => *count,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(DEFAULT_INDENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Compact,
    Pretty,
}

/// How finite numbers are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Shortest text that parses back to the same `f64`.
    #[default]
    Shortest,
    /// `printf("%g")`: six significant digits, exponent form outside `[1e-4, 1e6)`.
    General,
}

/// How NaN and the infinities are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinite {
    #[default]
    Null,
    /// `"NaN"`, `"Infinity"` and `"-Infinity"`.
    String,
}

#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    pub style: Style,
    pub indent: Indent,
    pub number_format: NumberFormat,
    pub non_finite: NonFinite,
    pub ascii_only: bool,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self::default().with_style(Style::Pretty)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn with_non_finite(mut self, non_finite: NonFinite) -> Self {
        self.non_finite = non_finite;
        self
    }

    /// Escape every non-ASCII code point and control byte as `\uXXXX`.
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub line_comments: bool,
    pub block_comments: bool,
    pub intern_strings: bool,
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject both comment forms.
    pub fn strict() -> Self {
        Self::default()
            .with_line_comments(false)
            .with_block_comments(false)
    }

    pub fn with_line_comments(mut self, enabled: bool) -> Self {
        self.line_comments = enabled;
        self
    }

    pub fn with_block_comments(mut self, enabled: bool) -> Self {
        self.block_comments = enabled;
        self
    }

    pub fn with_intern_strings(mut self, enabled: bool) -> Self {
        self.intern_strings = enabled;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            line_comments: true,
            block_comments: true,
            intern_strings: true,
            max_depth: MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_parse_defaults_are_permissive() {
        let opts = ParseOptions::default();
        assert!(opts.line_comments);
        assert!(opts.block_comments);
        assert!(opts.intern_strings);
        assert_eq!(opts.max_depth, MAX_DEPTH);
    }

    #[rstest::rstest]
    fn test_strict_disables_comments_only() {
        let opts = ParseOptions::strict();
        assert!(!opts.line_comments);
        assert!(!opts.block_comments);
        assert!(opts.intern_strings);
    }

    #[rstest::rstest]
    fn test_serialize_builders() {
        let opts = SerializeOptions::pretty()
            .with_indent(Indent::spaces(4))
            .with_non_finite(NonFinite::String)
            .with_number_format(NumberFormat::General);
        assert_eq!(opts.style, Style::Pretty);
        assert_eq!(opts.indent.get_spaces(), 4);
        assert_eq!(opts.non_finite, NonFinite::String);
        assert_eq!(opts.number_format, NumberFormat::General);
        assert!(!opts.ascii_only);
    }
}
