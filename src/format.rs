//! Whitespace policy shared by the value encoder and the document renderer.
//!
//! Formatting only ever changes whitespace: a space after `:` and `,`,
//! newlines, and `indent_width` spaces per nesting level.

pub const DEFAULT_INDENT_WIDTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatting {
    #[default]
    None,
    Indented,
}

/// A formatting mode paired with its indent width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub formatting: Formatting,
    pub indent_width: u8,
}

impl Layout {
    pub const COMPACT: Layout = Layout { formatting: Formatting::None, indent_width: DEFAULT_INDENT_WIDTH };

    pub fn new(formatting: Formatting, indent_width: u8) -> Self {
        Self { formatting, indent_width }
    }

    pub fn indented(indent_width: u8) -> Self {
        Self::new(Formatting::Indented, indent_width)
    }

    pub fn is_indented(&self) -> bool {
        self.formatting == Formatting::Indented
    }

    /// `" "` when indented, nothing otherwise.
    pub fn space(&self) -> &'static str {
        if self.is_indented() { " " } else { "" }
    }

    pub fn push_indent(&self, out: &mut String, level: usize) {
        if self.is_indented() {
            let n = level * self.indent_width as usize;
            out.extend(std::iter::repeat_n(' ', n));
        }
    }

    /// Newline followed by the indentation of `level`; no-op in compact mode.
    pub fn push_line_break(&self, out: &mut String, level: usize) {
        if self.is_indented() {
            out.push('\n');
            self.push_indent(out, level);
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::COMPACT
    }
}

impl From<Formatting> for Layout {
    fn from(formatting: Formatting) -> Self {
        Self::new(formatting, DEFAULT_INDENT_WIDTH)
    }
}
