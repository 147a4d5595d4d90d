//! Width-aware printer for [`TokenDocument`]s
//!
//! Each group is decided on its own:
//! - it prints flat when its flat rendering is no wider than the line width
//!   and it contains no `Break`; everything inside it is then flat as well.
//!   Text already on the line before the group does not count
//! - otherwise it breaks: every `Space` that belongs to it directly (not to
//!   a nested group) becomes a newline, and nested groups decide again
//!
//! `Break` always starts a new line, indented by the levels of all
//! enclosing groups. Static tokens are measured by byte length; text
//! from nodes is measured with `unicode-width`.

use unicode_width::UnicodeWidthChar;
use weft_core::EngineConfig;

use crate::format_element::TokenDocument;

/// Printer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Maximum line width before a group breaks
    pub line_width: usize,

    /// Spaces per indentation level; also the width of a tab
    pub indent_width: usize,

    pub use_tabs: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent_width: 2,
            use_tabs: false,
        }
    }
}

impl From<&EngineConfig> for PrinterOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            line_width: config.line_width,
            indent_width: config.indent_width,
            use_tabs: config.use_tabs,
        }
    }
}

/// How the innermost enclosing group was laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Not inside any group
    Free,
    Flat,
    Broken,
}

pub struct Printer {
    options: PrinterOptions,
    buffer: String,
    column: usize,
    line_number: usize,
}

impl Printer {
    pub fn new(options: PrinterOptions) -> Self {
        Self {
            options,
            buffer: String::with_capacity(4096),
            column: 0,
            line_number: 1,
        }
    }

    /// Render `document`; the printer is reset afterwards
    pub fn print(&mut self, document: &TokenDocument) -> String {
        self.print_document(document, 0, Mode::Free);
        let output = std::mem::take(&mut self.buffer);
        self.reset();
        output
    }

    fn print_document(&mut self, document: &TokenDocument, indent: usize, mode: Mode) {
        match document {
            TokenDocument::Token(token) => {
                // ASCII only, so bytes == columns
                self.buffer.push_str(token);
                self.column += token.len();
            }

            TokenDocument::Text(text) => {
                for c in text.chars() {
                    match c {
                        '\n' => self.new_line(0),
                        '\r' => {}
                        '\t' => {
                            self.buffer.push('\t');
                            self.column += self.options.indent_width;
                        }
                        c => {
                            self.buffer.push(c);
                            self.column += c.width().unwrap_or(0);
                        }
                    }
                }
            }

            TokenDocument::Space => match mode {
                Mode::Broken => self.new_line(indent),
                Mode::Free | Mode::Flat => {
                    self.buffer.push(' ');
                    self.column += 1;
                }
            },

            TokenDocument::Break => self.new_line(indent),

            TokenDocument::Concat(docs) => {
                for doc in docs {
                    self.print_document(doc, indent, mode);
                }
            }

            TokenDocument::Group {
                contents,
                indent: levels,
            } => {
                let inner = indent + usize::from(*levels);
                let mode = if mode == Mode::Flat || self.fits(contents) {
                    Mode::Flat
                } else {
                    Mode::Broken
                };
                self.print_document(contents, inner, mode);
            }
        }
    }

    /// Whether `document` prints flat within the line width on its own
    fn fits(&self, document: &TokenDocument) -> bool {
        let mut remaining = self.options.line_width as isize;
        let mut stack = vec![document];

        while let Some(doc) = stack.pop() {
            match doc {
                TokenDocument::Token(token) => remaining -= token.len() as isize,
                TokenDocument::Text(text) => {
                    if text.contains('\n') {
                        return false;
                    }
                    remaining -= text_width(text, self.options.indent_width) as isize;
                }
                TokenDocument::Space => remaining -= 1,
                TokenDocument::Break => return false,
                TokenDocument::Concat(docs) => stack.extend(docs.iter().rev()),
                TokenDocument::Group { contents, .. } => stack.push(contents),
            }
            if remaining < 0 {
                return false;
            }
        }

        true
    }

    fn new_line(&mut self, indent: usize) {
        let trimmed = self.buffer.trim_end_matches([' ', '\t']).len();
        self.buffer.truncate(trimmed);
        self.buffer.push('\n');
        self.line_number += 1;
        self.column = 0;
        self.write_indent(indent);
    }

    fn write_indent(&mut self, levels: usize) {
        if self.options.use_tabs {
            self.buffer.extend(std::iter::repeat_n('\t', levels));
        } else {
            self.buffer
                .extend(std::iter::repeat_n(' ', levels * self.options.indent_width));
        }
        self.column += levels * self.options.indent_width;
    }

    /// Current line number, 1-based
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Reset printer state (keeps options)
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.column = 0;
        self.line_number = 1;
    }
}

/// Display width of `text`, counting a tab as `tab_width` columns
pub fn text_width(text: &str, tab_width: usize) -> usize {
    text.chars()
        .map(|c| match c {
            '\t' => tab_width,
            c => c.width().unwrap_or(0),
        })
        .sum()
}
