//! Weft Formatter
//!
//! Renders Weft syntax trees to text: nodes are tokenized into a
//! [`TokenDocument`](format_element::TokenDocument) per kind, then laid out
//! by the width-aware [`Printer`](printer::Printer).

pub mod format_element;
pub mod printer;
pub mod tokenize;

use similar::TextDiff;
use weft_core::{EngineConfig, Node};

pub use format_element::TokenDocument;
pub use printer::{Printer, PrinterOptions};
pub use tokenize::tokenize;

/// Formats whole trees with fixed printer options
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: PrinterOptions,
}

impl Formatter {
    pub fn new(options: PrinterOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(PrinterOptions::from(config))
    }

    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    /// Render `tree` to text
    pub fn format(&self, tree: &Node) -> String {
        let document = tokenize(tree, None);
        let output = Printer::new(self.options.clone()).print(&document);
        tracing::debug!("Formatted {} nodes into {} bytes", tree.subtree_size(), output.len());
        output
    }

    /// Whether `source` is already exactly how `tree` formats
    pub fn check(&self, tree: &Node, source: &str) -> bool {
        self.format(tree) == source
    }

    /// Unified diff from `before` to `after`; empty when they are equal
    pub fn diff(&self, before: &str, after: &str) -> String {
        if before == after {
            return String::new();
        }
        TextDiff::from_lines(before, after)
            .unified_diff()
            .context_radius(3)
            .header("original", "formatted")
            .to_string()
    }
}

/// Format `tree` with default options
pub fn format_tree(tree: &Node) -> String {
    Formatter::default().format(tree)
}
