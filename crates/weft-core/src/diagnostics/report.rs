//! Diagnostics report and the message catalog interface

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Category, Diagnostic, FixStatus, MessageId};
use crate::path::NodeLocation;

/// Resolves message ids to human-readable templates
///
/// Implemented by the external catalog that owns the wording.
pub trait MessageCatalog {
    fn template(&self, id: &MessageId) -> Option<&str>;
}

/// In-memory catalog, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    templates: IndexMap<MessageId, String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: MessageId, template: impl Into<String>) -> Self {
        self.templates.insert(id, template.into());
        self
    }
}

impl MessageCatalog for StaticCatalog {
    fn template(&self, id: &MessageId) -> Option<&str> {
        self.templates.get(id).map(String::as_str)
    }
}

/// Byte range of a report entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSpan {
    pub start: u32,
    pub end: u32,
}

/// One line of the diagnostics report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub category: Category,
    pub span: ReportSpan,
    pub node: NodeLocation,
    pub message: MessageId,
    pub has_fix: bool,
    pub fix_status: FixStatus,
}

impl From<&Diagnostic> for ReportEntry {
    fn from(diagnostic: &Diagnostic) -> Self {
        let span = diagnostic.location.span;
        Self {
            category: diagnostic.category.clone(),
            span: ReportSpan {
                start: span.start().into(),
                end: span.end().into(),
            },
            node: diagnostic.location.node.clone(),
            message: diagnostic.message.clone(),
            has_fix: diagnostic.has_fix(),
            fix_status: diagnostic.fix_status,
        }
    }
}

/// Ordered diagnostics report, suppressed diagnostics excluded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn from_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        Self {
            entries: diagnostics
                .into_iter()
                .filter(|d| !d.suppressed)
                .map(ReportEntry::from)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that carry a fix, applied or not
    pub fn fixable_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_fix).count()
    }

    pub fn applied_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.fix_status == FixStatus::Applied)
            .count()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|e| &e.category)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One line per entry: `start..end CATEGORY: message [status]`
    ///
    /// Messages missing from the catalog fall back to their id.
    pub fn render(&self, catalog: &dyn MessageCatalog) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            let message = catalog
                .template(&entry.message)
                .unwrap_or(entry.message.as_str());
            output.push_str(&format!(
                "{}..{} {}: {}",
                entry.span.start, entry.span.end, entry.category, message
            ));
            let label = entry.fix_status.label();
            if !label.is_empty() {
                output.push_str(&format!(" [{label}]"));
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{FixSuggestion, SourceLocation};
    use crate::ast::Node;
    use rowan::{TextRange, TextSize};

    fn diagnostic(category: &'static str, start: u32, fixed: bool) -> Diagnostic {
        let location = SourceLocation::new(
            TextRange::new(TextSize::from(start), TextSize::from(start + 4)),
            NodeLocation::from(vec![0]),
        );
        let mut d = Diagnostic::new(Category::new(category), location, MessageId::new(category));
        if fixed {
            let node = Node::text("x");
            d = d.with_fix(FixSuggestion::new(node.clone(), node));
            d.fix_status = FixStatus::Applied;
        }
        d
    }

    #[test]
    fn test_report_skips_suppressed() {
        let mut hidden = diagnostic("B", 5, false);
        hidden.suppressed = true;
        let diagnostics = vec![diagnostic("A", 0, true), hidden];

        let report = Report::from_diagnostics(&diagnostics);
        assert_eq!(report.len(), 1);
        assert_eq!(report.fixable_count(), 1);
        assert_eq!(report.applied_count(), 1);
    }

    #[test]
    fn test_render_uses_catalog() {
        let diagnostics = vec![diagnostic("A", 0, true), diagnostic("B", 10, false)];
        let catalog = StaticCatalog::new().with(MessageId::new("A"), "Use a self-closing tag");

        let rendered = Report::from_diagnostics(&diagnostics).render(&catalog);
        assert_eq!(rendered, "0..4 A: Use a self-closing tag [fixed]\n10..14 B: B\n");
    }

    #[test]
    fn test_json_shape() {
        let report = Report::from_diagnostics(&[diagnostic("A", 0, true)]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let entry = &value["entries"][0];
        assert_eq!(entry["category"], "A");
        assert_eq!(entry["hasFix"], true);
        assert_eq!(entry["fixStatus"], "applied");
        assert_eq!(entry["node"], serde_json::json!([0]));
    }
}
