//! Pass-scoped diagnostic collection

use std::collections::BTreeSet;

use super::{Category, Diagnostic, FixStatus, FixSuggestion, MessageId, SourceLocation};
use crate::ast::Node;
use crate::path::NodePath;

/// Comment prefix that suppresses diagnostics on the next sibling subtree
pub const SUPPRESSION_DIRECTIVE: &str = "weft-ignore";

/// Whether fixable diagnostics hand back the fixed node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Record fixes, keep the tree as it is
    #[default]
    DescribeOnly,
    /// Record fixes and return the fixed node to the rule immediately
    ApplyFixes,
}

/// An active suppression scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suppression {
    /// `None` suppresses every category
    categories: Option<BTreeSet<Category>>,
}

impl Suppression {
    pub fn all() -> Self {
        Self { categories: None }
    }

    pub fn only(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: Some(categories.into_iter().collect()),
        }
    }

    /// Parse a comment body such as `weft-ignore` or `weft-ignore A B`
    pub fn parse(comment: &str) -> Option<Self> {
        let rest = comment.trim().strip_prefix(SUPPRESSION_DIRECTIVE)?;
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let categories: BTreeSet<Category> = rest.split_whitespace().map(Category::from).collect();
        if categories.is_empty() {
            Some(Self::all())
        } else {
            Some(Self {
                categories: Some(categories),
            })
        }
    }

    pub fn covers(&self, category: &Category) -> bool {
        self.categories
            .as_ref()
            .is_none_or(|categories| categories.contains(category))
    }
}

/// Accumulates the diagnostics of one pass
///
/// The list is append-only; diagnostics stay in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    mode: FixMode,
    enabled: Option<BTreeSet<Category>>,
    diagnostics: Vec<Diagnostic>,
    suppressions: Vec<Suppression>,
}

impl DiagnosticCollector {
    pub fn new(mode: FixMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Restrict collection to the given categories
    pub fn with_enabled_categories(mut self, enabled: Option<BTreeSet<Category>>) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn mode(&self) -> FixMode {
        self.mode
    }

    pub fn is_enabled(&self, category: &Category) -> bool {
        self.enabled
            .as_ref()
            .is_none_or(|enabled| enabled.contains(category))
    }

    fn is_suppressed(&self, category: &Category) -> bool {
        self.suppressions.iter().any(|s| s.covers(category))
    }

    /// Record a diagnostic without a fix
    pub fn add_diagnostic(
        &mut self,
        category: Category,
        location: SourceLocation,
        message: MessageId,
    ) {
        if !self.is_enabled(&category) {
            tracing::trace!("Dropping diagnostic for disabled category {}", category);
            return;
        }
        let mut diagnostic = Diagnostic::new(category, location, message);
        diagnostic.suppressed = self.is_suppressed(&diagnostic.category);
        self.diagnostics.push(diagnostic);
    }

    /// Record a diagnostic together with its fix
    ///
    /// Returns the node the rule should continue with: `patch.old` in
    /// describe-only mode, `patch.fixed` when fixes are applied. Suppression
    /// hides the diagnostic from reports but does not withhold the fix.
    pub fn add_fixable_diagnostic(
        &mut self,
        path: &NodePath<'_>,
        category: Category,
        message: MessageId,
        patch: FixSuggestion,
    ) -> Node {
        if !self.is_enabled(&category) {
            return patch.old;
        }

        let mut diagnostic =
            Diagnostic::new(category, path.source_location(), message).with_fix(patch.clone());
        diagnostic.suppressed = self.is_suppressed(&diagnostic.category);
        self.diagnostics.push(diagnostic);

        match self.mode {
            FixMode::DescribeOnly => patch.old,
            FixMode::ApplyFixes => patch.fixed,
        }
    }

    /// Record a diagnostic whose fix removes the path's node
    ///
    /// Returns whether the caller should queue the removal, i.e. the
    /// category is enabled and fixes are applied.
    pub fn add_removal_diagnostic(
        &mut self,
        path: &NodePath<'_>,
        category: Category,
        message: MessageId,
    ) -> bool {
        if !self.is_enabled(&category) {
            return false;
        }

        let mut diagnostic = Diagnostic::new(category, path.source_location(), message).with_removal();
        diagnostic.suppressed = self.is_suppressed(&diagnostic.category);
        self.diagnostics.push(diagnostic);

        self.mode == FixMode::ApplyFixes
    }

    pub(crate) fn push_suppression(&mut self, suppression: Suppression) {
        self.suppressions.push(suppression);
    }

    pub(crate) fn pop_suppression(&mut self) {
        self.suppressions.pop();
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Diagnostics carrying a fix, whether or not it will be applied
    pub fn fixable_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.fix_status != FixStatus::None)
            .count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{EditQueue, NodeLocation};
    use rowan::TextRange;
    use std::cell::RefCell;

    const CAT: Category = Category::new("TEST_CATEGORY");

    fn location() -> SourceLocation {
        SourceLocation::new(TextRange::default(), NodeLocation::root())
    }

    #[test]
    fn test_parse_suppression() {
        assert_eq!(Suppression::parse(" weft-ignore "), Some(Suppression::all()));
        let only = Suppression::parse("weft-ignore A B").unwrap();
        assert!(only.covers(&Category::new("A")));
        assert!(!only.covers(&Category::new("C")));
        assert!(Suppression::parse("weft-ignored").is_none());
        assert!(Suppression::parse("todo: weft-ignore").is_none());
    }

    #[test]
    fn test_fixable_diagnostic_by_mode() {
        let old = Node::element("br", vec![], false, vec![]);
        let fixed = Node::element("br", vec![], true, vec![]);
        let edits = RefCell::new(EditQueue::new());
        let root = NodeLocation::root();
        let path = NodePath::root(&old, &root, &edits);

        let mut describe = DiagnosticCollector::new(FixMode::DescribeOnly);
        let got = describe.add_fixable_diagnostic(
            &path,
            CAT,
            MessageId::new("m"),
            FixSuggestion::new(old.clone(), fixed.clone()),
        );
        assert_eq!(got, old);
        assert_eq!(describe.fixable_count(), 1);

        let mut apply = DiagnosticCollector::new(FixMode::ApplyFixes);
        let got = apply.add_fixable_diagnostic(
            &path,
            CAT,
            MessageId::new("m"),
            FixSuggestion::new(old.clone(), fixed.clone()),
        );
        assert_eq!(got, fixed);
        assert_eq!(apply.fixable_count(), 1);
    }

    #[test]
    fn test_removal_diagnostic_by_mode() {
        let node = Node::comment("");
        let edits = RefCell::new(EditQueue::new());
        let root = NodeLocation::root();
        let path = NodePath::root(&node, &root, &edits);

        let mut describe = DiagnosticCollector::new(FixMode::DescribeOnly);
        assert!(!describe.add_removal_diagnostic(&path, CAT, MessageId::new("m")));
        assert_eq!(describe.fixable_count(), 1);

        let mut apply = DiagnosticCollector::new(FixMode::ApplyFixes);
        assert!(apply.add_removal_diagnostic(&path, CAT, MessageId::new("m")));
    }

    #[test]
    fn test_disabled_category_is_dropped() {
        let enabled = BTreeSet::from([Category::new("OTHER")]);
        let mut collector =
            DiagnosticCollector::new(FixMode::ApplyFixes).with_enabled_categories(Some(enabled));
        collector.add_diagnostic(CAT, location(), MessageId::new("m"));
        assert!(collector.is_empty());
    }

    #[test]
    fn test_suppressed_diagnostic_is_flagged() {
        let mut collector = DiagnosticCollector::new(FixMode::DescribeOnly);
        collector.push_suppression(Suppression::only([CAT]));
        collector.add_diagnostic(CAT, location(), MessageId::new("m"));
        collector.add_diagnostic(Category::new("OTHER"), location(), MessageId::new("m"));
        collector.pop_suppression();
        collector.add_diagnostic(CAT, location(), MessageId::new("m"));

        let flags: Vec<bool> = collector.diagnostics().iter().map(|d| d.suppressed).collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
