//! Comment rules

use weft_core::ast::SyntaxKind;
use weft_core::diagnostics::{Category, DiagnosticCollector, MessageId};
use weft_core::path::NodePath;
use weft_core::rules::Transform;

/// Rule name for empty comments
pub const NO_EMPTY_COMMENT: &str = "html/no-empty-comment";

pub const HTML_NO_EMPTY_COMMENT: Category = Category::new("HTML_NO_EMPTY_COMMENT");

pub const EMPTY_COMMENT: MessageId = MessageId::new("html.emptyComment");

pub fn is_comment(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Comment
}

/// `<!-- -->` is removed when fixes are applied
pub fn no_empty_comment(path: &NodePath<'_>, collector: &mut DiagnosticCollector) -> Transform {
    let Some(text) = path.node().comment_text() else {
        return Transform::Unchanged;
    };
    if !text.trim().is_empty() {
        return Transform::Unchanged;
    }

    if collector.add_removal_diagnostic(path, HTML_NO_EMPTY_COMMENT, EMPTY_COMMENT) {
        path.remove();
    }
    Transform::Reported
}
