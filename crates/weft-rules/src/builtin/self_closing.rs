//! Self-closing element rules
//!
//! - Void elements (`<img>`, `<br>`, ...) written as open tags
//! - Any other element with no children written as `<tag></tag>`

use weft_core::ast::{Node, NodeKind, SyntaxKind, is_void_element};
use weft_core::diagnostics::{Category, DiagnosticCollector, FixSuggestion, MessageId};
use weft_core::path::NodePath;
use weft_core::rules::Transform;

/// Rule name for void elements
pub const PREFER_SELF_CLOSING: &str = "html/prefer-self-closing";

/// Rule name for childless elements
pub const ADD_SELF_CLOSING: &str = "ast/add-self-closing";

pub const HTML_PREFER_SELF_CLOSING: Category = Category::new("HTML_PREFER_SELF_CLOSING");
pub const AST_ADD_SELF_CLOSING: Category = Category::new("AST_ADD_SELF_CLOSING");

pub const VOID_NOT_SELF_CLOSING: MessageId = MessageId::new("html.voidElementNotSelfClosing");
pub const EMPTY_NOT_SELF_CLOSING: MessageId = MessageId::new("ast.emptyElementNotSelfClosing");

pub fn is_element(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Element
}

fn self_closed(node: &Node) -> Node {
    node.with_fields(|kind| {
        if let NodeKind::Element(element) = kind {
            element.self_closing = true;
        }
    })
}

/// `<img>` becomes `<img />`
pub fn prefer_self_closing(path: &NodePath<'_>, collector: &mut DiagnosticCollector) -> Transform {
    let node = path.node();
    let Some(element) = node.as_element() else {
        return Transform::Unchanged;
    };
    if element.self_closing || node.has_children() || !is_void_element(&element.tag) {
        return Transform::Unchanged;
    }

    let result = collector.add_fixable_diagnostic(
        path,
        HTML_PREFER_SELF_CLOSING,
        VOID_NOT_SELF_CLOSING,
        FixSuggestion::new(node.clone(), self_closed(node)),
    );
    Transform::reported(path, result)
}

/// `<div></div>` becomes `<div />`
///
/// Void elements are left to [`prefer_self_closing`] so an `<img>` is
/// reported once.
pub fn add_self_closing(path: &NodePath<'_>, collector: &mut DiagnosticCollector) -> Transform {
    let node = path.node();
    let Some(element) = node.as_element() else {
        return Transform::Unchanged;
    };
    if element.self_closing || node.has_children() || is_void_element(&element.tag) {
        return Transform::Unchanged;
    }

    let result = collector.add_fixable_diagnostic(
        path,
        AST_ADD_SELF_CLOSING,
        EMPTY_NOT_SELF_CLOSING,
        FixSuggestion::new(node.clone(), self_closed(node)),
    );
    Transform::reported(path, result)
}
