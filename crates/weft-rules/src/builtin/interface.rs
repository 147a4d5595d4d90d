//! Interface declaration rules
//!
//! - Interfaces without members
//! - Property signatures declared more than once in the same body

use std::collections::HashSet;

use weft_core::ast::SyntaxKind;
use weft_core::diagnostics::{Category, DiagnosticCollector, FixSuggestion, MessageId};
use weft_core::path::NodePath;
use weft_core::rules::Transform;

/// Rule name for empty interfaces
pub const NO_EMPTY_INTERFACE: &str = "ts/no-empty-interface";

/// Rule name for repeated members
pub const NO_DUPLICATE_MEMBER: &str = "ts/no-duplicate-member";

pub const TS_NO_EMPTY_INTERFACE: Category = Category::new("TS_NO_EMPTY_INTERFACE");
pub const TS_NO_DUPLICATE_MEMBER: Category = Category::new("TS_NO_DUPLICATE_MEMBER");

pub const EMPTY_INTERFACE: MessageId = MessageId::new("ts.emptyInterface");
pub const DUPLICATE_MEMBER: MessageId = MessageId::new("ts.duplicateMember");

pub fn is_interface(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Interface
}

pub fn is_interface_body(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::InterfaceBody
}

/// Report an interface whose body declares nothing
pub fn no_empty_interface(path: &NodePath<'_>, collector: &mut DiagnosticCollector) -> Transform {
    let empty = path
        .node()
        .children()
        .iter()
        .find(|child| child.kind() == SyntaxKind::InterfaceBody)
        .is_some_and(|body| !body.has_children());
    if !empty {
        return Transform::Unchanged;
    }

    collector.add_diagnostic(TS_NO_EMPTY_INTERFACE, path.source_location(), EMPTY_INTERFACE);
    Transform::Reported
}

/// Drop every property signature whose name was already declared
///
/// Runs on exit so it sees members as already fixed by other rules.
pub fn no_duplicate_member(path: &NodePath<'_>, collector: &mut DiagnosticCollector) -> Transform {
    let node = path.node();
    let mut seen = HashSet::new();
    let members: Vec<_> = node
        .children()
        .iter()
        .filter(|member| match member.as_property_signature() {
            Some(property) => seen.insert(property.name.as_str()),
            None => true,
        })
        .cloned()
        .collect();

    if members.len() == node.children().len() {
        return Transform::Unchanged;
    }

    tracing::debug!(
        "Found {} duplicate members at {}",
        node.children().len() - members.len(),
        path.location()
    );
    let result = collector.add_fixable_diagnostic(
        path,
        TS_NO_DUPLICATE_MEMBER,
        DUPLICATE_MEMBER,
        FixSuggestion::new(node.clone(), node.with_children(members)),
    );
    Transform::reported(path, result)
}
