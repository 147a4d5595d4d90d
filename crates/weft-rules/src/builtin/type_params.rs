//! Type parameter rules

use weft_core::ast::{NodeKind, SyntaxKind};
use weft_core::diagnostics::{Category, DiagnosticCollector, FixSuggestion, MessageId};
use weft_core::path::NodePath;
use weft_core::rules::Transform;

/// Rule name for constraints that constrain nothing
pub const NO_UNKNOWN_CONSTRAINT: &str = "ts/no-unknown-constraint";

pub const TS_NO_UNNECESSARY_CONSTRAINT: Category = Category::new("TS_NO_UNNECESSARY_CONSTRAINT");

pub const UNNECESSARY_CONSTRAINT: MessageId = MessageId::new("ts.unnecessaryConstraint");

/// Constraints every type already satisfies
const TOP_TYPES: [&str; 2] = ["unknown", "any"];

pub fn is_type_parameter(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::TypeParameter
}

/// `T extends unknown` becomes `T`
pub fn no_unknown_constraint(
    path: &NodePath<'_>,
    collector: &mut DiagnosticCollector,
) -> Transform {
    let node = path.node();
    let Some(param) = node.as_type_parameter() else {
        return Transform::Unchanged;
    };
    let Some(constraint) = param.constraint.as_deref() else {
        return Transform::Unchanged;
    };
    if !TOP_TYPES.contains(&constraint.trim()) {
        return Transform::Unchanged;
    }

    let fixed = node.with_fields(|kind| {
        if let NodeKind::TypeParameter(param) = kind {
            param.constraint = None;
        }
    });
    let result = collector.add_fixable_diagnostic(
        path,
        TS_NO_UNNECESSARY_CONSTRAINT,
        UNNECESSARY_CONSTRAINT,
        FixSuggestion::new(node.clone(), fixed),
    );
    Transform::reported(path, result)
}
