//! End-to-end tests: built-in rules driven by the engine

use weft_core::ast::{NodeKind, SyntaxKind};
use weft_core::diagnostics::{Category, DiagnosticCollector, FixStatus, FixSuggestion, MessageId};
use weft_core::{
    Engine, EngineConfig, FixApplier, Node, NodeLocation, NodePath, RuleRegistry, Transform,
};
use weft_formatter::format_tree;
use weft_rules::builtin::{
    AST_ADD_SELF_CLOSING, HTML_NO_EMPTY_COMMENT, HTML_PREFER_SELF_CLOSING,
    TS_NO_DUPLICATE_MEMBER, TS_NO_EMPTY_INTERFACE, TS_NO_UNNECESSARY_CONSTRAINT,
};
use weft_rules::default_registry;

fn engine(apply_fixes: bool) -> Engine {
    let config = EngineConfig {
        apply_fixes,
        ..EngineConfig::default()
    };
    Engine::new(default_registry().unwrap(), config).unwrap()
}

fn element(tag: &str, self_closing: bool) -> Node {
    Node::element(tag, vec![], self_closing, vec![])
}

fn categories(outcome: &weft_core::EngineOutcome) -> Vec<Category> {
    outcome.report().categories().cloned().collect()
}

fn location(indices: &[u32]) -> NodeLocation {
    NodeLocation::from(indices.to_vec())
}

#[test]
fn test_void_element_becomes_self_closing() {
    let tree = Node::document(vec![element("img", false)]);
    let outcome = engine(true).run(tree).unwrap();

    assert_eq!(outcome.tree.children()[0], element("img", true));

    let report = outcome.report();
    assert_eq!(report.len(), 1);
    let entry = &report.entries[0];
    assert_eq!(entry.category, HTML_PREFER_SELF_CLOSING);
    assert!(entry.has_fix);
    assert_eq!(entry.fix_status, FixStatus::Applied);
    assert!(outcome.converged);
}

#[test]
fn test_empty_element_becomes_self_closing() {
    let tree = Node::document(vec![element("div", false)]);
    let outcome = engine(true).run(tree).unwrap();

    assert_eq!(outcome.tree.children()[0], element("div", true));
    assert_eq!(categories(&outcome), vec![AST_ADD_SELF_CLOSING]);
    assert_eq!(outcome.report().applied_count(), 1);
}

#[test]
fn test_self_closing_element_is_left_alone() {
    let tree = Node::document(vec![element("div", true)]);
    let outcome = engine(true).run(tree.clone()).unwrap();

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.iterations, 1);
    assert!(outcome.tree.ptr_eq(&tree));
}

#[test]
fn test_independent_fixes_apply_in_one_pass() {
    let tree = Node::document(vec![
        element("div", false),
        element("br", false),
        Node::interface(
            "Box",
            Some(Node::type_parameter_list(vec![Node::type_parameter(
                "T",
                Some("unknown"),
                None,
            )])),
            Node::interface_body(vec![Node::property("value", Some("T"))]),
        ),
    ]);
    let outcome = engine(true).run(tree).unwrap();

    assert_eq!(
        categories(&outcome),
        vec![
            AST_ADD_SELF_CLOSING,
            HTML_PREFER_SELF_CLOSING,
            TS_NO_UNNECESSARY_CONSTRAINT
        ]
    );
    assert_eq!(outcome.report().applied_count(), 3);
    // all fixes landed in the first pass; the second found nothing
    assert_eq!(outcome.iterations, 2);
    assert_eq!(
        format_tree(&outcome.tree),
        "<div />\n<br />\ninterface Box<T> {\n  value: T;\n}\n"
    );
}

#[test]
fn test_fixed_tree_is_stable() {
    let tree = Node::document(vec![
        Node::comment(""),
        Node::element("p", vec![], false, vec![element("img", false)]),
    ]);
    let engine = engine(true);

    let once = engine.run(tree).unwrap();
    let printed_once = format_tree(&once.tree);
    let twice = engine.run(once.tree.clone()).unwrap();

    assert_eq!(twice.tree, once.tree);
    assert_eq!(format_tree(&twice.tree), printed_once);
    assert!(twice.report().is_empty());
}

#[test]
fn test_runs_are_deterministic() {
    let tree = || {
        Node::document(vec![
            element("hr", false),
            element("span", false),
            Node::comment(" "),
            Node::interface("Empty", None, Node::interface_body(vec![])),
        ])
    };
    let first = engine(true).run(tree()).unwrap();
    let second = engine(true).run(tree()).unwrap();

    assert_eq!(
        first.report().to_json().unwrap(),
        second.report().to_json().unwrap()
    );
    assert_eq!(format_tree(&first.tree), format_tree(&second.tree));
}

#[test]
fn test_describe_only_leaves_tree_and_counts_fixes() {
    let tree = Node::document(vec![element("img", false), Node::comment("")]);
    let outcome = engine(false).run(tree.clone()).unwrap();

    assert!(outcome.tree.ptr_eq(&tree));
    let report = outcome.report();
    assert_eq!(report.fixable_count(), 2);
    assert_eq!(report.applied_count(), 0);
    assert!(
        report
            .entries
            .iter()
            .all(|e| e.fix_status == FixStatus::Available)
    );
}

#[test]
fn test_empty_comment_is_removed() {
    let tree = Node::document(vec![
        Node::comment("   "),
        Node::element("p", vec![], false, vec![Node::text("hi")]),
    ]);
    let outcome = engine(true).run(tree).unwrap();

    assert_eq!(
        outcome.tree,
        Node::document(vec![Node::element(
            "p",
            vec![],
            false,
            vec![Node::text("hi")]
        )])
    );
    assert_eq!(categories(&outcome), vec![HTML_NO_EMPTY_COMMENT]);
    assert_eq!(outcome.report().applied_count(), 1);
}

#[test]
fn test_duplicate_members_are_dropped() {
    let tree = Node::document(vec![Node::interface(
        "Point",
        None,
        Node::interface_body(vec![
            Node::property("x", Some("number")),
            Node::property("y", Some("number")),
            Node::property("x", Some("string")),
        ]),
    )]);
    let outcome = engine(true).run(tree).unwrap();

    assert_eq!(
        format_tree(&outcome.tree),
        "interface Point {\n  x: number;\n  y: number;\n}\n"
    );
    assert_eq!(categories(&outcome), vec![TS_NO_DUPLICATE_MEMBER]);
}

#[test]
fn test_empty_interface_is_report_only() {
    let tree = Node::document(vec![Node::interface(
        "Marker",
        None,
        Node::interface_body(vec![]),
    )]);
    let outcome = engine(true).run(tree.clone()).unwrap();

    assert!(outcome.tree.ptr_eq(&tree));
    let report = outcome.report();
    assert_eq!(report.len(), 1);
    assert_eq!(report.entries[0].category, TS_NO_EMPTY_INTERFACE);
    assert!(!report.entries[0].has_fix);
}

#[test]
fn test_suppressed_diagnostic_still_fixes() {
    let tree = Node::document(vec![
        Node::comment("weft-ignore"),
        element("br", false),
        element("div", false),
    ]);
    let outcome = engine(true).run(tree).unwrap();

    assert_eq!(outcome.tree.children()[1], element("br", true));
    assert_eq!(outcome.tree.children()[2], element("div", true));
    // only the unsuppressed <div> is reported
    assert_eq!(categories(&outcome), vec![AST_ADD_SELF_CLOSING]);
    let hidden: Vec<_> = outcome.diagnostics.iter().filter(|d| d.suppressed).collect();
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].fix_status, FixStatus::Applied);
}

#[test]
fn test_category_scoped_suppression() {
    let tree = Node::document(vec![
        Node::comment("weft-ignore TS_NO_EMPTY_INTERFACE"),
        element("div", false),
    ]);
    let outcome = engine(false).run(tree).unwrap();
    assert_eq!(categories(&outcome), vec![AST_ADD_SELF_CLOSING]);
}

#[test]
fn test_enabled_categories_filter_rules() {
    let config = EngineConfig {
        apply_fixes: true,
        enabled_categories: Some(["HTML_PREFER_SELF_CLOSING".to_string()].into()),
        ..EngineConfig::default()
    };
    let engine = Engine::new(default_registry().unwrap(), config).unwrap();
    let tree = Node::document(vec![element("img", false), element("div", false)]);

    let outcome = engine.run(tree).unwrap();
    assert_eq!(outcome.tree.children()[0], element("img", true));
    assert_eq!(outcome.tree.children()[1], element("div", false));
    assert_eq!(categories(&outcome), vec![HTML_PREFER_SELF_CLOSING]);
}

#[test]
fn test_stale_suggestion_is_not_applied() {
    let tree = Node::document(vec![element("img", false), element("div", false)]);
    let described = engine(false).run(tree).unwrap();

    // the <img> changed after the diagnostics were collected
    let edited = Node::document(vec![
        Node::element(
            "img",
            vec![weft_core::ast::Attribute::new("alt", "x")],
            false,
            vec![],
        ),
        element("div", false),
    ]);
    let suggestions = described
        .diagnostics
        .iter()
        .filter_map(|d| d.fix.as_ref().map(|fix| (&d.location.node, fix)));
    let outcome = FixApplier::new().apply_suggestions(&edited, suggestions);

    assert_eq!(outcome.tree.children()[0], edited.children()[0]);
    assert_eq!(outcome.tree.children()[1], element("div", true));
    assert!(outcome.stale.contains(&location(&[0])));
    assert!(outcome.applied.contains(&location(&[1])));
}

const TEST_LOWERCASE: Category = Category::new("TEST_LOWERCASE_MEMBER");

fn lowercase_member(path: &NodePath<'_>, collector: &mut DiagnosticCollector) -> Transform {
    let node = path.node();
    let Some(property) = node.as_property_signature() else {
        return Transform::Unchanged;
    };
    if !property.name.chars().any(char::is_uppercase) {
        return Transform::Unchanged;
    }
    let fixed = node.with_fields(|kind| {
        if let NodeKind::PropertySignature(property) = kind {
            property.name = property.name.to_lowercase();
        }
    });
    let result = collector.add_fixable_diagnostic(
        path,
        TEST_LOWERCASE,
        MessageId::new("test.lowercase"),
        FixSuggestion::new(node.clone(), fixed),
    );
    Transform::reported(path, result)
}

#[test]
fn test_member_fix_is_carried_by_body_fix() {
    let mut registry: RuleRegistry = default_registry().unwrap();
    registry
        .register(
            "test/lowercase-member",
            TEST_LOWERCASE,
            |kind| kind == SyntaxKind::PropertySignature,
            Some(lowercase_member),
            None,
        )
        .unwrap();
    let config = EngineConfig {
        apply_fixes: true,
        ..EngineConfig::default()
    };
    let engine = Engine::new(registry, config).unwrap();

    let tree = Node::document(vec![Node::interface(
        "User",
        None,
        Node::interface_body(vec![
            Node::property("Id", Some("string")),
            Node::property("id", Some("number")),
        ]),
    )]);
    let pass = engine.run_pass(&tree).unwrap();
    assert_eq!(pass.edits.len(), 2);

    let outcome = engine.run(tree).unwrap();

    // the body's replacement already carries the renamed member
    assert_eq!(
        format_tree(&outcome.tree),
        "interface User {\n  id: string;\n}\n"
    );
    assert!(outcome.conflicts.is_empty());
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        categories(&outcome),
        vec![TEST_LOWERCASE, TS_NO_DUPLICATE_MEMBER]
    );
    assert_eq!(outcome.report().applied_count(), 2);
}

#[test]
fn test_removed_comment_inside_deduplicated_body_is_reported() {
    let tree = Node::document(vec![Node::interface(
        "Point",
        None,
        Node::interface_body(vec![
            Node::property("x", Some("number")),
            Node::comment(""),
            Node::property("x", Some("string")),
        ]),
    )]);

    let described = engine(false).run(tree.clone()).unwrap();
    let outcome = engine(true).run(tree).unwrap();

    let body = &outcome.tree.children()[0].children()[0];
    assert_eq!(body.children(), &[Node::property("x", Some("number"))]);
    assert_eq!(categories(&described), categories(&outcome));
    assert_eq!(
        categories(&outcome),
        vec![HTML_NO_EMPTY_COMMENT, TS_NO_DUPLICATE_MEMBER]
    );
    assert_eq!(outcome.report().applied_count(), 2);
    assert!(outcome.warnings.is_empty());
}
