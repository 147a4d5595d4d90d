//! Snapshot tests for rendered reports and formatted output of fixed trees

use insta::assert_snapshot;
use weft_core::ast::Node;
use weft_core::{Engine, EngineConfig, TextRange, TextSize};
use weft_formatter::format_tree;
use weft_rules::{default_catalog, default_registry};

fn span(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

fn engine(apply_fixes: bool) -> Engine {
    let config = EngineConfig {
        apply_fixes,
        ..EngineConfig::default()
    };
    Engine::new(default_registry().unwrap(), config).unwrap()
}

/// `<img><div></div><!----><interface Empty {}` with source spans
fn mixed() -> Node {
    Node::document(vec![
        Node::element("img", vec![], false, vec![]).with_span(span(0, 5)),
        Node::element("div", vec![], false, vec![]).with_span(span(6, 17)),
        Node::comment("").with_span(span(18, 25)),
        Node::interface("Empty", None, Node::interface_body(vec![])).with_span(span(26, 44)),
    ])
    .with_span(span(0, 44))
}

#[test]
fn test_describe_only_report() {
    let outcome = engine(false).run(mixed()).unwrap();

    assert_snapshot!(outcome.report().render(&default_catalog()), @r"
    0..5 HTML_PREFER_SELF_CLOSING: Void elements should be self-closing [fixable]
    6..17 AST_ADD_SELF_CLOSING: Elements without children should be self-closing [fixable]
    18..25 HTML_NO_EMPTY_COMMENT: Empty comments should be removed [fixable]
    26..44 TS_NO_EMPTY_INTERFACE: Interfaces should declare at least one member
    ");
}

#[test]
fn test_fixed_report_and_output() {
    let outcome = engine(true).run(mixed()).unwrap();

    assert_snapshot!(outcome.report().render(&default_catalog()), @r"
    0..5 HTML_PREFER_SELF_CLOSING: Void elements should be self-closing [fixed]
    6..17 AST_ADD_SELF_CLOSING: Elements without children should be self-closing [fixed]
    18..25 HTML_NO_EMPTY_COMMENT: Empty comments should be removed [fixed]
    26..44 TS_NO_EMPTY_INTERFACE: Interfaces should declare at least one member
    ");

    assert_snapshot!(format_tree(&outcome.tree), @r"
    <img />
    <div />
    interface Empty {}
    ");
}

#[test]
fn test_report_json() {
    let tree = Node::document(vec![
        Node::element("img", vec![], false, vec![]).with_span(span(0, 5)),
    ]);
    let outcome = engine(false).run(tree).unwrap();

    assert_snapshot!(outcome.report().to_json().unwrap(), @r#"
    {
      "entries": [
        {
          "category": "HTML_PREFER_SELF_CLOSING",
          "span": {
            "start": 0,
            "end": 5
          },
          "node": [
            0
          ],
          "message": "html.voidElementNotSelfClosing",
          "hasFix": true,
          "fixStatus": "available"
        }
      ]
    }
    "#);
}

#[test]
fn test_unknown_message_falls_back_to_id() {
    let tree = Node::document(vec![Node::element("br", vec![], false, vec![])]);
    let outcome = engine(false).run(tree).unwrap();

    let rendered = outcome
        .report()
        .render(&weft_core::StaticCatalog::new());
    assert_eq!(
        rendered,
        "0..0 HTML_PREFER_SELF_CLOSING: html.voidElementNotSelfClosing [fixable]\n"
    );
}
