//! Per-kind serialization of nodes into [`TokenDocument`]s
//!
//! Dispatch is an exhaustive match over [`NodeKind`], so adding a kind to
//! the schema fails to compile here until it has a layout. The parent node
//! is passed down only for contextual decisions such as member separators.
//!
//! Breakable spaces only appear inside groups; spaces that must never
//! break are part of the surrounding token.

use weft_core::ast::{
    Attribute, Element, Node, NodeKind, PropertySignature, SyntaxKind, TypeParameter,
};

use crate::format_element::{
    TokenDocument, concat, group, hard_line_break, space, text, token,
};

/// Lay out `node`; `parent` is the node it is a child of, if any
pub fn tokenize(node: &Node, parent: Option<&Node>) -> TokenDocument {
    match node.payload() {
        NodeKind::Document => document(node),
        NodeKind::Element(element) => tokenize_element(node, element),
        NodeKind::Text(value) => text(value),
        NodeKind::Comment(value) => comment(value),
        NodeKind::Interface { name } => interface(node, name),
        NodeKind::TypeParameterList => type_parameter_list(node),
        NodeKind::TypeParameter(param) => type_parameter(param),
        NodeKind::InterfaceBody => interface_body(node),
        NodeKind::PropertySignature(property) => property_signature(property, parent),
    }
}

/// Top-level children on their own lines, with a trailing newline
fn document(node: &Node) -> TokenDocument {
    let mut docs = Vec::with_capacity(node.children().len() * 2);
    for child in node.children() {
        docs.push(tokenize(child, Some(node)));
        docs.push(hard_line_break());
    }
    concat(docs)
}

fn tokenize_element(node: &Node, element: &Element) -> TokenDocument {
    let mut head = vec![token("<"), text(&element.tag)];
    for attribute in &element.attributes {
        head.push(space());
        head.push(tokenize_attribute(attribute));
    }
    let head = group(1, head);

    // children always print; a self-closing flag on a parent is ignored
    if element.self_closing && !node.has_children() {
        return concat(vec![head, token(" />")]);
    }

    let close = concat(vec![token("</"), text(&element.tag), token(">")]);
    let children = node.children();

    if children.iter().all(|c| c.kind() == SyntaxKind::Text) {
        let mut docs = Vec::with_capacity(children.len() + 3);
        docs.push(head);
        docs.push(token(">"));
        docs.extend(children.iter().map(|c| tokenize(c, Some(node))));
        docs.push(close);
        return concat(docs);
    }

    concat(vec![
        head,
        token(">"),
        indented_lines(node),
        hard_line_break(),
        close,
    ])
}

fn tokenize_attribute(attribute: &Attribute) -> TokenDocument {
    match &attribute.value {
        None => text(&attribute.name),
        Some(value) if value.contains('"') && !value.contains('\'') => {
            text(&format!("{}='{value}'", attribute.name))
        }
        Some(value) => text(&format!(
            "{}=\"{}\"",
            attribute.name,
            value.replace('"', "&quot;")
        )),
    }
}

/// Each child of `node` on its own line, one level deeper
fn indented_lines(node: &Node) -> TokenDocument {
    let mut docs = Vec::with_capacity(node.children().len() * 2);
    for child in node.children() {
        docs.push(hard_line_break());
        docs.push(tokenize(child, Some(node)));
    }
    group(1, docs)
}

fn comment(value: &str) -> TokenDocument {
    let value = value.trim();
    if value.is_empty() {
        return token("<!---->");
    }
    concat(vec![token("<!-- "), text(value), token(" -->")])
}

fn interface(node: &Node, name: &str) -> TokenDocument {
    let mut docs = vec![token("interface "), text(name)];
    for child in node.children() {
        if child.kind() == SyntaxKind::InterfaceBody {
            docs.push(token(" "));
        }
        docs.push(tokenize(child, Some(node)));
    }
    concat(docs)
}

fn type_parameter_list(node: &Node) -> TokenDocument {
    let mut docs = vec![token("<")];
    for (index, param) in node.children().iter().enumerate() {
        if index > 0 {
            docs.push(token(","));
            docs.push(space());
        }
        docs.push(tokenize(param, Some(node)));
    }
    docs.push(token(">"));
    group(1, docs)
}

fn type_parameter(param: &TypeParameter) -> TokenDocument {
    let mut docs = vec![text(&param.name)];
    if let Some(constraint) = &param.constraint {
        docs.extend([space(), token("extends"), space(), text(constraint)]);
    }
    if let Some(default) = &param.default {
        docs.extend([space(), token("="), space(), text(default)]);
    }
    group(1, docs)
}

fn interface_body(node: &Node) -> TokenDocument {
    if node.children().is_empty() {
        return token("{}");
    }
    concat(vec![
        token("{"),
        indented_lines(node),
        hard_line_break(),
        token("}"),
    ])
}

fn property_signature(property: &PropertySignature, parent: Option<&Node>) -> TokenDocument {
    let mut docs = Vec::with_capacity(6);
    if property.readonly {
        docs.push(token("readonly "));
    }
    docs.push(text(&property.name));
    if property.optional {
        docs.push(token("?"));
    }
    if let Some(annotation) = &property.annotation {
        docs.push(token(": "));
        docs.push(text(annotation));
    }
    // members are separated by `;` only inside an interface body
    if parent.is_some_and(|p| p.kind() == SyntaxKind::InterfaceBody) {
        docs.push(token(";"));
    }
    concat(docs)
}
