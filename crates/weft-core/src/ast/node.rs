//! Immutable, structurally shared tree nodes

use std::sync::Arc;

use rowan::TextRange;

use super::kind::{Attribute, Element, NodeKind, PropertySignature, SyntaxKind, TypeParameter};
use crate::path::NodeLocation;

/// One syntactic construct in the tree
///
/// `Node` is a cheap handle (`Arc`) to immutable data. Copying a node with
/// overrides allocates a new node but shares every untouched child.
///
/// Equality is structural: two nodes are equal when their payloads and their
/// children are equal, recursively. Spans are positional metadata and do not
/// take part in equality, so a fixed node equals a freshly parsed one.
#[derive(Debug, Clone)]
pub struct Node(Arc<NodeData>);

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    span: TextRange,
    children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, span: TextRange, children: Vec<Node>) -> Self {
        Self(Arc::new(NodeData {
            kind,
            span,
            children,
        }))
    }

    /// Tag used for dispatch
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind.kind()
    }

    /// Kind-specific fields
    pub fn payload(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn span(&self) -> TextRange {
        self.0.span
    }

    /// Ordered children in document order
    pub fn children(&self) -> &[Node] {
        &self.0.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.0.children.get(index)
    }

    pub fn has_children(&self) -> bool {
        !self.0.children.is_empty()
    }

    /// Copy this node with its payload modified by `overrides`
    ///
    /// Span and children are carried over; children are shared, not cloned.
    pub fn with_fields(&self, overrides: impl FnOnce(&mut NodeKind)) -> Node {
        let mut kind = self.0.kind.clone();
        overrides(&mut kind);
        Node::new(kind, self.0.span, self.0.children.clone())
    }

    /// Copy this node with a new child list
    pub fn with_children(&self, children: Vec<Node>) -> Node {
        Node::new(self.0.kind.clone(), self.0.span, children)
    }

    pub fn with_span(&self, span: TextRange) -> Node {
        Node::new(self.0.kind.clone(), span, self.0.children.clone())
    }

    /// Identity comparison: both handles point at the same allocation
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Follow child indices from this node
    pub fn at(&self, location: &NodeLocation) -> Option<&Node> {
        location
            .indices()
            .iter()
            .try_fold(self, |node, &index| node.child(index as usize))
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Node::subtree_size)
            .sum::<usize>()
    }

    /// Whether `needle` is structurally equal to this node or one below it
    pub fn contains_node(&self, needle: &Node) -> bool {
        self == needle || self.children().iter().any(|child| child.contains_node(needle))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.0.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameter> {
        match &self.0.kind {
            NodeKind::TypeParameter(param) => Some(param),
            _ => None,
        }
    }

    pub fn as_property_signature(&self) -> Option<&PropertySignature> {
        match &self.0.kind {
            NodeKind::PropertySignature(property) => Some(property),
            _ => None,
        }
    }

    /// Text of a comment node
    pub fn comment_text(&self) -> Option<&str> {
        match &self.0.kind {
            NodeKind::Comment(text) => Some(text),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.0.kind == other.0.kind && self.0.children == other.0.children)
    }
}

impl Eq for Node {}

// Constructors used by collaborators that build trees (parsers, fixes, tests).
// They start with an empty span; call `with_span` to position a node.
impl Node {
    pub fn document(children: Vec<Node>) -> Self {
        Node::new(NodeKind::Document, TextRange::default(), children)
    }

    pub fn element(
        tag: impl Into<String>,
        attributes: Vec<Attribute>,
        self_closing: bool,
        children: Vec<Node>,
    ) -> Self {
        Node::new(
            NodeKind::Element(Element {
                tag: tag.into(),
                attributes,
                self_closing,
            }),
            TextRange::default(),
            children,
        )
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::new(NodeKind::Text(value.into()), TextRange::default(), Vec::new())
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Node::new(
            NodeKind::Comment(value.into()),
            TextRange::default(),
            Vec::new(),
        )
    }

    pub fn interface(
        name: impl Into<String>,
        type_parameters: Option<Node>,
        body: Node,
    ) -> Self {
        let mut children = Vec::with_capacity(2);
        children.extend(type_parameters);
        children.push(body);
        Node::new(
            NodeKind::Interface { name: name.into() },
            TextRange::default(),
            children,
        )
    }

    pub fn type_parameter_list(params: Vec<Node>) -> Self {
        Node::new(NodeKind::TypeParameterList, TextRange::default(), params)
    }

    pub fn type_parameter(
        name: impl Into<String>,
        constraint: Option<&str>,
        default: Option<&str>,
    ) -> Self {
        Node::new(
            NodeKind::TypeParameter(TypeParameter {
                name: name.into(),
                constraint: constraint.map(str::to_string),
                default: default.map(str::to_string),
            }),
            TextRange::default(),
            Vec::new(),
        )
    }

    pub fn interface_body(members: Vec<Node>) -> Self {
        Node::new(NodeKind::InterfaceBody, TextRange::default(), members)
    }

    pub fn property(name: impl Into<String>, annotation: Option<&str>) -> Self {
        Node::new(
            NodeKind::PropertySignature(PropertySignature {
                name: name.into(),
                optional: false,
                readonly: false,
                annotation: annotation.map(str::to_string),
            }),
            TextRange::default(),
            Vec::new(),
        )
    }
}
