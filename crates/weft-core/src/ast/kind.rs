//! Node kinds and their kind-specific payloads

use std::fmt;

/// Fieldless tag for every node kind in the schema
///
/// Used as the O(1) dispatch key for rule lookup. The discriminant doubles as
/// an index into per-kind tables, so variants must stay dense and in sync with
/// [`SyntaxKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    Document,
    Element,
    Text,
    Comment,
    Interface,
    TypeParameterList,
    TypeParameter,
    InterfaceBody,
    PropertySignature,
}

impl SyntaxKind {
    /// Every kind, in discriminant order
    pub const ALL: [SyntaxKind; 9] = [
        SyntaxKind::Document,
        SyntaxKind::Element,
        SyntaxKind::Text,
        SyntaxKind::Comment,
        SyntaxKind::Interface,
        SyntaxKind::TypeParameterList,
        SyntaxKind::TypeParameter,
        SyntaxKind::InterfaceBody,
        SyntaxKind::PropertySignature,
    ];

    /// Number of kinds in the schema
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index for per-kind tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable kebab-case name
    pub const fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::Document => "document",
            SyntaxKind::Element => "element",
            SyntaxKind::Text => "text",
            SyntaxKind::Comment => "comment",
            SyntaxKind::Interface => "interface",
            SyntaxKind::TypeParameterList => "type-parameter-list",
            SyntaxKind::TypeParameter => "type-parameter",
            SyntaxKind::InterfaceBody => "interface-body",
            SyntaxKind::PropertySignature => "property-signature",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markup element: `<tag attr="value">...</tag>` or `<tag />`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

/// Element attribute; `value: None` is a bare attribute such as `disabled`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Generic type parameter: `Name extends Constraint = Default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<String>,
    pub default: Option<String>,
}

/// Interface member: `readonly name?: Annotation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    pub name: String,
    pub optional: bool,
    pub readonly: bool,
    pub annotation: Option<String>,
}

/// Kind-specific payload of a node
///
/// Children are not stored here; every kind shares the ordered child list on
/// [`Node`](super::Node). Attributes, names and type annotations are fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
    /// `interface Name<TypeParameterList?> InterfaceBody`
    Interface {
        name: String,
    },
    TypeParameterList,
    TypeParameter(TypeParameter),
    InterfaceBody,
    PropertySignature(PropertySignature),
}

impl NodeKind {
    /// Tag of this payload
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeKind::Document => SyntaxKind::Document,
            NodeKind::Element(_) => SyntaxKind::Element,
            NodeKind::Text(_) => SyntaxKind::Text,
            NodeKind::Comment(_) => SyntaxKind::Comment,
            NodeKind::Interface { .. } => SyntaxKind::Interface,
            NodeKind::TypeParameterList => SyntaxKind::TypeParameterList,
            NodeKind::TypeParameter(_) => SyntaxKind::TypeParameter,
            NodeKind::InterfaceBody => SyntaxKind::InterfaceBody,
            NodeKind::PropertySignature(_) => SyntaxKind::PropertySignature,
        }
    }
}
