//! Node model
//!
//! A closed sum type over the syntactic kinds the engine supports. Trees are
//! produced by an external parser (or by the fix applier) and are never
//! mutated in place: every edit builds a new node that shares its untouched
//! children with the old one.
//!
//! ## Example
//!
//! ```rust
//! use weft_core::ast::{Node, SyntaxKind};
//!
//! let img = Node::element("img", vec![], false, vec![]);
//! let fixed = img.with_fields(|kind| {
//!     if let weft_core::ast::NodeKind::Element(el) = kind {
//!         el.self_closing = true;
//!     }
//! });
//!
//! assert_eq!(fixed.kind(), SyntaxKind::Element);
//! assert_ne!(img, fixed);
//! ```

mod kind;
mod node;

pub use kind::{Attribute, Element, NodeKind, PropertySignature, SyntaxKind, TypeParameter};
pub use node::Node;

/// Version of the kind schema this engine handles exhaustively
pub const SCHEMA_VERSION: u32 = 1;

/// HTML void elements; they never have children
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Whether `tag` names a void element (case-insensitive)
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("img"));
        assert!(is_void_element("BR"));
        assert!(!is_void_element("div"));
    }
}
