//! Layout document for formatted output
//!
//! A [`TokenDocument`] describes output without committing to line breaks;
//! the [`Printer`](crate::printer::Printer) decides per group whether it
//! fits on the current line. Literal text comes in two forms:
//! - `Token`: static ASCII punctuation and keywords, measured by byte length
//! - `Text`: node content such as tag names and identifiers, measured with
//!   `unicode-width`
//!
//! # Example
//!
//! ```rust
//! use weft_formatter::format_element::{group, space, text, token};
//!
//! let doc = group(
//!     1,
//!     vec![token("<"), text("img"), space(), text("src=\"a.png\""), token(" />")],
//! );
//! assert_eq!(doc.to_string(), "<img src=\"a.png\" />");
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenDocument {
    /// Static text: ASCII, no line breaks or tabs
    Token(&'static str),

    /// Text taken from node fields; may contain any Unicode
    Text(Box<str>),

    /// Documents rendered in order
    Concat(Vec<TokenDocument>),

    /// A space when the enclosing group is flat, a line break when it is broken
    Space,

    /// Always a line break followed by the accumulated indent
    Break,

    /// Flat-or-broken decision unit; `indent` levels apply to its line breaks
    Group {
        contents: Box<TokenDocument>,
        indent: u8,
    },
}

impl TokenDocument {
    /// Whether this document renders to nothing
    pub fn is_empty(&self) -> bool {
        match self {
            TokenDocument::Token(s) => s.is_empty(),
            TokenDocument::Text(text) => text.is_empty(),
            TokenDocument::Space | TokenDocument::Break => false,
            TokenDocument::Concat(docs) => docs.iter().all(TokenDocument::is_empty),
            TokenDocument::Group { contents, .. } => contents.is_empty(),
        }
    }

    /// Whether a `Break` occurs anywhere inside
    pub fn contains_break(&self) -> bool {
        match self {
            TokenDocument::Break => true,
            TokenDocument::Text(text) => text.contains('\n'),
            TokenDocument::Token(_) | TokenDocument::Space => false,
            TokenDocument::Concat(docs) => docs.iter().any(TokenDocument::contains_break),
            TokenDocument::Group { contents, .. } => contents.contains_break(),
        }
    }
}

/// Flat rendering without indentation; mainly for debugging and tests
impl fmt::Display for TokenDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenDocument::Token(s) => f.write_str(s),
            TokenDocument::Text(text) => f.write_str(text),
            TokenDocument::Space => f.write_str(" "),
            TokenDocument::Break => writeln!(f),
            TokenDocument::Concat(docs) => {
                for doc in docs {
                    write!(f, "{doc}")?;
                }
                Ok(())
            }
            TokenDocument::Group { contents, .. } => write!(f, "{contents}"),
        }
    }
}

/// Static ASCII text
///
/// # Panics
///
/// In debug builds, if `text` is not ASCII or contains newlines or tabs.
pub fn token(text: &'static str) -> TokenDocument {
    debug_assert!(text.is_ascii(), "Token must be ASCII only, got: {:?}", text);
    debug_assert!(
        !text.contains(['\n', '\r', '\t']),
        "Token cannot contain newlines/tabs, use Break/Space instead: {:?}",
        text
    );
    TokenDocument::Token(text)
}

/// Dynamic text from a node
pub fn text(text: &str) -> TokenDocument {
    TokenDocument::Text(text.into())
}

pub fn space() -> TokenDocument {
    TokenDocument::Space
}

pub fn hard_line_break() -> TokenDocument {
    TokenDocument::Break
}

pub fn concat(docs: Vec<TokenDocument>) -> TokenDocument {
    TokenDocument::Concat(docs)
}

/// Group `docs`, indenting its line breaks by `indent` levels
pub fn group(indent: u8, docs: Vec<TokenDocument>) -> TokenDocument {
    TokenDocument::Group {
        contents: Box::new(TokenDocument::Concat(docs)),
        indent,
    }
}
