//! Diagnostics, fix suggestions and the pass-scoped collector
//!
//! Categories and message ids are opaque, stable identifiers. Their
//! human-readable templates belong to an external [`MessageCatalog`]; nothing
//! in the engine formats message text.

mod collector;
mod report;

use std::borrow::Cow;
use std::fmt;

use rowan::TextRange;
use serde::{Deserialize, Serialize};

use crate::ast::Node;
use crate::path::NodeLocation;

pub use collector::{DiagnosticCollector, FixMode, Suppression};
pub use report::{MessageCatalog, Report, ReportEntry, ReportSpan, StaticCatalog};

/// Stable diagnostic category id, e.g. `HTML_PREFER_SELF_CLOSING`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(Cow<'static, str>);

impl Category {
    pub const fn new(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Category {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl From<&str> for Category {
    fn from(id: &str) -> Self {
        Self(Cow::Owned(id.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Id of a message template in the external catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Cow<'static, str>);

impl MessageId {
    pub const fn new(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Category> for MessageId {
    fn from(category: &Category) -> Self {
        Self(category.0.clone())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a diagnostic points: source span plus tree position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub span: TextRange,
    pub node: NodeLocation,
}

impl SourceLocation {
    pub fn new(span: TextRange, node: NodeLocation) -> Self {
        Self { span, node }
    }
}

/// A concrete proposed replacement subtree
///
/// `old` must still be structurally equal to the live node at the
/// diagnostic's location when the fix is applied; otherwise the fix is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSuggestion {
    pub old: Node,
    pub fixed: Node,
}

impl FixSuggestion {
    pub fn new(old: Node, fixed: Node) -> Self {
        Self { old, fixed }
    }
}

/// What happened to a diagnostic's fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixStatus {
    /// No fix attached
    None,
    /// Fix recorded but not applied (describe-only, or not reached)
    Available,
    /// Fix is part of the rewritten tree
    Applied,
    /// Fix skipped: its `old` no longer matched the live node
    Skipped,
    /// Fix discarded in favour of a replacement of an ancestor
    Superseded,
}

impl FixStatus {
    pub fn label(self) -> &'static str {
        match self {
            FixStatus::None => "",
            FixStatus::Available => "fixable",
            FixStatus::Applied => "fixed",
            FixStatus::Skipped => "fix skipped",
            FixStatus::Superseded => "fix superseded",
        }
    }
}

/// A reported issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: Category,
    pub location: SourceLocation,
    pub message: MessageId,
    pub fix: Option<FixSuggestion>,
    /// Under a suppression directive: dropped from reports, fix still applies
    pub suppressed: bool,
    pub fix_status: FixStatus,
}

impl Diagnostic {
    pub fn new(category: Category, location: SourceLocation, message: MessageId) -> Self {
        Self {
            category,
            location,
            message,
            fix: None,
            suppressed: false,
            fix_status: FixStatus::None,
        }
    }

    pub fn with_fix(mut self, fix: FixSuggestion) -> Self {
        self.fix = Some(fix);
        self.fix_status = FixStatus::Available;
        self
    }

    /// Mark the diagnostic as fixed by removing its node
    pub fn with_removal(mut self) -> Self {
        self.fix = None;
        self.fix_status = FixStatus::Available;
        self
    }

    /// Whether a fix (replacement or removal) is attached
    pub fn has_fix(&self) -> bool {
        self.fix_status != FixStatus::None
    }
}
