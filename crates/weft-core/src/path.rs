//! Traversal cursor and queued edits
//!
//! A [`NodePath`] borrows one node plus the chain of paths above it. It never
//! owns or mutates the tree: `replace_with` and `remove` only record a
//! [`PendingEdit`] in the pass's [`EditQueue`], keyed by the node's
//! [`NodeLocation`]. The queue is reduced into a new tree by the fix applier
//! once the pass is complete.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{Node, SyntaxKind};
use crate::diagnostics::SourceLocation;

/// Position of a node as child indices from the root
///
/// Ordering is lexicographic, which puts an ancestor before its descendants
/// and siblings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeLocation(Vec<u32>);

impl NodeLocation {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Location of the `index`-th child
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index as u32);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// `self` lies on the path from the root to `other`, and is not `other`
    pub fn is_strict_ancestor_of(&self, other: &NodeLocation) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// `other` is `self` or lies below it
    pub fn contains(&self, other: &NodeLocation) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = NodeLocation> + '_ {
        (0..self.0.len()).rev().map(|len| Self(self.0[..len].to_vec()))
    }
}

impl From<Vec<u32>> for NodeLocation {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

/// What a queued edit does to the node at its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Replace(Node),
    Remove,
}

/// An edit queued during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Node at the location when the pass started; used as the staleness guard
    pub original: Node,
    pub action: EditAction,
    /// Queue revision of the latest push at this location
    pub queued_at: u64,
}

/// Pending edits of one pass, keyed and ordered by location
#[derive(Debug, Clone, Default)]
pub struct EditQueue {
    edits: BTreeMap<NodeLocation, PendingEdit>,
    revision: u64,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` at `location`
    ///
    /// A later edit at the same location overwrites the action but keeps the
    /// first recorded original, so composed edits from several rules are
    /// checked against the node the pass actually started from.
    pub fn push(&mut self, location: NodeLocation, original: &Node, action: EditAction) {
        self.revision += 1;
        let queued_at = self.revision;
        match self.edits.entry(location) {
            Entry::Occupied(mut entry) => {
                let edit = entry.get_mut();
                edit.action = action;
                edit.queued_at = queued_at;
            }
            Entry::Vacant(entry) => {
                entry.insert(PendingEdit {
                    original: original.clone(),
                    action,
                    queued_at,
                });
            }
        }
    }

    /// Bumped on every push; lets a caller tell whether an edit was queued
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, location: &NodeLocation) -> Option<&PendingEdit> {
        self.edits.get(location)
    }

    /// Whether any edit targets `location` or a node below it
    pub fn has_edits_within(&self, location: &NodeLocation) -> bool {
        self.edits
            .range(location.clone()..)
            .next()
            .is_some_and(|(key, _)| location.contains(key))
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeLocation, &PendingEdit)> {
        self.edits.iter()
    }

    pub fn remove(&mut self, location: &NodeLocation) -> Option<PendingEdit> {
        self.edits.remove(location)
    }
}

impl IntoIterator for EditQueue {
    type Item = (NodeLocation, PendingEdit);
    type IntoIter = std::collections::btree_map::IntoIter<NodeLocation, PendingEdit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.into_iter()
    }
}

impl FromIterator<(NodeLocation, PendingEdit)> for EditQueue {
    fn from_iter<I: IntoIterator<Item = (NodeLocation, PendingEdit)>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
            revision: 0,
        }
    }
}

/// Traversal cursor over one node and its ancestor chain
#[derive(Clone, Copy)]
pub struct NodePath<'a> {
    node: &'a Node,
    original: &'a Node,
    location: &'a NodeLocation,
    parent: Option<&'a NodePath<'a>>,
    edits: &'a RefCell<EditQueue>,
}

impl<'a> NodePath<'a> {
    /// Cursor at the root of a tree
    pub fn root(node: &'a Node, location: &'a NodeLocation, edits: &'a RefCell<EditQueue>) -> Self {
        Self {
            node,
            original: node,
            location,
            parent: None,
            edits,
        }
    }

    pub(crate) fn new(
        node: &'a Node,
        original: &'a Node,
        location: &'a NodeLocation,
        parent: Option<&'a NodePath<'a>>,
        edits: &'a RefCell<EditQueue>,
    ) -> Self {
        Self {
            node,
            original,
            location,
            parent,
            edits,
        }
    }

    /// Node as seen by this pass, including edits made earlier in the pass
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn kind(&self) -> SyntaxKind {
        self.node.kind()
    }

    pub fn location(&self) -> &'a NodeLocation {
        self.location
    }

    pub fn parent(&self) -> Option<&'a NodePath<'a>> {
        self.parent
    }

    pub fn parent_kind(&self) -> Option<SyntaxKind> {
        self.parent.map(NodePath::kind)
    }

    /// Enclosing paths, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = &'a NodePath<'a>> {
        std::iter::successors(self.parent, |path| path.parent)
    }

    /// Diagnostic location for this node
    pub fn source_location(&self) -> SourceLocation {
        SourceLocation::new(self.node.span(), self.location.clone())
    }

    /// Queue a replacement for this node; the tree is not touched
    pub fn replace_with(&self, node: Node) {
        self.edits
            .borrow_mut()
            .push(self.location.clone(), self.original, EditAction::Replace(node));
    }

    /// Queue removal of this node from its parent
    pub fn remove(&self) {
        self.edits
            .borrow_mut()
            .push(self.location.clone(), self.original, EditAction::Remove);
    }
}

impl fmt::Debug for NodePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodePath")
            .field("kind", &self.node.kind())
            .field("location", self.location)
            .finish()
    }
}
