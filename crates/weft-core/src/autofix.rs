//! Fix application
//!
//! Reduces the edits queued during one pass into a single rewritten tree:
//!
//! - Conflict detection: an edit below another queued edit is discarded and
//!   the ancestor's edit wins
//! - Absorption: a discarded edit whose result the ancestor's replacement
//!   already carries counts as applied through that ancestor
//! - Staleness guard: an edit only applies while its recorded original is
//!   still structurally equal to the live node at its location
//! - Bottom-up rebuild: untouched subtrees are shared with the input tree

use std::collections::{BTreeMap, BTreeSet};

use crate::ast::Node;
use crate::diagnostics::{Diagnostic, FixStatus, FixSuggestion};
use crate::path::{EditAction, EditQueue, NodeLocation, PendingEdit};

/// Two queued edits where one target contains the other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixConflict {
    /// Ancestor location whose edit was kept
    pub kept: NodeLocation,
    /// Descendant location whose edit was discarded
    pub discarded: NodeLocation,
}

/// Edits left after conflict resolution
#[derive(Debug, Clone, Default)]
pub struct ResolvedEdits {
    pub edits: EditQueue,
    pub conflicts: Vec<FixConflict>,
    /// Descendant location -> ancestor location whose replacement carries it
    pub absorbed: BTreeMap<NodeLocation, NodeLocation>,
}

/// Result of applying one batch of edits
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub tree: Node,
    pub applied: BTreeSet<NodeLocation>,
    /// Edits dropped because the live node no longer matched
    pub stale: BTreeSet<NodeLocation>,
    pub conflicts: Vec<FixConflict>,
    pub absorbed: BTreeMap<NodeLocation, NodeLocation>,
}

impl ApplyOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Fix status for a diagnostic raised against the tree this batch was applied to
    pub fn status_of(&self, diagnostic: &Diagnostic) -> FixStatus {
        if !diagnostic.has_fix() {
            return FixStatus::None;
        }
        let location = self
            .absorbed
            .get(&diagnostic.location.node)
            .unwrap_or(&diagnostic.location.node);
        if self.applied.contains(location) {
            FixStatus::Applied
        } else if self.stale.contains(location) {
            FixStatus::Skipped
        } else if self.conflicts.iter().any(|c| &c.discarded == location) {
            FixStatus::Superseded
        } else {
            FixStatus::Available
        }
    }
}

/// Applies queued edits to a tree
#[derive(Debug, Clone, Copy, Default)]
pub struct FixApplier;

impl FixApplier {
    pub fn new() -> Self {
        Self
    }

    /// Drop every edit that lies strictly below another edit
    ///
    /// The queue is ordered with ancestors first, so checking each edit's
    /// ancestor locations against the kept set is enough. A dropped edit is
    /// absorbed rather than conflicting when the ancestor was replaced after
    /// it was queued and the replacement already reflects it.
    pub fn resolve_conflicts(&self, edits: EditQueue) -> ResolvedEdits {
        let mut kept: BTreeMap<NodeLocation, PendingEdit> = BTreeMap::new();
        let mut conflicts = Vec::new();
        let mut absorbed = BTreeMap::new();

        for (location, edit) in edits {
            let ancestor = location.ancestors().find(|a| kept.contains_key(a));
            let Some(ancestor) = ancestor else {
                kept.insert(location, edit);
                continue;
            };

            if kept
                .get(&ancestor)
                .is_some_and(|outer| carries(outer, &edit))
            {
                tracing::debug!("Edit at {} is carried by the edit at {}", location, ancestor);
                absorbed.insert(location, ancestor);
            } else {
                tracing::warn!(
                    "Discarding edit at {} in favour of ancestor edit at {}",
                    location,
                    ancestor
                );
                conflicts.push(FixConflict {
                    kept: ancestor,
                    discarded: location,
                });
            }
        }

        ResolvedEdits {
            edits: kept.into_iter().collect(),
            conflicts,
            absorbed,
        }
    }

    /// Resolve conflicts, then rebuild `tree` with the surviving edits
    pub fn apply(&self, tree: &Node, edits: EditQueue) -> ApplyOutcome {
        let ResolvedEdits {
            edits,
            conflicts,
            absorbed,
        } = self.resolve_conflicts(edits);
        let mut rebuild = Rebuild {
            edits: &edits,
            applied: BTreeSet::new(),
            stale: BTreeSet::new(),
        };

        let root = NodeLocation::root();
        let tree = match rebuild.node(tree, &root) {
            Some(tree) => tree,
            None => {
                tracing::warn!("Ignoring removal of the root node");
                rebuild.applied.remove(&root);
                rebuild.stale.insert(root);
                tree.clone()
            }
        };

        ApplyOutcome {
            tree,
            applied: rebuild.applied,
            stale: rebuild.stale,
            conflicts,
            absorbed,
        }
    }

    /// Apply recorded fix suggestions, e.g. ones collected in describe-only mode
    ///
    /// The first suggestion per location wins; later ones are ignored.
    pub fn apply_suggestions<'a>(
        &self,
        tree: &Node,
        suggestions: impl IntoIterator<Item = (&'a NodeLocation, &'a FixSuggestion)>,
    ) -> ApplyOutcome {
        let mut edits = EditQueue::new();
        for (location, suggestion) in suggestions {
            if edits.get(location).is_some() {
                tracing::debug!("Ignoring second suggestion at {}", location);
                continue;
            }
            edits.push(
                location.clone(),
                &suggestion.old,
                EditAction::Replace(suggestion.fixed.clone()),
            );
        }
        self.apply(tree, edits)
    }
}

/// Whether the replacement in `outer` was built on top of `inner`
fn carries(outer: &PendingEdit, inner: &PendingEdit) -> bool {
    let EditAction::Replace(replacement) = &outer.action else {
        return false;
    };
    if inner.queued_at >= outer.queued_at {
        return false;
    }
    match &inner.action {
        EditAction::Replace(fixed) => replacement.contains_node(fixed),
        EditAction::Remove => true,
    }
}

struct Rebuild<'e> {
    edits: &'e EditQueue,
    applied: BTreeSet<NodeLocation>,
    stale: BTreeSet<NodeLocation>,
}

impl Rebuild<'_> {
    /// Rebuild `node`; `None` means it was removed
    fn node(&mut self, node: &Node, location: &NodeLocation) -> Option<Node> {
        if !self.edits.has_edits_within(location) {
            return Some(node.clone());
        }

        if let Some(edit) = self.edits.get(location) {
            if edit.original == *node {
                self.applied.insert(location.clone());
                return match &edit.action {
                    EditAction::Replace(replacement) => Some(replacement.clone()),
                    EditAction::Remove => None,
                };
            }
            tracing::warn!("Skipping stale fix at {}", location);
            self.stale.insert(location.clone());
        }

        let mut children = Vec::with_capacity(node.children().len());
        let mut changed = false;
        for (index, child) in node.children().iter().enumerate() {
            match self.node(child, &location.child(index)) {
                Some(rebuilt) => {
                    changed |= !rebuilt.ptr_eq(child);
                    children.push(rebuilt);
                }
                None => changed = true,
            }
        }

        Some(if changed {
            node.with_children(children)
        } else {
            node.clone()
        })
    }
}
