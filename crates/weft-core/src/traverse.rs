//! Depth-first rule traversal
//!
//! For every node, in document order:
//!
//! 1. enter callbacks of the matching rules run in registration order; each
//!    sees the node as left by the rules before it
//! 2. children are walked, taken from the node as it stands after step 1
//! 3. exit callbacks run on a view of the node whose children carry the
//!    edits made below it during this pass
//!
//! Edits are queued in an [`EditQueue`], never applied to the input tree.

use std::cell::RefCell;

use crate::ast::Node;
use crate::diagnostics::{DiagnosticCollector, Suppression};
use crate::error::WeftError;
use crate::path::{EditAction, EditQueue, NodeLocation, NodePath};
use crate::result::Result;
use crate::rules::{Rule, RuleFn, RuleRegistry, Transform};

/// Which callback of a rule to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Enter,
    Exit,
}

/// Output of one traversal
#[derive(Debug)]
pub struct Traversal {
    /// Replacements and removals keyed by location in the input tree
    pub edits: EditQueue,
    /// Input tree with this pass's edits as the rules observed them
    pub view: Option<Node>,
}

struct Walker<'r> {
    registry: &'r RuleRegistry,
    collector: &'r mut DiagnosticCollector,
    max_depth: usize,
}

/// Run every matching rule over `tree`
pub fn traverse(
    tree: &Node,
    registry: &RuleRegistry,
    collector: &mut DiagnosticCollector,
    max_depth: usize,
) -> Result<Traversal> {
    let edits = RefCell::new(EditQueue::new());
    let mut walker = Walker {
        registry,
        collector,
        max_depth,
    };
    let view = walker.walk(tree, &NodeLocation::root(), None, &edits)?;
    Ok(Traversal {
        edits: edits.into_inner(),
        view,
    })
}

impl Walker<'_> {
    /// Walk one node; `None` means the pass removed it
    fn walk(
        &mut self,
        node: &Node,
        location: &NodeLocation,
        parent: Option<&NodePath<'_>>,
        edits: &RefCell<EditQueue>,
    ) -> Result<Option<Node>> {
        self.check_well_formed(node, location, parent)?;

        let registry = self.registry;
        let kind = node.kind();
        let mut current = node.clone();

        for rule in registry.lookup(kind) {
            if !self.run_rule(rule, Phase::Enter, &mut current, node, location, parent, edits) {
                return Ok(None);
            }
        }

        if current.has_children() {
            let children = {
                let path = NodePath::new(&current, node, location, parent, edits);
                self.walk_children(&path, edits)?
            };
            if let Some(children) = children {
                current = current.with_children(children);
            }
        }

        for rule in registry.lookup(kind) {
            if !self.run_rule(rule, Phase::Exit, &mut current, node, location, parent, edits) {
                return Ok(None);
            }
        }

        Ok(Some(current))
    }

    /// Walk the children of `path`; `Some` holds the new child list if any changed
    fn walk_children(
        &mut self,
        path: &NodePath<'_>,
        edits: &RefCell<EditQueue>,
    ) -> Result<Option<Vec<Node>>> {
        let children = path.node().children();
        let mut updated = Vec::with_capacity(children.len());
        let mut changed = false;
        let mut pending: Option<Suppression> = None;

        for (index, child) in children.iter().enumerate() {
            let location = path.location().child(index);

            let directive = child.comment_text().and_then(Suppression::parse);
            let scope = if child.comment_text().is_some() {
                None
            } else {
                pending.take()
            };
            if let Some(scope) = &scope {
                self.collector.push_suppression(scope.clone());
            }

            let result = self.walk(child, &location, Some(path), edits);

            if scope.is_some() {
                self.collector.pop_suppression();
            }
            if directive.is_some() {
                pending = directive;
            }

            match result? {
                Some(next) => {
                    changed |= !next.ptr_eq(child);
                    updated.push(next);
                }
                None => changed = true,
            }
        }

        Ok(changed.then_some(updated))
    }

    /// Run one callback of `rule` on `current`; returns false once the node is removed
    #[allow(clippy::too_many_arguments)]
    fn run_rule(
        &mut self,
        rule: &Rule,
        phase: Phase,
        current: &mut Node,
        original: &Node,
        location: &NodeLocation,
        parent: Option<&NodePath<'_>>,
        edits: &RefCell<EditQueue>,
    ) -> bool {
        let callback: Option<RuleFn> = match phase {
            Phase::Enter => rule.enter,
            Phase::Exit => rule.exit,
        };
        let Some(callback) = callback else {
            return true;
        };
        // an earlier rule may have changed the node's kind
        if !(rule.matches)(current.kind()) || !self.collector.is_enabled(&rule.category) {
            return true;
        }

        let revision = edits.borrow().revision();
        let outcome = {
            let path = NodePath::new(&*current, original, location, parent, edits);
            let outcome = callback(&path, &mut *self.collector);
            if let Transform::Replace(replacement) = &outcome
                && *replacement != *current
            {
                path.replace_with(replacement.clone());
            }
            outcome
        };

        if matches!(outcome, Transform::Reported) {
            tracing::trace!("Rule '{}' reported at {}", rule.name, location);
        }

        let queue = edits.borrow();
        if queue.revision() == revision {
            return true;
        }
        match queue.get(location).map(|edit| &edit.action) {
            Some(EditAction::Replace(replacement)) => {
                if !replacement.ptr_eq(current) {
                    tracing::debug!("Rule '{}' replaced node at {}", rule.name, location);
                    *current = replacement.clone();
                }
                true
            }
            Some(EditAction::Remove) => {
                tracing::debug!("Rule '{}' removed node at {}", rule.name, location);
                false
            }
            None => true,
        }
    }

    fn check_well_formed(
        &self,
        node: &Node,
        location: &NodeLocation,
        parent: Option<&NodePath<'_>>,
    ) -> Result<()> {
        if !self.registry.supports(node.kind()) {
            return Err(WeftError::unhandled_kind(node.kind(), "the rule registry"));
        }
        if location.depth() > self.max_depth {
            return Err(WeftError::malformed_tree(
                location.clone(),
                format!("nesting exceeds the maximum depth of {}", self.max_depth),
            ));
        }
        let mut ancestor: Option<&NodePath<'_>> = parent;
        while let Some(path) = ancestor {
            if path.node().ptr_eq(node) {
                return Err(WeftError::malformed_tree(
                    location.clone(),
                    "node is its own ancestor",
                ));
            }
            ancestor = path.parent();
        }
        Ok(())
    }
}
