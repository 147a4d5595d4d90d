//! Rule records and the kind-keyed registry
//!
//! A rule is plain data: a name, a category, a kind predicate and up to two
//! plain functions run on entering and leaving a matching node. Rules hold no
//! state, so the same record serves a lint pass and a format pass alike.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::ast::{Node, SyntaxKind};
use crate::diagnostics::{Category, DiagnosticCollector};
use crate::error::WeftError;
use crate::path::NodePath;
use crate::result::Result;

/// What a rule callback did with its node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Nothing to report
    Unchanged,
    /// A diagnostic was emitted; the node stays as it is
    Reported,
    /// Continue with this node instead; queued as a replacement
    Replace(Node),
}

impl Transform {
    /// Outcome for a rule that emitted a diagnostic and got `node` back
    ///
    /// `node` is whatever the collector returned for a fixable diagnostic:
    /// the path's own node in describe-only mode, the fix otherwise.
    pub fn reported(path: &NodePath<'_>, node: Node) -> Self {
        if node == *path.node() {
            Transform::Reported
        } else {
            Transform::Replace(node)
        }
    }
}

/// Callback run on a matching node
pub type RuleFn = fn(&NodePath<'_>, &mut DiagnosticCollector) -> Transform;

/// Decides which kinds a rule applies to
pub type KindPredicate = fn(SyntaxKind) -> bool;

/// A registered rule
#[derive(Clone)]
pub struct Rule {
    pub name: Cow<'static, str>,
    pub category: Category,
    pub matches: KindPredicate,
    pub enter: Option<RuleFn>,
    pub exit: Option<RuleFn>,
}

impl Rule {
    pub fn new(name: impl Into<Cow<'static, str>>, category: Category, matches: KindPredicate) -> Self {
        Self {
            name: name.into(),
            category,
            matches,
            enter: None,
            exit: None,
        }
    }

    pub fn on_enter(mut self, enter: RuleFn) -> Self {
        self.enter = Some(enter);
        self
    }

    pub fn on_exit(mut self, exit: RuleFn) -> Self {
        self.exit = Some(exit);
        self
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

/// Registry of rules in registration order, indexed by node kind
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: IndexMap<String, Rule>,
    by_kind: [Vec<usize>; SyntaxKind::COUNT],
    schema: [bool; SyntaxKind::COUNT],
}

impl RuleRegistry {
    /// Create an empty registry supporting every kind
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
            by_kind: std::array::from_fn(|_| Vec::new()),
            schema: [true; SyntaxKind::COUNT],
        }
    }

    /// Restrict the kinds a traversal with this registry may encounter
    pub fn with_schema(mut self, kinds: &[SyntaxKind]) -> Self {
        self.schema = [false; SyntaxKind::COUNT];
        for kind in kinds {
            self.schema[kind.index()] = true;
        }
        self
    }

    pub fn supports(&self, kind: SyntaxKind) -> bool {
        self.schema[kind.index()]
    }

    /// Register a rule built from its parts
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        category: Category,
        matches: KindPredicate,
        enter: Option<RuleFn>,
        exit: Option<RuleFn>,
    ) -> Result<()> {
        self.register_rule(Rule {
            name: name.into(),
            category,
            matches,
            enter,
            exit,
        })
    }

    /// Register a rule; fails if the name is taken
    pub fn register_rule(&mut self, rule: Rule) -> Result<()> {
        if self.rules.contains_key(rule.name.as_ref()) {
            return Err(WeftError::duplicate_rule(rule.name.as_ref()));
        }

        let index = self.rules.len();
        for kind in SyntaxKind::ALL {
            if (rule.matches)(kind) {
                self.by_kind[kind.index()].push(index);
            }
        }

        tracing::debug!("Registered rule '{}' ({})", rule.name, rule.category);
        self.rules.insert(rule.name.to_string(), rule);
        Ok(())
    }

    /// Rules matching `kind`, in registration order
    pub fn lookup(&self, kind: SyntaxKind) -> impl Iterator<Item = &Rule> + '_ {
        self.by_kind[kind.index()]
            .iter()
            .filter_map(|&index| self.rules.get_index(index).map(|(_, rule)| rule))
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Rule names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn noop(_: &NodePath<'_>, _: &mut DiagnosticCollector) -> Transform {
        Transform::Unchanged
    }

    fn elements(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::Element
    }

    fn markup(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::Element | SyntaxKind::Comment)
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry
            .register("a", Category::new("A"), elements, Some(noop), None)
            .unwrap();
        let err = registry
            .register("a", Category::new("B"), markup, None, Some(noop))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Registry);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_keeps_registration_order() {
        let mut registry = RuleRegistry::new();
        registry
            .register_rule(Rule::new("second-by-name", Category::new("A"), markup).on_enter(noop))
            .unwrap();
        registry
            .register_rule(Rule::new("first-by-name", Category::new("B"), elements).on_exit(noop))
            .unwrap();

        let names: Vec<&str> = registry
            .lookup(SyntaxKind::Element)
            .map(|r| r.name.as_ref())
            .collect();
        assert_eq!(names, vec!["second-by-name", "first-by-name"]);

        let comment: Vec<&str> = registry
            .lookup(SyntaxKind::Comment)
            .map(|r| r.name.as_ref())
            .collect();
        assert_eq!(comment, vec!["second-by-name"]);
        assert_eq!(registry.lookup(SyntaxKind::Text).count(), 0);
    }

    #[test]
    fn test_schema_restriction() {
        let registry = RuleRegistry::new().with_schema(&[SyntaxKind::Document, SyntaxKind::Element]);
        assert!(registry.supports(SyntaxKind::Element));
        assert!(!registry.supports(SyntaxKind::Interface));
    }
}
