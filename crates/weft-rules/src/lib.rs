//! Weft Rules
//!
//! The built-in lint and fix rules for Weft trees.
//!
//! ```rust
//! use weft_core::{Engine, EngineConfig, Node};
//!
//! let registry = weft_rules::default_registry().unwrap();
//! let config = EngineConfig { apply_fixes: true, ..EngineConfig::default() };
//! let engine = Engine::new(registry, config).unwrap();
//!
//! let tree = Node::document(vec![Node::element("img", vec![], false, vec![])]);
//! let outcome = engine.run(tree).unwrap();
//! assert_eq!(outcome.tree, Node::document(vec![Node::element("img", vec![], true, vec![])]));
//! ```

pub mod builtin;

use weft_core::Result;
use weft_core::rules::RuleRegistry;

pub use builtin::{all_rules, default_catalog, register_all};

/// Registry holding every built-in rule
pub fn default_registry() -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::new();
    register_all(&mut registry)?;
    tracing::debug!("Loaded {} built-in rules", registry.len());
    Ok(registry)
}
