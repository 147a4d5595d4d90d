//! Built-in rules
//!
//! Each rule is a name, a category, a kind predicate and plain callback
//! functions; [`register_all`] adds them to a registry in a fixed order.

pub mod comments;
pub mod interface;
pub mod self_closing;
pub mod type_params;

use weft_core::Result;
use weft_core::diagnostics::StaticCatalog;
use weft_core::rules::{Rule, RuleRegistry};

pub use comments::HTML_NO_EMPTY_COMMENT;
pub use interface::{TS_NO_DUPLICATE_MEMBER, TS_NO_EMPTY_INTERFACE};
pub use self_closing::{AST_ADD_SELF_CLOSING, HTML_PREFER_SELF_CLOSING};
pub use type_params::TS_NO_UNNECESSARY_CONSTRAINT;

/// Every built-in rule, in registration order
pub fn all_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            self_closing::PREFER_SELF_CLOSING,
            HTML_PREFER_SELF_CLOSING,
            self_closing::is_element,
        )
        .on_enter(self_closing::prefer_self_closing),
        Rule::new(
            self_closing::ADD_SELF_CLOSING,
            AST_ADD_SELF_CLOSING,
            self_closing::is_element,
        )
        .on_enter(self_closing::add_self_closing),
        Rule::new(
            comments::NO_EMPTY_COMMENT,
            HTML_NO_EMPTY_COMMENT,
            comments::is_comment,
        )
        .on_enter(comments::no_empty_comment),
        Rule::new(
            type_params::NO_UNKNOWN_CONSTRAINT,
            TS_NO_UNNECESSARY_CONSTRAINT,
            type_params::is_type_parameter,
        )
        .on_enter(type_params::no_unknown_constraint),
        Rule::new(
            interface::NO_EMPTY_INTERFACE,
            TS_NO_EMPTY_INTERFACE,
            interface::is_interface,
        )
        .on_enter(interface::no_empty_interface),
        Rule::new(
            interface::NO_DUPLICATE_MEMBER,
            TS_NO_DUPLICATE_MEMBER,
            interface::is_interface_body,
        )
        .on_exit(interface::no_duplicate_member),
    ]
}

/// Add every built-in rule to `registry`
pub fn register_all(registry: &mut RuleRegistry) -> Result<()> {
    for rule in all_rules() {
        registry.register_rule(rule)?;
    }
    Ok(())
}

/// English templates for the built-in message ids
pub fn default_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with(
            self_closing::VOID_NOT_SELF_CLOSING,
            "Void elements should be self-closing",
        )
        .with(
            self_closing::EMPTY_NOT_SELF_CLOSING,
            "Elements without children should be self-closing",
        )
        .with(comments::EMPTY_COMMENT, "Empty comments should be removed")
        .with(
            type_params::UNNECESSARY_CONSTRAINT,
            "Constraining a type parameter to `unknown` or `any` has no effect",
        )
        .with(interface::EMPTY_INTERFACE, "Interfaces should declare at least one member")
        .with(interface::DUPLICATE_MEMBER, "Interface members should not be declared twice")
}
