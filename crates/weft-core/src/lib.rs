//! Weft Core
//!
//! Traversal, rule execution and fix application for the Weft lint/format
//! pipeline. A parsed tree goes in; rules run over it through [`NodePath`]
//! cursors, report through a [`DiagnosticCollector`], and queue edits that
//! the [`FixApplier`] folds into a new tree. The [`Engine`] repeats this
//! until the tree stops changing.

pub mod ast;
pub mod autofix;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod path;
pub mod result;
pub mod rules;
pub mod traverse;

pub use ast::{Node, NodeKind, SCHEMA_VERSION, SyntaxKind};
pub use autofix::{ApplyOutcome, FixApplier, FixConflict};
pub use config::{ConfigLoader, EngineConfig};
pub use diagnostics::{
    Category, Diagnostic, DiagnosticCollector, FixMode, FixStatus, FixSuggestion, MessageCatalog,
    MessageId, Report, SourceLocation, StaticCatalog,
};
pub use engine::{CancellationToken, Engine, EngineOutcome, EngineWarning, PassResult};
pub use error::{ErrorKind, WeftError};
pub use path::{EditAction, EditQueue, NodeLocation, NodePath};
pub use result::{Result, ResultExt};
pub use rules::{Rule, RuleFn, RuleRegistry, Transform};
pub use traverse::{Traversal, traverse};

// Spans come from rowan so parsers built on it hand over ranges unchanged
pub use rowan::{TextRange, TextSize};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("weft=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
