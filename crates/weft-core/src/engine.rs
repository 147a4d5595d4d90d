//! Engine driver
//!
//! Runs rule passes over a tree and, when fixes are requested, feeds each
//! pass's queued edits through the [`FixApplier`] until the tree stops
//! changing or the iteration cap is hit.

use std::collections::BTreeSet;
use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, warn};

pub use tokio_util::sync::CancellationToken;

use crate::ast::Node;
use crate::autofix::{FixApplier, FixConflict};
use crate::config::EngineConfig;
use crate::diagnostics::{Category, Diagnostic, DiagnosticCollector, FixMode, FixStatus, Report};
use crate::error::WeftError;
use crate::path::EditQueue;
use crate::result::{Result, ResultExt};
use crate::rules::RuleRegistry;
use crate::traverse::traverse;

/// Non-fatal conditions reported alongside a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineWarning {
    /// The fix loop stopped at the cap; the tree is the last one produced
    FixLimitReached { cap: usize },
    /// A descendant edit lost to an ancestor edit
    Conflict(FixConflict),
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::FixLimitReached { cap } => {
                write!(f, "fix limit reached after {cap} passes")
            }
            EngineWarning::Conflict(conflict) => write!(
                f,
                "edit at {} superseded by edit at {}",
                conflict.discarded, conflict.kept
            ),
        }
    }
}

/// One traversal over one tree
#[derive(Debug)]
pub struct PassResult {
    /// Diagnostics in emission order
    pub diagnostics: Vec<Diagnostic>,
    pub edits: EditQueue,
    /// The tree as the rules observed it by the end of the pass
    pub view: Option<Node>,
}

/// Final result of [`Engine::run`]
#[derive(Debug, Clone)]
pub struct EngineOutcome {
    pub tree: Node,
    /// Diagnostics whose fixes were applied in earlier passes, then every
    /// diagnostic of the final pass
    pub diagnostics: Vec<Diagnostic>,
    pub conflicts: Vec<FixConflict>,
    pub warnings: Vec<EngineWarning>,
    /// Number of passes run
    pub iterations: usize,
    /// The last pass produced nothing further to apply
    pub converged: bool,
}

impl EngineOutcome {
    /// Report of the unsuppressed diagnostics
    pub fn report(&self) -> Report {
        Report::from_diagnostics(&self.diagnostics)
    }

    pub fn applied_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.fix_status == FixStatus::Applied)
            .count()
    }
}

/// Rule registry plus configuration, scoped to one invocation
#[derive(Debug)]
pub struct Engine {
    registry: RuleRegistry,
    config: EngineConfig,
    applier: FixApplier,
    cancellation: CancellationToken,
}

impl Engine {
    /// Fails with a configuration error when `config` does not validate
    pub fn new(registry: RuleRegistry, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            config,
            applier: FixApplier::new(),
            cancellation: CancellationToken::new(),
        })
    }

    /// Cancellation is observed before each pass, never inside one
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    fn fix_mode(&self) -> FixMode {
        if self.config.apply_fixes {
            FixMode::ApplyFixes
        } else {
            FixMode::DescribeOnly
        }
    }

    fn collector(&self) -> DiagnosticCollector {
        let enabled = self
            .config
            .enabled_categories
            .as_ref()
            .map(|ids| ids.iter().map(|id| Category::from(id.as_str())).collect::<BTreeSet<_>>());
        DiagnosticCollector::new(self.fix_mode()).with_enabled_categories(enabled)
    }

    /// Run every rule over `tree` once; the tree itself is not modified
    pub fn run_pass(&self, tree: &Node) -> Result<PassResult> {
        let mut collector = self.collector();
        let traversal = traverse(tree, &self.registry, &mut collector, self.config.max_depth)?;
        debug!(
            "Pass produced {} diagnostics and {} edits",
            collector.len(),
            traversal.edits.len()
        );
        Ok(PassResult {
            diagnostics: collector.into_diagnostics(),
            edits: traversal.edits,
            view: traversal.view,
        })
    }

    fn check_cancelled(&self, pass: usize) -> Result<()> {
        if self.cancellation.is_cancelled() {
            info!("Cancelled before pass {}", pass);
            return Err(WeftError::Cancelled { pass });
        }
        Ok(())
    }

    /// Lint `tree`, and fix it to a fixed point when `applyFixes` is set
    pub fn run(&self, tree: Node) -> Result<EngineOutcome> {
        if !self.config.apply_fixes {
            self.check_cancelled(1)?;
            let pass = self.run_pass(&tree)?;
            return Ok(EngineOutcome {
                tree,
                diagnostics: pass.diagnostics,
                conflicts: Vec::new(),
                warnings: Vec::new(),
                iterations: 1,
                converged: true,
            });
        }

        let cap = self.config.fix_iteration_cap;
        let mut tree = tree;
        let mut history: Vec<Diagnostic> = Vec::new();
        let mut last: Vec<Diagnostic> = Vec::new();
        let mut conflicts = Vec::new();
        let mut warnings = Vec::new();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < cap {
            iterations += 1;
            self.check_cancelled(iterations)?;
            history.extend(
                last.drain(..)
                    .filter(|d| d.fix_status == FixStatus::Applied),
            );

            let pass = self.run_pass(&tree)?;
            let mut diagnostics = pass.diagnostics;

            if pass.edits.is_empty() {
                last = diagnostics;
                converged = true;
                break;
            }

            let applied = self.applier.apply(&tree, pass.edits);
            for diagnostic in &mut diagnostics {
                diagnostic.fix_status = applied.status_of(diagnostic);
            }
            for conflict in &applied.conflicts {
                warnings.push(EngineWarning::Conflict(conflict.clone()));
            }
            conflicts.extend(applied.conflicts.iter().cloned());
            last = diagnostics;

            if !applied.changed() || applied.tree == tree {
                debug!("Pass {} made no progress", iterations);
                converged = true;
                break;
            }
            debug!(
                "Pass {} applied {} edits",
                iterations,
                applied.applied.len()
            );
            tree = applied.tree;
        }

        if !converged {
            warn!("Fix limit of {} passes reached", cap);
            warnings.push(EngineWarning::FixLimitReached { cap });
        }

        history.append(&mut last);
        Ok(EngineOutcome {
            tree,
            diagnostics: history,
            conflicts,
            warnings,
            iterations,
            converged,
        })
    }

    /// Run independent trees in parallel; results keep the input order
    ///
    /// A tree that fails with a recoverable error (a malformed tree) is
    /// logged and yields `None`; any other error aborts the batch.
    pub fn run_batch(&self, trees: Vec<Node>) -> Result<Vec<Option<EngineOutcome>>> {
        let total = trees.len();
        let results: Vec<_> = trees
            .into_par_iter()
            .map(|tree| self.run(tree).recoverable())
            .collect();
        let outcomes = results.into_iter().collect::<Result<Vec<_>>>()?;
        info!(
            "Completed batch of {} trees, {} skipped",
            total,
            outcomes.iter().filter(|o| o.is_none()).count()
        );
        Ok(outcomes)
    }
}
