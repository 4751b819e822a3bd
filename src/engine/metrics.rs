//! Engine run metrics.
//!
//! `Parser::run` discards these; `Parser::run_with_metrics` returns them so
//! the verbose recognition API and the CLI trace can show what each
//! saturation pass produced and where the time went.

use crate::{Node, ResolvedToken};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`](super::Parser::run_with_metrics).
    pub total: Duration,
    pub saturation: SaturationMetrics,
    /// Time spent resolving and selecting tokens after saturation.
    pub resolve: Duration,
}

/// Timings for the saturation phase.
#[derive(Debug, Default, Clone)]
pub struct SaturationMetrics {
    /// Initial regex pass plus all iterations.
    pub total: Duration,
    pub initial_regex: PassMetrics,
    pub iterations: Vec<PassMetrics>,
}

/// Timing and node discovery for a single pass.
#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    pub duration: Duration,
    /// Number of new nodes added to the stash during the pass.
    pub produced: usize,
    /// New nodes produced in this pass. Only filled when tracing is enabled
    /// for the engine or when the caller asked for a verbose run.
    pub nodes: Vec<Node>,
    /// Number of rules that had at least one first-pattern match.
    pub rules_seeded: usize,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Resolved tokens of the target dimension before span selection.
    pub all_tokens: Vec<ResolvedToken>,
    /// Leftmost-longest, non-overlapping selection of `all_tokens`.
    pub tokens: Vec<ResolvedToken>,
    /// Names of rules that were active for this input.
    pub active_rules: Vec<&'static str>,
    pub metrics: RunMetrics,
}
