//! Extraction run metrics.
//!
//! Counters are collected on every run; they are cheap and make the CLI's
//! debug report and the balance checks in tests possible.
//!
//! ## Design notes
//!
//! - `pushes`/`pops` must agree once a stream is finished.
//! - `compound_replayed` counts words that were queued for a compound and then
//!   dispatched one by one.

use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    /// Wall time between extractor construction and [`crate::Extractor::finish`].
    pub total: Duration,
    /// Scanner items fed, of any kind.
    pub items: usize,
    pub words: usize,
    pub punctuation: usize,
    /// Words handed to the grammar (compounds count once).
    pub dispatches: usize,
    pub emitted: usize,
    /// Finished phrases at or below the threshold.
    pub dropped: usize,
    pub compounds: CompoundMetrics,
    pub stack: StackMetrics,
    pub parallel: ParallelMetrics,
}

/// Compound-word resolver activity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompoundMetrics {
    pub queued: usize,
    pub built: usize,
    pub replayed: usize,
}

/// Hypothesis stack activity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StackMetrics {
    pub pushes: usize,
    pub pops: usize,
}

/// Parallel hypothesis activity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParallelMetrics {
    pub started: usize,
    pub committed: usize,
    pub cancelled: usize,
}
