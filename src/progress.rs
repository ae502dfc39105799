use std::path::Path;

use crate::pruner::PhaseStats;

/// The two pruning phases, in the order the engine runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Files,
    EmptyDirs,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Files => "files",
            Phase::EmptyDirs => "empty dirs",
        }
    }
}

/// Trait for reporting pruning progress and operator notices.
///
/// The CLI implements it with colored console output; library callers and
/// tests can stay silent or record what they are told.
/// All methods have default no-op implementations.
pub trait PruneReporter {
    fn on_phase_start(&self, _phase: Phase) {}
    fn on_would_delete(&self, _path: &Path) {}
    fn on_would_remove_dir(&self, _path: &Path) {}
    fn on_warning(&self, _message: &str) {}
    fn on_phase_complete(&self, _phase: Phase, _stats: &PhaseStats, _duration_secs: f64) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl PruneReporter for SilentReporter {}
