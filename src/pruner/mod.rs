pub mod dirs;
pub mod files;

pub use dirs::prune_empty_dirs;
pub use files::prune_files;

/// Counters for one pruning phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhaseStats {
    /// Entries enumerated by the walk.
    pub scanned: usize,
    pub removed: usize,
    pub previewed: usize,
    pub failed: usize,
    /// Files too young, or directories that still hold something.
    pub retained: usize,
    /// Old files whose name matched no pattern.
    pub unmatched: usize,
    pub warnings: usize,
}

impl PhaseStats {
    /// Entries that produced an audit record.
    pub fn recorded(&self) -> usize {
        self.removed + self.previewed + self.failed
    }
}
