use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::progress::PruneReporter;

/// Entries found under a root, plus how many walk errors were reported
/// along the way.
#[derive(Debug)]
pub struct Listing<T> {
    pub entries: Vec<T>,
    pub errors: usize,
    /// Paths the walk failed on. Already warned about.
    pub unreadable: HashSet<PathBuf>,
}

/// Sequential, deterministic traversal. Siblings are visited in file name
/// order, which makes the pre-order walk the same as sorting full paths
/// component by component. Symlinked directories are not descended into.
fn walk(root: &Path, min_depth: usize, reporter: &dyn PruneReporter) -> Listing<DirEntry> {
    let mut listing = Listing {
        entries: Vec::new(),
        errors: 0,
        unreadable: HashSet::new(),
    };

    for entry in WalkDir::new(root)
        .min_depth(min_depth)
        .follow_links(false)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => listing.entries.push(entry),
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                // walkdir's own Display repeats the path
                let reason = match err.io_error() {
                    Some(io) => io.to_string(),
                    None => err.to_string(),
                };
                reporter.on_warning(&format!(
                    "cannot read dir '{}': {}",
                    path.display(),
                    reason
                ));
                listing.errors += 1;
                listing.unreadable.insert(path);
            }
        }
    }

    listing
}

/// Every regular file below `root`, hidden ones included. A symlink counts
/// when its target is a regular file.
pub fn collect_files(root: &Path, reporter: &dyn PruneReporter) -> Listing<PathBuf> {
    let walked = walk(root, 1, reporter);
    let entries: Vec<PathBuf> = walked
        .entries
        .into_iter()
        .map(DirEntry::into_path)
        .filter(|path| path.is_file())
        .collect();

    debug!("{} files under {}", entries.len(), root.display());
    Listing {
        entries,
        errors: walked.errors,
        unreadable: walked.unreadable,
    }
}

/// Every directory under `root`, `root` itself included, deepest first.
/// Directories of equal depth keep their path order.
pub fn collect_dirs_deepest_first(root: &Path, reporter: &dyn PruneReporter) -> Listing<PathBuf> {
    let walked = walk(root, 0, reporter);
    let mut dirs: Vec<(usize, PathBuf)> = walked
        .entries
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| (entry.depth(), entry.into_path()))
        .collect();

    // sort_by is stable
    dirs.sort_by(|a, b| b.0.cmp(&a.0));

    debug!("{} directories under {}", dirs.len(), root.display());
    Listing {
        entries: dirs.into_iter().map(|(_, path)| path).collect(),
        errors: walked.errors,
        unreadable: walked.unreadable,
    }
}
