use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use super::PhaseStats;
use crate::audit::{AuditRecord, AuditSink, Outcome};
use crate::config::PruneContext;
use crate::error::Error;
use crate::progress::PruneReporter;
use crate::scanner;

fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    let mut entries = fs::read_dir(dir)?;
    Ok(entries.next().transpose()?.is_none())
}

/// Remove directories that are empty, children before parents, in a single
/// pass. Must run after file pruning has finished.
///
/// `target` itself is a candidate like any other directory.
pub fn prune_empty_dirs(
    target: &Path,
    dry_run: bool,
    context: &PruneContext,
    sink: &mut dyn AuditSink,
    reporter: &dyn PruneReporter,
) -> Result<PhaseStats, Error> {
    let listing = scanner::collect_dirs_deepest_first(target, reporter);

    let mut stats = PhaseStats {
        scanned: listing.entries.len(),
        warnings: listing.errors,
        ..PhaseStats::default()
    };

    for dir in listing.entries {
        if listing.unreadable.contains(&dir) {
            continue;
        }

        match is_empty_dir(&dir) {
            Ok(true) => {}
            Ok(false) => {
                stats.retained += 1;
                continue;
            }
            Err(err) => {
                reporter.on_warning(&format!("cannot read dir '{}': {}", dir.display(), err));
                stats.warnings += 1;
                continue;
            }
        }

        let outcome = if dry_run {
            reporter.on_would_remove_dir(&dir);
            stats.previewed += 1;
            Outcome::DryRunEmptyDir
        } else {
            match fs::remove_dir(&dir) {
                Ok(()) => {
                    debug!("Removed empty dir {}", dir.display());
                    stats.removed += 1;
                    Outcome::RemovedEmptyDir
                }
                Err(err) => {
                    let message = format!("error removing dir: {}", err);
                    reporter.on_warning(&format!("{} '{}'", message, dir.display()));
                    stats.failed += 1;
                    stats.warnings += 1;
                    Outcome::Error(message)
                }
            }
        };

        sink.append(&AuditRecord {
            timestamp: context.now,
            entry_path: dir,
            last_modified: None,
            outcome,
        })?;
    }

    Ok(stats)
}
