use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::PhaseStats;
use crate::audit::{AuditRecord, AuditSink, Outcome};
use crate::config::{PruneConfig, PruneContext};
use crate::error::Error;
use crate::progress::PruneReporter;
use crate::scanner;

fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn modified_at(path: &Path) -> io::Result<DateTime<Local>> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified))
}

/// Delete (or preview deleting) every file under the target that is older
/// than the cutoff and whose name passes the pattern filter.
///
/// Per-file failures are reported and recorded but never stop the pass.
/// Only a failure to write the audit record is returned as an error.
pub fn prune_files(
    config: &PruneConfig,
    context: &PruneContext,
    sink: &mut dyn AuditSink,
    reporter: &dyn PruneReporter,
) -> Result<PhaseStats, Error> {
    let listing = scanner::collect_files(&config.target_root, reporter);
    let log_identity = identity(&config.log_path);

    let mut stats = PhaseStats {
        scanned: listing.entries.len(),
        warnings: listing.errors,
        ..PhaseStats::default()
    };

    for path in listing.entries {
        if identity(&path) == log_identity {
            debug!("Skipping audit log {}", path.display());
            continue;
        }

        let modified = match modified_at(&path) {
            Ok(modified) => modified,
            Err(err) => {
                reporter.on_warning(&format!("cannot stat '{}': {}", path.display(), err));
                stats.warnings += 1;
                continue;
            }
        };

        if !context.is_expired(modified) {
            stats.retained += 1;
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !config.patterns.matches(&name) {
            debug!("No pattern matches {}", path.display());
            stats.unmatched += 1;
            continue;
        }

        let outcome = if config.dry_run {
            reporter.on_would_delete(&path);
            stats.previewed += 1;
            Outcome::DryRun
        } else {
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Deleted {}", path.display());
                    stats.removed += 1;
                    Outcome::Deleted
                }
                Err(err) => {
                    let message = format!("error deleting: {}", err);
                    reporter.on_warning(&format!("{} '{}'", message, path.display()));
                    stats.failed += 1;
                    stats.warnings += 1;
                    Outcome::Error(message)
                }
            }
        };

        sink.append(&AuditRecord {
            timestamp: context.now,
            entry_path: path,
            last_modified: Some(modified),
            outcome,
        })?;
    }

    Ok(stats)
}
